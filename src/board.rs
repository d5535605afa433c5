//! Realized boards: a layout with one placement applied, ready to simulate.
//!
//! Every non-empty cell tags its four boundary points with its kind and the
//! side the point sits on. A boundary point between two cells can carry one
//! tag from each, so the lattice stores up to two tags per point.

use crate::blocks::BlockKind;
use crate::generator::Placement;
use crate::lattice::{boundary_points, Cell, Lattice, Point, Side, Velocity};
use crate::layout::{GridLayout, Slot};

/// Maximum number of cells sharing one boundary point.
const MAX_TAGS_PER_POINT: usize = 2;

/// A non-empty cell's mark on one of its boundary points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag {
    pub kind: BlockKind,
    /// Offset from the cell center to the tagged point.
    pub side: Side,
}

impl Tag {
    /// Returns true if a ray moving with `velocity` is heading into the cell.
    ///
    /// The ray approaches when its negated velocity matches the side on at
    /// least one axis. A ray leaving the cell through the same point does not.
    #[inline(always)]
    pub fn is_approached_by(&self, (vx, vy): Velocity) -> bool {
        -vx == self.side.0 || -vy == self.side.1
    }

    /// Velocity after bouncing off this side: the component along the
    /// side's axis flips.
    #[inline(always)]
    pub fn reflect(&self, (vx, vy): Velocity) -> Velocity {
        (
            if self.side.0 != 0 { -vx } else { vx },
            if self.side.1 != 0 { -vy } else { vy },
        )
    }
}

/// A layout with every open cell resolved to a concrete kind.
#[derive(Clone, Debug)]
pub struct Board {
    lattice: Lattice,
    /// Tags per lattice point, indexed by [`Lattice::index`].
    tags: Vec<[Option<Tag>; MAX_TAGS_PER_POINT]>,
}

impl Board {
    /// Applies `placement` to the open cells of `layout`.
    ///
    /// Panics if the placement does not cover the open cells exactly; the
    /// placement generator never produces such a placement.
    pub fn realize(layout: &GridLayout, placement: &Placement) -> Board {
        let lattice = layout.lattice();
        let mut board = Board {
            lattice,
            tags: vec![[None; MAX_TAGS_PER_POINT]; lattice.len()],
        };

        let mut assigned = placement.kinds().iter().copied();
        for (cell, slot) in layout.slots() {
            let kind = match slot {
                Slot::Fixed(kind) => kind,
                Slot::Open => assigned
                    .next()
                    .unwrap_or_else(|| panic!("placement is too short for open cell {cell:?}")),
            };

            if kind != BlockKind::Empty {
                board.tag_cell(cell, kind);
            }
        }

        assert!(
            assigned.next().is_none(),
            "placement is longer than the number of open cells"
        );

        board
    }

    fn tag_cell(&mut self, cell: Cell, kind: BlockKind) {
        for (side, point) in boundary_points(cell) {
            let index = self
                .lattice
                .index(point)
                .unwrap_or_else(|| panic!("boundary point {point:?} of {cell:?} is off the lattice"));

            let Some(free) = self.tags[index].iter_mut().find(|tag| tag.is_none()) else {
                panic!("boundary point {point:?} is shared by more than two cells");
            };
            *free = Some(Tag { kind, side });
        }
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// All tags on `point`. Empty for untagged or out-of-bounds points.
    pub fn tags_at(&self, point: Point) -> impl Iterator<Item = Tag> + '_ {
        self.lattice
            .index(point)
            .into_iter()
            .flat_map(move |index| self.tags[index].iter().flatten().copied())
    }

    /// The tag a ray at `point` moving with `velocity` runs into, if any.
    #[inline]
    pub fn approached_tag(&self, point: Point, velocity: Velocity) -> Option<Tag> {
        self.tags_at(point).find(|tag| tag.is_approached_by(velocity))
    }
}
