//! Laser propagation over a realized board.
//!
//! Rays live on a worklist. Each ray is stepped until it leaves the lattice,
//! is absorbed, or re-enters a `(position, velocity)` state that was already
//! traced during this pass. A refractive cell pushes a second ray onto the
//! worklist for the straight-through branch and bends the current ray, so
//! branches never share mutable state.

use log::trace;
use rustc_hash::FxHashSet;

use crate::blocks::BlockKind;
use crate::board::Board;
use crate::lattice::{Point, Velocity};
use crate::layout::LaserSource;

/// Lattice points lit by any ray during one simulation pass.
pub type IlluminatedSet = FxHashSet<Point>;

/// One independent laser traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ray {
    pub position: Point,
    pub velocity: Velocity,
}

impl Ray {
    pub const fn new(position: Point, velocity: Velocity) -> Self {
        Self { position, velocity }
    }

    /// The ray one step further along its velocity.
    #[inline(always)]
    fn advanced(self) -> Self {
        Self {
            position: (
                self.position.0 + self.velocity.0,
                self.position.1 + self.velocity.1,
            ),
            velocity: self.velocity,
        }
    }
}

impl From<&LaserSource> for Ray {
    fn from(source: &LaserSource) -> Self {
        Ray::new(source.position, source.velocity)
    }
}

/// State of one simulation pass over one board.
pub struct Simulation<'a> {
    board: &'a Board,
    worklist: Vec<Ray>,
    /// States already traced; a ray reaching one again would repeat itself.
    traced: FxHashSet<Ray>,
    illuminated: IlluminatedSet,
}

impl<'a> Simulation<'a> {
    /// Seeds a pass with one ray per laser source.
    pub fn new(board: &'a Board, sources: &[LaserSource]) -> Self {
        Self {
            board,
            worklist: sources.iter().map(Ray::from).collect(),
            traced: FxHashSet::default(),
            illuminated: IlluminatedSet::default(),
        }
    }

    /// Traces every ray to exhaustion and returns the lit points.
    pub fn run(mut self) -> IlluminatedSet {
        while let Some(ray) = self.worklist.pop() {
            self.trace(ray);
        }
        self.illuminated
    }

    /// Steps a single ray until it exits, is absorbed, or loops.
    fn trace(&mut self, mut ray: Ray) {
        let lattice = self.board.lattice();

        loop {
            if !lattice.contains(ray.position) {
                return;
            }
            if !self.traced.insert(ray) {
                trace!("ray rejoins a traced state at {:?}", ray.position);
                return;
            }
            self.illuminated.insert(ray.position);

            let Some(tag) = self.board.approached_tag(ray.position, ray.velocity) else {
                ray = ray.advanced();
                continue;
            };

            match tag.kind {
                BlockKind::Reflective => {
                    ray.velocity = tag.reflect(ray.velocity);
                    ray = ray.advanced();
                }
                BlockKind::Opaque => return,
                BlockKind::Refractive => {
                    let through = ray.advanced();
                    trace!(
                        "refraction at {:?}: through {:?}, reflected {:?}",
                        ray.position,
                        through.velocity,
                        tag.reflect(ray.velocity)
                    );
                    self.worklist.push(through);

                    ray.velocity = tag.reflect(ray.velocity);
                    ray = ray.advanced();
                }
                BlockKind::Empty => {
                    panic!("empty cell tagged at {:?}", ray.position)
                }
            }
        }
    }
}

/// Runs one full pass of every source over `board`.
pub fn simulate(board: &Board, sources: &[LaserSource]) -> IlluminatedSet {
    Simulation::new(board, sources).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Inventory;
    use crate::generator::Placement;
    use crate::layout::{GridLayout, Slot};

    /// Builds a board where every cell is fixed, from rows of `.bff` symbols.
    fn fixed_board(rows: &[&str]) -> Board {
        let cols = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|symbol| match symbol {
                'A' => Slot::Fixed(BlockKind::Reflective),
                'B' => Slot::Fixed(BlockKind::Opaque),
                'C' => Slot::Fixed(BlockKind::Refractive),
                _ => Slot::Fixed(BlockKind::Empty),
            })
            .collect();
        let layout = GridLayout::new(
            rows.len(),
            cols,
            cells,
            Inventory::new(),
            Vec::new(),
            Vec::new(),
        );
        Board::realize(&layout, &Placement::new(Vec::new()))
    }

    fn lit(points: &[Point]) -> IlluminatedSet {
        points.iter().copied().collect()
    }

    #[test]
    fn test_empty_board_lights_straight_diagonal() {
        let board = fixed_board(&["...", "...", "..."]);
        let result = simulate(&board, &[LaserSource::new((0, 1), (1, 1))]);

        assert_eq!(
            result,
            lit(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)])
        );
    }

    #[test]
    fn test_source_outside_lattice_lights_nothing() {
        let board = fixed_board(&["."]);
        let result = simulate(&board, &[LaserSource::new((5, 1), (1, 1))]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_reflective_flips_one_component() {
        // ray enters the right-hand cell through its left side
        let board = fixed_board(&[".A"]);
        let result = simulate(&board, &[LaserSource::new((1, 2), (1, -1))]);

        assert_eq!(result, lit(&[(1, 2), (2, 1), (1, 0)]));
    }

    #[test]
    fn test_reflected_ray_keeps_travelling() {
        // bounce off the top of the lower-left cell and leave through the top
        let board = fixed_board(&["...", "A..", "..."]);
        let result = simulate(&board, &[LaserSource::new((0, 1), (1, 1))]);

        assert_eq!(
            result,
            lit(&[(0, 1), (1, 2), (2, 1), (3, 0)]),
            "ray should bounce off (1, 2) heading up"
        );
    }

    #[test]
    fn test_opaque_absorbs_at_tagged_point() {
        let board = fixed_board(&[".B"]);
        let result = simulate(&board, &[LaserSource::new((1, 2), (1, -1))]);

        assert_eq!(result, lit(&[(1, 2), (2, 1)]));
    }

    #[test]
    fn test_refractive_lights_both_branches() {
        let board = fixed_board(&[".C"]);
        let result = simulate(&board, &[LaserSource::new((1, 2), (1, -1))]);

        let through = [(2, 1), (3, 0)];
        let reflected = [(2, 1), (1, 0)];
        let mut expected = lit(&[(1, 2)]);
        expected.extend(through);
        expected.extend(reflected);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_refracted_branch_can_refract_again() {
        // splits at the bottom of the top-left cell, then the reflected
        // branch splits again at the left of the bottom-right cell
        let board = fixed_board(&["C..", "...", "..C"]);
        let result = simulate(&board, &[LaserSource::new((0, 3), (1, -1))]);

        let first_through = [(2, 1), (3, 0)];
        let second_through = [(5, 6)];
        let second_reflected = [(3, 6)];
        let mut expected = lit(&[(0, 3), (1, 2), (2, 3), (3, 4), (4, 5)]);
        expected.extend(first_through);
        expected.extend(second_through);
        expected.extend(second_reflected);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_moving_away_from_cell_does_not_trigger_it() {
        // starts on the right side of a mirror, heading away from it
        let board = fixed_board(&["A."]);
        let result = simulate(&board, &[LaserSource::new((2, 1), (1, 1))]);

        assert_eq!(result, lit(&[(2, 1), (3, 2)]));
    }

    #[test]
    fn test_multiple_sources_share_one_set() {
        let board = fixed_board(&["..", ".."]);
        let sources = [
            LaserSource::new((0, 1), (1, 1)),
            LaserSource::new((4, 1), (-1, 1)),
        ];
        let result = simulate(&board, &sources);

        assert_eq!(
            result,
            lit(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 1), (3, 2), (1, 4)])
        );
    }

    #[test]
    fn test_mirror_box_terminates() {
        // a ray trapped between mirrors cycles forever without the state check
        let board = fixed_board(&["AAA", "A.A", "AAA"]);
        let result = simulate(&board, &[LaserSource::new((2, 3), (1, 1))]);

        assert_eq!(result, lit(&[(2, 3), (3, 4), (4, 3), (3, 2)]));
    }
}
