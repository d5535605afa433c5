//! Block kinds and the inventory of blocks a puzzle asks to place.

/// What occupies a logical cell.
///
/// The derived ordering (`Empty < Reflective < Opaque < Refractive`) is the
/// order the placement generator enumerates candidates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKind {
    /// No block: lasers pass straight through.
    Empty,
    /// Mirrors the velocity component normal to the side that was hit.
    Reflective,
    /// Absorbs any laser that hits it.
    Opaque,
    /// Lets the laser through and also spawns a reflected branch.
    Refractive,
}

impl BlockKind {
    /// Number of block kinds.
    pub const COUNT: usize = 4;

    /// Every block kind, in enumeration order.
    pub const ALL: [BlockKind; Self::COUNT] = [
        BlockKind::Empty,
        BlockKind::Reflective,
        BlockKind::Opaque,
        BlockKind::Refractive,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// How many blocks of each kind must be placed on the open cells.
///
/// `Empty` is counted explicitly: it is the share of open cells left
/// without a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: [usize; BlockKind::COUNT],
}

impl Inventory {
    pub const fn new() -> Self {
        Self {
            counts: [0; BlockKind::COUNT],
        }
    }

    /// Returns a copy of this inventory with `kind` set to `count`.
    pub fn with(mut self, kind: BlockKind, count: usize) -> Self {
        self.counts[kind.index()] = count;
        self
    }

    pub fn set(&mut self, kind: BlockKind, count: usize) {
        self.counts[kind.index()] = count;
    }

    #[inline]
    pub fn count(&self, kind: BlockKind) -> usize {
        self.counts[kind.index()]
    }

    /// Total number of slots this inventory fills, `Empty` included.
    ///
    /// Saturates at `usize::MAX`, which no board can match.
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .fold(0, |total: usize, &count| total.saturating_add(count))
    }

    /// Number of actual blocks, `Empty` excluded. Saturates like [`total`].
    ///
    /// [`total`]: Inventory::total
    pub fn blocks(&self) -> usize {
        BlockKind::ALL
            .iter()
            .filter(|&&kind| kind != BlockKind::Empty)
            .fold(0, |total: usize, &kind| total.saturating_add(self.count(kind)))
    }

    /// Iterates `(kind, count)` pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, usize)> + '_ {
        BlockKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .filter(|&(_, count)| count > 0)
    }

    /// Expands the inventory into a sorted multiset of kinds.
    pub fn to_multiset(&self) -> Vec<BlockKind> {
        self.iter()
            .flat_map(|(kind, count)| std::iter::repeat(kind).take(count))
            .collect()
    }
}
