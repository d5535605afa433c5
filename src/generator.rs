//! Lazy enumeration of distinct block placements.
//!
//! Candidates are the distinct permutations of the inventory's multiset of
//! kinds. Starting from the sorted multiset, each candidate is derived from
//! the previous one in place by the classic next-permutation step, so equal
//! kinds are never swapped into a duplicate and nothing beyond the current
//! candidate is ever held in memory.

use crate::blocks::{BlockKind, Inventory};
use crate::error::SolverError;
use crate::lattice::Cell;
use crate::layout::GridLayout;

/// One assignment of a block kind to every open cell.
///
/// Kinds are listed in the row-major order of [`GridLayout::open_cells`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    kinds: Vec<BlockKind>,
}

impl Placement {
    pub fn new(kinds: Vec<BlockKind>) -> Self {
        Self { kinds }
    }

    #[inline]
    pub fn kinds(&self) -> &[BlockKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Pairs each open cell with its assigned kind.
    pub fn assignments<'a>(
        &'a self,
        open_cells: &'a [Cell],
    ) -> impl Iterator<Item = (Cell, BlockKind)> + 'a {
        open_cells.iter().copied().zip(self.kinds.iter().copied())
    }
}

/// Restartable iterator over every distinct placement, in lexicographic order.
#[derive(Clone, Debug)]
pub struct Placements {
    /// Sorted multiset: the first candidate.
    first: Vec<BlockKind>,
    /// Next candidate to emit, `None` once exhausted.
    pending: Option<Vec<BlockKind>>,
}

impl Placements {
    /// Creates the generator for `open_slots` cells and the given inventory.
    ///
    /// Fails with [`SolverError::ConfigurationMismatch`] if the inventory does
    /// not fill the slots exactly.
    pub fn new(open_slots: usize, inventory: &Inventory) -> Result<Self, SolverError> {
        let required = inventory.total();
        if required != open_slots {
            return Err(SolverError::ConfigurationMismatch {
                required,
                open: open_slots,
            });
        }

        let first = inventory.to_multiset();
        Ok(Self {
            pending: Some(first.clone()),
            first,
        })
    }

    /// Creates the generator for a layout's open cells and inventory.
    pub fn for_layout(layout: &GridLayout) -> Result<Self, SolverError> {
        Self::new(layout.open_count(), layout.inventory())
    }

    /// Rewinds to the first candidate.
    pub fn reset(&mut self) {
        self.pending = Some(self.first.clone());
    }

    /// Total number of candidates: the multinomial coefficient
    /// `n! / (k1! * k2! * ...)`.
    ///
    /// Returns `None` if the count does not fit in a `u128`.
    pub fn candidate_count(&self) -> Option<u128> {
        let mut remaining = self.first.len() as u64;
        let mut total: u128 = 1;

        for kind in BlockKind::ALL {
            let count = self.first.iter().filter(|&&k| k == kind).count() as u64;
            total = total.checked_mul(binomial(remaining, count)?)?;
            remaining -= count;
        }

        Some(total)
    }
}

impl Iterator for Placements {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        let current = self.pending.as_mut()?;
        let placement = Placement::new(current.clone());

        if !next_permutation(current) {
            self.pending = None;
        }

        Some(placement)
    }
}

impl std::iter::FusedIterator for Placements {}

/// Rearranges `kinds` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving `kinds` untouched) if it is already the last one.
fn next_permutation(kinds: &mut [BlockKind]) -> bool {
    if kinds.len() < 2 {
        return false;
    }

    // rightmost position whose successor is larger: the pivot
    let Some(pivot) = (0..kinds.len() - 1).rev().find(|&i| kinds[i] < kinds[i + 1]) else {
        return false;
    };

    // rightmost element larger than the pivot; the suffix is non-increasing
    let Some(successor) = (pivot + 1..kinds.len())
        .rev()
        .find(|&j| kinds[j] > kinds[pivot])
    else {
        return false;
    };

    kinds.swap(pivot, successor);
    kinds[pivot + 1..].reverse();
    true
}

/// `n choose k`, or `None` on overflow.
fn binomial(n: u64, k: u64) -> Option<u128> {
    if k > n {
        return Some(0);
    }

    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1)
        result = result.checked_mul((n - i) as u128)? / (i + 1) as u128;
    }

    Some(result)
}
