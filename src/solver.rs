//! Search loop over candidate placements.
//!
//! Candidates come from the lazy placement generator; each one is realized
//! into a board, simulated, and checked for target coverage. The search
//! stops at the first placement that lights every target, so the rest of
//! the candidate space is never touched.

use log::{debug, info};

use crate::board::Board;
use crate::engine::{simulate, IlluminatedSet};
use crate::error::SolverError;
use crate::generator::{Placement, Placements};
use crate::lattice::Point;
use crate::layout::GridLayout;

/// A placement that lights every target, with the points it lights.
#[derive(Clone, Debug)]
pub struct SolvedBoard {
    pub placement: Placement,
    pub illuminated: IlluminatedSet,
    /// 1-based position of this placement in the candidate sequence.
    pub candidate: u64,
}

/// Returns true if every target lies in `illuminated`.
#[inline]
pub fn covers_targets(targets: &[Point], illuminated: &IlluminatedSet) -> bool {
    targets.iter().all(|target| illuminated.contains(target))
}

/// Realizes `placement` on `layout` and simulates every laser over it.
pub fn evaluate(layout: &GridLayout, placement: &Placement) -> IlluminatedSet {
    let board = Board::realize(layout, placement);
    simulate(&board, layout.lasers())
}

/// Lazy iterator over every solving placement, in candidate order.
pub struct Solutions<'a> {
    layout: &'a GridLayout,
    placements: Placements,
    checked: u64,
}

impl<'a> Solutions<'a> {
    /// Number of candidates simulated so far.
    pub fn candidates_checked(&self) -> u64 {
        self.checked
    }

    /// Size of the whole candidate space, if it fits in a `u128`.
    pub fn candidate_count(&self) -> Option<u128> {
        self.placements.candidate_count()
    }
}

impl Iterator for Solutions<'_> {
    type Item = SolvedBoard;

    fn next(&mut self) -> Option<SolvedBoard> {
        for placement in self.placements.by_ref() {
            self.checked += 1;

            let illuminated = evaluate(self.layout, &placement);
            if covers_targets(self.layout.targets(), &illuminated) {
                return Some(SolvedBoard {
                    placement,
                    illuminated,
                    candidate: self.checked,
                });
            }
        }

        None
    }
}

/// Starts a search over every placement of `layout`.
///
/// Fails with [`SolverError::ConfigurationMismatch`] before any search if the
/// inventory does not fill the open cells.
pub fn solutions(layout: &GridLayout) -> Result<Solutions<'_>, SolverError> {
    let placements = Placements::for_layout(layout)?;

    match placements.candidate_count() {
        Some(count) => debug!(
            "searching {} candidates over {} open cells",
            count,
            layout.open_count()
        ),
        None => debug!(
            "searching an unbounded candidate space over {} open cells",
            layout.open_count()
        ),
    }

    Ok(Solutions {
        layout,
        placements,
        checked: 0,
    })
}

/// Finds the first placement that lights every target.
///
/// Returns [`SolverError::NoSolutionFound`] once the whole candidate space
/// has been simulated without success.
pub fn solve(layout: &GridLayout) -> Result<SolvedBoard, SolverError> {
    let mut search = solutions(layout)?;

    match search.next() {
        Some(solved) => {
            info!("solved after {} candidates", solved.candidate);
            Ok(solved)
        }
        None => {
            let candidates = search.candidates_checked();
            debug!("exhausted {} candidates without a solution", candidates);
            Err(SolverError::NoSolutionFound { candidates })
        }
    }
}
