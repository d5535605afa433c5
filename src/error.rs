//! Errors reported by the solver core.

/// Error type for a solve attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The inventory does not fill the open cells exactly.
    ConfigurationMismatch {
        /// Sum of the inventory counts, `Empty` included.
        required: usize,
        /// Number of open cells on the board.
        open: usize,
    },
    /// Every candidate placement was simulated and none lit all targets.
    NoSolutionFound {
        /// Number of candidates evaluated.
        candidates: u64,
    },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::ConfigurationMismatch { required, open } => write!(
                f,
                "Configuration mismatch: inventory fills {} cells but the board has {} open cells",
                required, open
            ),
            SolverError::NoSolutionFound { candidates } => {
                write!(f, "No solution found after {} candidates", candidates)
            }
        }
    }
}

impl std::error::Error for SolverError {}
