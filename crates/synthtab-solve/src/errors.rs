use thiserror::Error;

use crate::model::SolveStatus;

/// Errors emitted by the solve engine.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The declared constraints admit no non-negative solution. Retrying
    /// cannot change the outcome; the declarations must be revised.
    #[error("model is infeasible: the declared probabilities admit no non-negative cell counts")]
    Infeasible,
    /// The objective is unbounded; indicates the total-count pin is missing.
    #[error("objective is unbounded")]
    Unbounded,
    /// The external solver failed for another reason, surfaced verbatim.
    #[error("solver failure: {0}")]
    Solver(String),
}

impl SolveError {
    /// Terminal status corresponding to this error.
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveError::Infeasible => SolveStatus::Infeasible,
            SolveError::Unbounded => SolveStatus::Unbounded,
            SolveError::Solver(_) => SolveStatus::SolverError,
        }
    }
}
