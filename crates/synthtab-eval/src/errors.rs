use thiserror::Error;

/// Errors emitted by strict-mode validation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Structural invariants of the solved table were violated.
    #[error("{0} structural invariant(s) violated")]
    Invariants(u64),
    /// Declared probabilities missed their targets.
    #[error("{0} declaration(s) missed their declared probability")]
    Mismatches(u64),
}
