//! Validation & reporting for solved Synthtab tables.
//!
//! Recomputes realized probabilities from the solved cell values, verifies
//! the structural invariants of the assembled system, and renders
//! machine-readable metrics plus a deterministic markdown report. Nothing
//! here mutates the solved model.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;

pub use engine::ValidationEngine;
pub use errors::EvalError;
pub use metrics::{DeclarationOutcome, InvariantOutcome, METRICS_VERSION, ValidationMetrics};
pub use model::{ValidateOptions, ValidationResult};
