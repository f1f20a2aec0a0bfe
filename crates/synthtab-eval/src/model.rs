use serde::{Deserialize, Serialize};

use crate::metrics::ValidationMetrics;

/// Options for validating a solved table against its declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Relative tolerance for realized-vs-declared comparisons. LP equality
    /// constraints are exact up to solver floating-point precision, so the
    /// default is tight.
    pub relative_tolerance: f64,
    /// Absolute floor below which differences are ignored.
    pub absolute_tolerance: f64,
    /// Fail with an error when anything misses its target.
    pub strict: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-6,
            absolute_tolerance: 1e-9,
            strict: false,
        }
    }
}

/// Result of validating one solved table.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub metrics: ValidationMetrics,
    /// Deterministic markdown rendering of the metrics.
    pub report: String,
    /// True when every invariant and every declaration passed.
    pub passed: bool,
}
