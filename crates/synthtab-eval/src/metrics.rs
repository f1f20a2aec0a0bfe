use serde::{Deserialize, Serialize};

use synthtab_core::SpecWarning;

/// Metrics contract version for validation output.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable outcome of validating one solved table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub metrics_version: String,
    pub sample_size: f64,
    /// Sum of the solved cell values.
    pub total_realized: f64,
    pub cell_count: u64,
    pub declarations: Vec<DeclarationOutcome>,
    pub invariants: Vec<InvariantOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SpecWarning>,
}

/// Realized-vs-declared outcome for one probability declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationOutcome {
    pub declaration: String,
    pub kind: String,
    pub declared: f64,
    /// Ratio recomputed from the solved cells; absent when the declaration
    /// holds vacuously (conditioning count of zero).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realized: Option<f64>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Outcome for one structural invariant of the solved table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvariantOutcome {
    pub code: String,
    pub detail: String,
    pub passed: bool,
}
