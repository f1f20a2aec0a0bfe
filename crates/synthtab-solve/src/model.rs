use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use synthtab_model::{AssembledModel, CategoryPair, CategoryRef, CellKey};

/// Options for a solve run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Values this close below zero are treated as solver noise and clamped
    /// to zero when reading the solution back.
    pub clamp_epsilon: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            clamp_epsilon: 1e-9,
        }
    }
}

/// Terminal status of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    Infeasible,
    Unbounded,
    SolverError,
}

/// Serializable summary of one solve run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub run_id: String,
    pub status: SolveStatus,
    pub variables: u64,
    pub equalities: u64,
    pub duration_ms: u64,
}

/// Solved counts keyed by the typed model keys. Values are populated once,
/// post-solve; nothing here is mutated afterwards.
#[derive(Debug, Clone)]
pub struct SolvedTable {
    /// Value of the total-count variable.
    pub total: f64,
    pub cells: BTreeMap<CellKey, f64>,
    pub categories: BTreeMap<CategoryRef, f64>,
    pub pairs: BTreeMap<CategoryPair, f64>,
}

impl SolvedTable {
    /// Labelled rows of the cell table, one per combination cell, in the
    /// model's deterministic cell order.
    pub fn rows<'a>(&'a self, model: &'a AssembledModel) -> Vec<(Vec<&'a str>, f64)> {
        self.cells
            .iter()
            .map(|(key, &value)| (model.catalog.cell_labels(key), value))
            .collect()
    }
}

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub report: SolveReport,
    pub table: SolvedTable,
}
