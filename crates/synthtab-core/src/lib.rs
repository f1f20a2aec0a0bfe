//! Core contracts and helpers for Synthtab.
//!
//! This crate defines the canonical declaration types for a synthetic
//! contingency table, the validation helpers that reject malformed
//! declarations before any model is assembled, and the error taxonomy
//! shared across the model, solve, and eval crates.

pub mod error;
pub mod spec;
pub mod validation;

pub use error::{Error, Result};
pub use spec::{
    AbsoluteProbability, CategoricalVariable, ConditionalProbability, ProbabilityDeclaration,
    TableSpec,
};
pub use validation::{SpecWarning, validate_spec};

/// Current contract version for table declaration documents.
pub const SPEC_VERSION: &str = "0.1";
