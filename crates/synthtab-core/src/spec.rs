use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named attribute with a fixed, ordered set of mutually exclusive
/// category labels. Declared once; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoricalVariable {
    pub name: String,
    pub categories: Vec<String>,
}

impl CategoricalVariable {
    pub fn new(name: impl Into<String>, categories: &[&str]) -> Self {
        Self {
            name: name.into(),
            categories: categories.iter().map(|label| label.to_string()).collect(),
        }
    }
}

/// Fixes a category's share of the total sample size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AbsoluteProbability {
    /// Variable owning the category.
    pub variable: String,
    /// Category whose share is fixed.
    pub category: String,
    /// Share of the total sample size, in [0, 1].
    pub probability: f64,
}

/// Fixes the share of `target_category` within the sub-population selected
/// by `condition_category`. The two categories must belong to two distinct
/// variables; labels are resolved globally.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalProbability {
    pub target_category: String,
    pub condition_category: String,
    /// Conditional share, in [0, 1].
    pub probability: f64,
}

/// A single probability declaration against the table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbabilityDeclaration {
    Absolute(AbsoluteProbability),
    Conditional(ConditionalProbability),
}

impl ProbabilityDeclaration {
    pub fn absolute(variable: &str, category: &str, probability: f64) -> Self {
        Self::Absolute(AbsoluteProbability {
            variable: variable.to_string(),
            category: category.to_string(),
            probability,
        })
    }

    pub fn conditional(target: &str, condition: &str, probability: f64) -> Self {
        Self::Conditional(ConditionalProbability {
            target_category: target.to_string(),
            condition_category: condition.to_string(),
            probability,
        })
    }

    /// Human-readable rendering used in errors and reports.
    pub fn describe(&self) -> String {
        match self {
            ProbabilityDeclaration::Absolute(decl) => {
                format!("P({}) = {}", decl.category, decl.probability)
            }
            ProbabilityDeclaration::Conditional(decl) => format!(
                "P({} | {}) = {}",
                decl.target_category, decl.condition_category, decl.probability
            ),
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            ProbabilityDeclaration::Absolute(decl) => decl.probability,
            ProbabilityDeclaration::Conditional(decl) => decl.probability,
        }
    }
}

/// Canonical declaration document for one synthetic table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableSpec {
    /// Contract version for this declaration format.
    pub spec_version: String,
    /// Optional display name used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Categorical variables, one per output column.
    pub variables: Vec<CategoricalVariable>,
    /// Number of samples the solved cell counts must add up to.
    pub sample_size: f64,
    /// Absolute and conditional probability declarations.
    pub declarations: Vec<ProbabilityDeclaration>,
}

impl TableSpec {
    pub fn new(
        variables: Vec<CategoricalVariable>,
        sample_size: f64,
        declarations: Vec<ProbabilityDeclaration>,
    ) -> Self {
        Self {
            spec_version: crate::SPEC_VERSION.to_string(),
            name: None,
            variables,
            sample_size,
            declarations,
        }
    }
}
