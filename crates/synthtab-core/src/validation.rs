use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spec::{ProbabilityDeclaration, TableSpec};

/// Warn-level structural issue found while validating a declaration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecWarning {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecWarning {
    fn new(code: &str, path: impl Into<String>, message: String, hint: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            path: path.into(),
            message,
            hint: hint.map(|hint| hint.to_string()),
        }
    }
}

/// Validate internal consistency of a declaration document.
///
/// Hard errors cover structure and references: duplicate variable names,
/// empty or duplicated category labels, declarations against unknown
/// variables or categories, probabilities outside [0, 1], and non-positive
/// sample sizes. Coverage of the probability tree is reported as warnings:
/// redundant-but-consistent declarations are legal, and genuinely
/// conflicting ones are the solver's to detect as infeasibility.
pub fn validate_spec(spec: &TableSpec) -> Result<Vec<SpecWarning>> {
    if !(spec.sample_size.is_finite() && spec.sample_size > 0.0) {
        return Err(Error::InvalidSampleSize(spec.sample_size));
    }
    if spec.variables.is_empty() {
        return Err(Error::NoVariables);
    }

    let mut variables: BTreeSet<&str> = BTreeSet::new();
    let mut label_owner: BTreeMap<&str, &str> = BTreeMap::new();

    for variable in &spec.variables {
        if !variables.insert(variable.name.as_str()) {
            return Err(Error::DuplicateVariable(variable.name.clone()));
        }
        if variable.categories.is_empty() {
            return Err(Error::EmptyCategories(variable.name.clone()));
        }
        for label in &variable.categories {
            if let Some(first) = label_owner.insert(label.as_str(), variable.name.as_str()) {
                return Err(Error::DuplicateCategory {
                    label: label.clone(),
                    first: first.to_string(),
                    second: variable.name.clone(),
                });
            }
        }
    }

    let mut absolute_roots: BTreeSet<&str> = BTreeSet::new();
    let mut absolute_covered: BTreeSet<&str> = BTreeSet::new();
    let mut conditional_targets: BTreeSet<&str> = BTreeSet::new();

    for declared in &spec.declarations {
        let probability = declared.probability();
        if !(probability.is_finite() && (0.0..=1.0).contains(&probability)) {
            return Err(Error::InvalidProbability {
                declaration: declared.describe(),
                value: probability,
            });
        }

        match declared {
            ProbabilityDeclaration::Absolute(decl) => {
                if !variables.contains(decl.variable.as_str()) {
                    return Err(Error::UnknownVariable {
                        declaration: declared.describe(),
                        variable: decl.variable.clone(),
                    });
                }
                match label_owner.get(decl.category.as_str()) {
                    Some(owner) if *owner == decl.variable => {}
                    _ => {
                        return Err(Error::UnknownCategory {
                            declaration: declared.describe(),
                            category: decl.category.clone(),
                        });
                    }
                }
                absolute_roots.insert(decl.variable.as_str());
                absolute_covered.insert(decl.category.as_str());
            }
            ProbabilityDeclaration::Conditional(decl) => {
                let target_owner = resolve(&label_owner, &decl.target_category, declared)?;
                let condition_owner = resolve(&label_owner, &decl.condition_category, declared)?;
                if target_owner == condition_owner {
                    return Err(Error::SameVariableCondition {
                        declaration: declared.describe(),
                        variable: target_owner.to_string(),
                    });
                }
                conditional_targets.insert(decl.target_category.as_str());
            }
        }
    }

    Ok(coverage_warnings(
        spec,
        &absolute_roots,
        &absolute_covered,
        &conditional_targets,
    ))
}

fn resolve<'a>(
    label_owner: &BTreeMap<&str, &'a str>,
    label: &str,
    declared: &ProbabilityDeclaration,
) -> Result<&'a str> {
    label_owner
        .get(label)
        .copied()
        .ok_or_else(|| Error::UnknownCategory {
            declaration: declared.describe(),
            category: label.to_string(),
        })
}

/// Warn on probability trees that leave part of the table undetermined.
fn coverage_warnings(
    spec: &TableSpec,
    absolute_roots: &BTreeSet<&str>,
    absolute_covered: &BTreeSet<&str>,
    conditional_targets: &BTreeSet<&str>,
) -> Vec<SpecWarning> {
    let mut warnings = Vec::new();

    match absolute_roots.len() {
        0 => warnings.push(SpecWarning::new(
            "no_root",
            "declarations",
            "no absolute probabilities declared; every variable's split is left to the solver"
                .to_string(),
            Some("declare absolute probabilities for exactly one variable"),
        )),
        1 => {}
        _ => {
            let roots: Vec<&str> = absolute_roots.iter().copied().collect();
            warnings.push(SpecWarning::new(
                "multiple_roots",
                "declarations",
                format!(
                    "absolute probabilities declared for {} variables: {}",
                    roots.len(),
                    roots.join(", ")
                ),
                Some("overlapping absolute blocks risk infeasibility"),
            ));
        }
    }

    for variable in &spec.variables {
        let is_root = absolute_roots.contains(variable.name.as_str());
        for label in &variable.categories {
            if is_root && !absolute_covered.contains(label.as_str()) {
                warnings.push(SpecWarning::new(
                    "root_gap",
                    variable.name.clone(),
                    format!(
                        "category '{}' of root variable '{}' has no absolute probability",
                        label, variable.name
                    ),
                    Some("cover every category of the root variable"),
                ));
            }
            if !is_root && !conditional_targets.contains(label.as_str()) {
                warnings.push(SpecWarning::new(
                    "unreachable_category",
                    variable.name.clone(),
                    format!(
                        "category '{}' of '{}' is never targeted by a conditional declaration",
                        label, variable.name
                    ),
                    Some("its share is left entirely to the solver"),
                ));
            }
        }
    }

    warnings
}
