use synthtab_model::{AssembledModel, CategoryRef, DeclarationKind};
use synthtab_solve::SolvedTable;

use crate::errors::EvalError;
use crate::metrics::{DeclarationOutcome, InvariantOutcome, METRICS_VERSION, ValidationMetrics};
use crate::model::{ValidateOptions, ValidationResult};
use crate::report::render_report;

/// Recomputes realized probabilities from the solved cell values and checks
/// the structural invariants of the assembled system.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    options: ValidateOptions,
}

impl ValidationEngine {
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    pub fn run(
        &self,
        model: &AssembledModel,
        table: &SolvedTable,
    ) -> Result<ValidationResult, EvalError> {
        let mut invariants = Vec::new();

        let min_cell = table
            .cells
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min);
        invariants.push(InvariantOutcome {
            code: "cell_non_negative".to_string(),
            detail: format!("minimum cell value {min_cell}"),
            passed: min_cell >= -self.options.absolute_tolerance,
        });

        let cell_sum: f64 = table.cells.values().sum();
        invariants.push(InvariantOutcome {
            code: "total_count".to_string(),
            detail: format!(
                "cells sum to {cell_sum}; total variable {}; declared {}",
                table.total, model.sample_size
            ),
            passed: self.near(cell_sum, table.total) && self.near(cell_sum, model.sample_size),
        });

        for variable in 0..model.catalog.variable_count() {
            let total: f64 = model
                .catalog
                .categories_of(variable)
                .map(|category| table.categories.get(&category).copied().unwrap_or(0.0))
                .sum();
            invariants.push(InvariantOutcome {
                code: format!("variable_total:{}", model.catalog.variable_name(variable)),
                detail: format!("category counts sum to {total}"),
                passed: self.near(total, model.sample_size),
            });
        }

        invariants.push(self.check_categories(model, table));
        invariants.push(self.check_pairs(model, table));

        let mut declarations = Vec::new();
        for resolved in &model.declarations {
            declarations.push(self.check_declaration(model, table, resolved, cell_sum));
        }

        let invariant_failures = invariants.iter().filter(|item| !item.passed).count() as u64;
        let declaration_failures = declarations.iter().filter(|item| !item.passed).count() as u64;
        let passed = invariant_failures == 0 && declaration_failures == 0;

        let metrics = ValidationMetrics {
            metrics_version: METRICS_VERSION.to_string(),
            sample_size: model.sample_size,
            total_realized: cell_sum,
            cell_count: table.cells.len() as u64,
            declarations,
            invariants,
            warnings: model.warnings.clone(),
        };

        let cell_rows: Vec<(String, f64)> = table
            .cells
            .iter()
            .map(|(key, &value)| (model.catalog.cell_labels(key).join(","), value))
            .collect();
        let report = render_report(&metrics, &cell_rows);

        if self.options.strict {
            if invariant_failures > 0 {
                return Err(EvalError::Invariants(invariant_failures));
            }
            if declaration_failures > 0 {
                return Err(EvalError::Mismatches(declaration_failures));
            }
        }

        Ok(ValidationResult {
            metrics,
            report,
            passed,
        })
    }

    fn check_categories(&self, model: &AssembledModel, table: &SolvedTable) -> InvariantOutcome {
        let mut mismatched = Vec::new();
        for (&category, &value) in &table.categories {
            let recomputed = count_with(table, category);
            if !self.near(value, recomputed) {
                mismatched.push(model.catalog.label(category).to_string());
            }
        }
        InvariantOutcome {
            code: "category_consistency".to_string(),
            detail: if mismatched.is_empty() {
                format!("{} category counts match their cells", table.categories.len())
            } else {
                format!("mismatched categories: {}", mismatched.join(", "))
            },
            passed: mismatched.is_empty(),
        }
    }

    fn check_pairs(&self, model: &AssembledModel, table: &SolvedTable) -> InvariantOutcome {
        let mut mismatched = Vec::new();
        for (&pair, &value) in &table.pairs {
            let recomputed = count_with_both(table, pair.lo(), pair.hi());
            let lo_count = table.categories.get(&pair.lo()).copied().unwrap_or(0.0);
            let hi_count = table.categories.get(&pair.hi()).copied().unwrap_or(0.0);
            let bound = self.options.absolute_tolerance
                + self.options.relative_tolerance * lo_count.max(hi_count);
            if !self.near(value, recomputed)
                || value > lo_count + bound
                || value > hi_count + bound
            {
                mismatched.push(format!(
                    "{}&{}",
                    model.catalog.label(pair.lo()),
                    model.catalog.label(pair.hi())
                ));
            }
        }
        InvariantOutcome {
            code: "pair_consistency".to_string(),
            detail: if mismatched.is_empty() {
                format!("{} pair counts match their cells", table.pairs.len())
            } else {
                format!("mismatched pairs: {}", mismatched.join(", "))
            },
            passed: mismatched.is_empty(),
        }
    }

    fn check_declaration(
        &self,
        model: &AssembledModel,
        table: &SolvedTable,
        resolved: &synthtab_model::ResolvedDeclaration,
        cell_sum: f64,
    ) -> DeclarationOutcome {
        let kind = match resolved.kind {
            DeclarationKind::Absolute => "absolute",
            DeclarationKind::Conditional => "conditional",
        };

        let (realized, passed, note) = match (resolved.kind, resolved.condition) {
            (DeclarationKind::Absolute, _) => {
                if cell_sum.abs() <= self.options.absolute_tolerance {
                    (None, false, Some("solved table is empty".to_string()))
                } else {
                    let realized = count_with(table, resolved.target) / cell_sum;
                    (
                        Some(realized),
                        self.near(realized, resolved.probability),
                        None,
                    )
                }
            }
            (DeclarationKind::Conditional, Some(condition)) => {
                let denominator = count_with(table, condition);
                if denominator.abs() <= self.options.absolute_tolerance {
                    (
                        None,
                        true,
                        Some(format!(
                            "conditioning count for '{}' is zero; holds vacuously",
                            model.catalog.label(condition)
                        )),
                    )
                } else {
                    let realized =
                        count_with_both(table, resolved.target, condition) / denominator;
                    (
                        Some(realized),
                        self.near(realized, resolved.probability),
                        None,
                    )
                }
            }
            (DeclarationKind::Conditional, None) => (
                None,
                false,
                Some("conditional declaration lost its condition".to_string()),
            ),
        };

        DeclarationOutcome {
            declaration: resolved.label.clone(),
            kind: kind.to_string(),
            declared: resolved.probability,
            realized,
            passed,
            note,
        }
    }

    fn near(&self, a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs());
        (a - b).abs()
            <= self
                .options
                .absolute_tolerance
                .max(self.options.relative_tolerance * scale)
    }
}

fn count_with(table: &SolvedTable, category: CategoryRef) -> f64 {
    table
        .cells
        .iter()
        .filter(|(key, _)| key.contains(category))
        .map(|(_, value)| value)
        .sum()
}

fn count_with_both(table: &SolvedTable, a: CategoryRef, b: CategoryRef) -> f64 {
    table
        .cells
        .iter()
        .filter(|(key, _)| key.contains(a) && key.contains(b))
        .map(|(_, value)| value)
        .sum()
}
