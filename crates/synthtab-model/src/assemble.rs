//! Constraint assembly: wires the cell space, per-category counts, and
//! cross-variable pair counts into one immutable equality system.

use std::collections::BTreeMap;

use tracing::debug;

use synthtab_core::{
    Error, ProbabilityDeclaration, Result, SpecWarning, TableSpec, validate_spec,
};

use crate::linear::{Equality, LinearExpr, Objective, Sense, VarId, VarKind, VariableRegistry};
use crate::pairs::{CategoryPair, derive_pairs};
use crate::space::{Catalog, CategoryRef, CellKey};

/// Kind of a resolved probability declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Absolute,
    Conditional,
}

/// A declared probability resolved against the catalog. The probability is
/// a fixed coefficient; only the counts are solved for.
#[derive(Debug, Clone)]
pub struct ResolvedDeclaration {
    pub label: String,
    pub kind: DeclarationKind,
    /// Category whose share is fixed.
    pub target: CategoryRef,
    /// Conditioning category, for conditional declarations.
    pub condition: Option<CategoryRef>,
    pub probability: f64,
}

/// The immutable assembled system: every decision variable, every equality,
/// the objective, and the typed lookups needed to read a solution back.
#[derive(Debug)]
pub struct AssembledModel {
    pub catalog: Catalog,
    pub registry: VariableRegistry,
    pub cells: BTreeMap<CellKey, VarId>,
    pub categories: BTreeMap<CategoryRef, VarId>,
    pub pairs: BTreeMap<CategoryPair, VarId>,
    pub total: VarId,
    pub equalities: Vec<Equality>,
    pub objective: Objective,
    pub declarations: Vec<ResolvedDeclaration>,
    pub sample_size: f64,
    pub warnings: Vec<SpecWarning>,
}

/// Builds an [`AssembledModel`] from a declaration document. Owned by one
/// caller; assembly happens once and the result is never re-keyed.
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    spec: &'a TableSpec,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(spec: &'a TableSpec) -> Self {
        Self { spec }
    }

    pub fn assemble(self) -> Result<AssembledModel> {
        let warnings = validate_spec(self.spec)?;
        let catalog = Catalog::from_spec(self.spec)?;
        let mut registry = VariableRegistry::default();

        let mut cells = BTreeMap::new();
        for key in catalog.cells() {
            let name = format!("cell({})", catalog.cell_labels(&key).join(","));
            let id = registry.add(name, VarKind::Cell(key.clone()));
            cells.insert(key, id);
        }

        let mut categories = BTreeMap::new();
        for category in catalog.category_refs() {
            let name = format!(
                "count({}={})",
                catalog.variable_name(category.variable),
                catalog.label(category)
            );
            let id = registry.add(name, VarKind::Category(category));
            categories.insert(category, id);
        }

        let mut pairs = BTreeMap::new();
        for pair in derive_pairs(&catalog) {
            let name = format!(
                "count({}&{})",
                catalog.label(pair.lo()),
                catalog.label(pair.hi())
            );
            let id = registry.add(name, VarKind::Pair(pair));
            pairs.insert(pair, id);
        }

        let total = registry.add("n".to_string(), VarKind::Total);

        let mut equalities = Vec::new();
        equalities.push(Equality {
            label: "n = sum(cells)".to_string(),
            lhs: LinearExpr::var(total),
            rhs: LinearExpr::sum(cells.values().copied()),
        });
        equalities.push(Equality {
            label: format!("n = {}", self.spec.sample_size),
            lhs: LinearExpr::var(total),
            rhs: LinearExpr::constant(self.spec.sample_size),
        });

        for (&category, &id) in &categories {
            equalities.push(Equality {
                label: format!("{} = sum(matching cells)", registry.get(id).name),
                lhs: LinearExpr::var(id),
                rhs: LinearExpr::sum(
                    cells
                        .iter()
                        .filter(|(key, _)| key.contains(category))
                        .map(|(_, &cell)| cell),
                ),
            });
        }

        for (&pair, &id) in &pairs {
            equalities.push(Equality {
                label: format!("{} = sum(matching cells)", registry.get(id).name),
                lhs: LinearExpr::var(id),
                rhs: LinearExpr::sum(
                    cells
                        .iter()
                        .filter(|(key, _)| key.contains(pair.lo()) && key.contains(pair.hi()))
                        .map(|(_, &cell)| cell),
                ),
            });
        }

        let mut declarations = Vec::new();
        for declared in &self.spec.declarations {
            let resolved = resolve_declaration(declared, &catalog)?;
            let equality = match resolved.kind {
                DeclarationKind::Absolute => Equality {
                    label: resolved.label.clone(),
                    lhs: LinearExpr::var(lookup(&categories, &resolved.target, &resolved.label)?),
                    rhs: LinearExpr::term(total, resolved.probability),
                },
                DeclarationKind::Conditional => {
                    let condition = resolved.condition.ok_or_else(|| {
                        Error::Other(format!("conditional '{}' lost its condition", resolved.label))
                    })?;
                    let pair = CategoryPair::new(resolved.target, condition);
                    Equality {
                        label: resolved.label.clone(),
                        lhs: LinearExpr::var(lookup(&pairs, &pair, &resolved.label)?),
                        rhs: LinearExpr::term(
                            lookup(&categories, &condition, &resolved.label)?,
                            resolved.probability,
                        ),
                    }
                }
            };
            equalities.push(equality);
            declarations.push(resolved);
        }

        let objective = Objective {
            sense: Sense::Maximize,
            expr: LinearExpr::var(total),
        };

        debug!(
            variables = registry.len(),
            cells = cells.len(),
            pairs = pairs.len(),
            equalities = equalities.len(),
            "assembled constraint system"
        );

        Ok(AssembledModel {
            catalog,
            registry,
            cells,
            categories,
            pairs,
            total,
            equalities,
            objective,
            declarations,
            sample_size: self.spec.sample_size,
            warnings,
        })
    }
}

fn resolve_declaration(
    declared: &ProbabilityDeclaration,
    catalog: &Catalog,
) -> Result<ResolvedDeclaration> {
    let label = declared.describe();
    match declared {
        ProbabilityDeclaration::Absolute(decl) => {
            let target =
                catalog
                    .resolve_label(&decl.category)
                    .ok_or_else(|| Error::UnknownCategory {
                        declaration: label.clone(),
                        category: decl.category.clone(),
                    })?;
            Ok(ResolvedDeclaration {
                label,
                kind: DeclarationKind::Absolute,
                target,
                condition: None,
                probability: decl.probability,
            })
        }
        ProbabilityDeclaration::Conditional(decl) => {
            let target = catalog.resolve_label(&decl.target_category).ok_or_else(|| {
                Error::UnknownCategory {
                    declaration: label.clone(),
                    category: decl.target_category.clone(),
                }
            })?;
            let condition = catalog
                .resolve_label(&decl.condition_category)
                .ok_or_else(|| Error::UnknownCategory {
                    declaration: label.clone(),
                    category: decl.condition_category.clone(),
                })?;
            if target.variable == condition.variable {
                return Err(Error::SameVariableCondition {
                    declaration: label,
                    variable: catalog.variable_name(target.variable).to_string(),
                });
            }
            Ok(ResolvedDeclaration {
                label,
                kind: DeclarationKind::Conditional,
                target,
                condition: Some(condition),
                probability: decl.probability,
            })
        }
    }
}

fn lookup<K: Ord>(map: &BTreeMap<K, VarId>, key: &K, context: &str) -> Result<VarId> {
    map.get(key)
        .copied()
        .ok_or_else(|| Error::Other(format!("no count variable registered for '{context}'")))
}
