//! Constraint-model construction for Synthtab.
//!
//! Builds the combination-cell space from declared categorical variables,
//! derives the cross-variable category pairs that stand in for conditional
//! probabilities, and assembles the full linear equality system. The output
//! is an immutable [`AssembledModel`] ready to hand to the solve crate; the
//! representation is solver-agnostic so the LP backend stays an opaque
//! collaborator.

pub mod assemble;
pub mod linear;
pub mod pairs;
pub mod space;

pub use assemble::{AssembledModel, DeclarationKind, ModelBuilder, ResolvedDeclaration};
pub use linear::{
    DecisionVariable, Equality, LinearExpr, Objective, Sense, VarId, VarKind, VariableRegistry,
};
pub use pairs::{CategoryPair, derive_pairs};
pub use space::{Catalog, CategoryRef, CellKey};
