//! Solver-agnostic primitives for the assembled linear system.

use crate::pairs::CategoryPair;
use crate::space::{CategoryRef, CellKey};

/// Handle to one decision variable; ids are dense registry indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a decision variable counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarKind {
    /// One combination cell of the contingency table.
    Cell(CellKey),
    /// All cells sharing one category.
    Category(CategoryRef),
    /// All cells sharing both categories of a cross-variable pair.
    Pair(CategoryPair),
    /// The sum of every cell.
    Total,
}

/// A named, non-negative decision variable.
#[derive(Debug, Clone)]
pub struct DecisionVariable {
    pub id: VarId,
    pub name: String,
    pub kind: VarKind,
}

/// Registry of every decision variable in one model.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    variables: Vec<DecisionVariable>,
}

impl VariableRegistry {
    pub fn add(&mut self, name: String, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(DecisionVariable { id, name, kind });
        id
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, id: VarId) -> &DecisionVariable {
        &self.variables[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionVariable> {
        self.variables.iter()
    }
}

/// A linear combination of decision variables plus a constant offset.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    offset: f64,
}

impl LinearExpr {
    pub fn var(id: VarId) -> Self {
        Self::term(id, 1.0)
    }

    pub fn term(id: VarId, coefficient: f64) -> Self {
        Self {
            terms: vec![(id, coefficient)],
            offset: 0.0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            offset: value,
        }
    }

    pub fn sum(ids: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: ids.into_iter().map(|id| (id, 1.0)).collect(),
            offset: 0.0,
        }
    }

    pub fn add_term(&mut self, id: VarId, coefficient: f64) {
        self.terms.push((id, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

/// One equality constraint `lhs == rhs`, labelled for reporting.
#[derive(Debug, Clone)]
pub struct Equality {
    pub label: String,
    pub lhs: LinearExpr,
    pub rhs: LinearExpr,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Objective handed to the solver. Feasibility is all the model needs, so
/// any expression consistent with the constraints works.
#[derive(Debug, Clone)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}
