//! Variable-space construction: the catalog of declared variables and
//! categories, and the Cartesian product of combination cells.

use std::collections::BTreeMap;

use synthtab_core::{Error, Result, TableSpec};

/// Strongly-typed reference to one category of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CategoryRef {
    pub variable: usize,
    pub category: usize,
}

/// Ordered tuple of category indices, one per declared variable; the key of
/// one combination cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellKey(Vec<usize>);

impl CellKey {
    /// Whether this cell's tuple assigns the given category.
    pub fn contains(&self, category: CategoryRef) -> bool {
        self.0.get(category.variable).copied() == Some(category.category)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

#[derive(Debug, Clone)]
struct VariableEntry {
    name: String,
    categories: Vec<String>,
}

/// Resolved lookup over the declared variables and categories. Labels are
/// globally unique, so a bare label resolves to exactly one category.
#[derive(Debug, Clone)]
pub struct Catalog {
    variables: Vec<VariableEntry>,
    labels: BTreeMap<String, CategoryRef>,
}

impl Catalog {
    /// Build the lookup from a declaration document. Callers are expected to
    /// run [`synthtab_core::validate_spec`] first; label uniqueness is
    /// re-checked because the lookup depends on it.
    pub fn from_spec(spec: &TableSpec) -> Result<Self> {
        let mut labels = BTreeMap::new();
        let mut variables = Vec::with_capacity(spec.variables.len());

        for (variable_index, variable) in spec.variables.iter().enumerate() {
            for (category_index, label) in variable.categories.iter().enumerate() {
                let reference = CategoryRef {
                    variable: variable_index,
                    category: category_index,
                };
                if let Some(previous) = labels.insert(label.clone(), reference) {
                    return Err(Error::DuplicateCategory {
                        label: label.clone(),
                        first: spec.variables[previous.variable].name.clone(),
                        second: variable.name.clone(),
                    });
                }
            }
            variables.push(VariableEntry {
                name: variable.name.clone(),
                categories: variable.categories.clone(),
            });
        }

        Ok(Self { variables, labels })
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_name(&self, index: usize) -> &str {
        &self.variables[index].name
    }

    pub fn category_count(&self, index: usize) -> usize {
        self.variables[index].categories.len()
    }

    /// All categories of one variable, in declaration order.
    pub fn categories_of(&self, index: usize) -> impl Iterator<Item = CategoryRef> + '_ {
        (0..self.category_count(index)).map(move |category| CategoryRef {
            variable: index,
            category,
        })
    }

    /// Every category of every variable, in declaration order.
    pub fn category_refs(&self) -> impl Iterator<Item = CategoryRef> + '_ {
        (0..self.variable_count()).flat_map(|variable| self.categories_of(variable))
    }

    pub fn label(&self, category: CategoryRef) -> &str {
        &self.variables[category.variable].categories[category.category]
    }

    pub fn resolve_label(&self, label: &str) -> Option<CategoryRef> {
        self.labels.get(label).copied()
    }

    /// Number of combination cells: the product of category counts.
    pub fn cell_count(&self) -> usize {
        self.variables
            .iter()
            .map(|variable| variable.categories.len())
            .product()
    }

    /// Enumerate every combination cell in lexicographic order of the
    /// category indices (odometer over the declared variable order).
    pub fn cells(&self) -> Vec<CellKey> {
        let radices: Vec<usize> = self
            .variables
            .iter()
            .map(|variable| variable.categories.len())
            .collect();
        if radices.is_empty() || radices.iter().any(|&radix| radix == 0) {
            return Vec::new();
        }

        let mut cells = Vec::with_capacity(self.cell_count());
        let mut current = vec![0usize; radices.len()];
        'enumerate: loop {
            cells.push(CellKey(current.clone()));
            for position in (0..radices.len()).rev() {
                current[position] += 1;
                if current[position] < radices[position] {
                    continue 'enumerate;
                }
                current[position] = 0;
            }
            break;
        }
        cells
    }

    /// Category labels of one cell, in variable order.
    pub fn cell_labels(&self, key: &CellKey) -> Vec<&str> {
        key.indices()
            .iter()
            .enumerate()
            .map(|(variable, &category)| self.variables[variable].categories[category].as_str())
            .collect()
    }
}
