//! Cross-variable category-pair derivation.
//!
//! A conditional probability is expressed against the count of cells where
//! two categories hold at once. One count variable is derived per unordered
//! pair of categories drawn from two distinct variables; pairs inside a
//! single variable are mutually exclusive by construction and carry no
//! information.

use std::collections::BTreeSet;

use crate::space::{Catalog, CategoryRef};

/// Unordered pair of categories from two distinct variables, stored sorted
/// so the same pair collapses to one key no matter how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CategoryPair {
    lo: CategoryRef,
    hi: CategoryRef,
}

impl CategoryPair {
    /// Build the sorted pair. Callers pass categories of two distinct
    /// variables; same-variable pairs are filtered out before this point.
    pub fn new(a: CategoryRef, b: CategoryRef) -> Self {
        debug_assert_ne!(a.variable, b.variable);
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(&self) -> CategoryRef {
        self.lo
    }

    pub fn hi(&self) -> CategoryRef {
        self.hi
    }
}

/// Derive the deduplicated set of cross-variable category pairs.
///
/// For every unordered pair of distinct variables: take the union of their
/// categories, generate all 2-combinations of that union, discard the
/// combinations whose elements belong to one variable, and collapse
/// duplicates across passes through the sorted-pair ordering of
/// [`CategoryPair`]. The result is bounded by C(total categories, 2) minus
/// the same-variable combinations.
pub fn derive_pairs(catalog: &Catalog) -> Vec<CategoryPair> {
    let mut seen: BTreeSet<CategoryPair> = BTreeSet::new();

    for first in 0..catalog.variable_count() {
        for second in (first + 1)..catalog.variable_count() {
            let union: Vec<CategoryRef> = catalog
                .categories_of(first)
                .chain(catalog.categories_of(second))
                .collect();
            for (position, &a) in union.iter().enumerate() {
                for &b in &union[position + 1..] {
                    if a.variable == b.variable {
                        continue;
                    }
                    seen.insert(CategoryPair::new(a, b));
                }
            }
        }
    }

    seen.into_iter().collect()
}
