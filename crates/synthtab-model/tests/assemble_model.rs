use synthtab_core::{CategoricalVariable, Error, ProbabilityDeclaration, TableSpec};
use synthtab_model::{DeclarationKind, ModelBuilder, Sense, VarKind};

fn reference_spec() -> TableSpec {
    TableSpec::new(
        vec![
            CategoricalVariable::new("gender", &["m", "f"]),
            CategoricalVariable::new("colour", &["t", "p"]),
            CategoricalVariable::new("degree", &["e", "a"]),
        ],
        100.0,
        vec![
            ProbabilityDeclaration::absolute("gender", "m", 0.4),
            ProbabilityDeclaration::absolute("gender", "f", 0.6),
            ProbabilityDeclaration::conditional("t", "m", 0.5),
            ProbabilityDeclaration::conditional("p", "m", 0.5),
            ProbabilityDeclaration::conditional("e", "m", 0.2),
            ProbabilityDeclaration::conditional("a", "m", 0.8),
            ProbabilityDeclaration::conditional("t", "f", 0.4),
            ProbabilityDeclaration::conditional("p", "f", 0.6),
            ProbabilityDeclaration::conditional("e", "f", 0.4),
            ProbabilityDeclaration::conditional("a", "f", 0.6),
        ],
    )
}

#[test]
fn assembles_reference_model_dimensions() {
    let spec = reference_spec();
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");

    assert_eq!(model.cells.len(), 8);
    assert_eq!(model.categories.len(), 6);
    assert_eq!(model.pairs.len(), 12);
    // cells + per-category counts + pair counts + the total.
    assert_eq!(model.registry.len(), 8 + 6 + 12 + 1);
    // total tie, sample-size pin, per-category and per-pair sums, plus one
    // equality per declaration.
    assert_eq!(model.equalities.len(), 2 + 6 + 12 + 10);
    assert_eq!(model.declarations.len(), 10);
    assert!(model.warnings.is_empty());
    assert_eq!(model.sample_size, 100.0);
    assert_eq!(model.objective.sense, Sense::Maximize);
    assert!(matches!(
        model.registry.get(model.total).kind,
        VarKind::Total
    ));
}

#[test]
fn category_counts_cover_matching_cells() {
    let spec = reference_spec();
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");

    let m = model.catalog.resolve_label("m").expect("resolve m");
    let equality = model
        .equalities
        .iter()
        .find(|eq| eq.label == "count(gender=m) = sum(matching cells)")
        .expect("category equality");

    // gender=m pins one of three variables, leaving 2 x 2 free cells.
    assert_eq!(equality.rhs.terms().len(), 4);
    for (cell, _) in equality.rhs.terms() {
        match &model.registry.get(*cell).kind {
            VarKind::Cell(key) => assert!(key.contains(m)),
            other => panic!("expected cell variable, got {other:?}"),
        }
    }
}

#[test]
fn conditional_declarations_scale_the_conditioning_count() {
    let spec = reference_spec();
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");

    let m = model.catalog.resolve_label("m").expect("resolve m");
    let equality = model
        .equalities
        .iter()
        .find(|eq| eq.label == "P(t | m) = 0.5")
        .expect("conditional equality");

    assert_eq!(equality.lhs.terms().len(), 1);
    let (pair_var, coefficient) = equality.lhs.terms()[0];
    assert_eq!(coefficient, 1.0);
    assert!(matches!(
        model.registry.get(pair_var).kind,
        VarKind::Pair(_)
    ));

    assert_eq!(equality.rhs.terms().len(), 1);
    let (condition_var, probability) = equality.rhs.terms()[0];
    assert_eq!(probability, 0.5);
    assert_eq!(condition_var, model.categories[&m]);

    let resolved = model
        .declarations
        .iter()
        .find(|decl| decl.label == "P(t | m) = 0.5")
        .expect("resolved declaration");
    assert_eq!(resolved.kind, DeclarationKind::Conditional);
    assert_eq!(resolved.condition, Some(m));
}

#[test]
fn sample_size_is_pinned_as_a_constant() {
    let spec = reference_spec();
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");

    let equality = model
        .equalities
        .iter()
        .find(|eq| eq.label == "n = 100")
        .expect("sample-size equality");
    assert!(equality.rhs.terms().is_empty());
    assert_eq!(equality.rhs.offset(), 100.0);
}

#[test]
fn assembly_rejects_declarations_against_unknown_categories() {
    let mut spec = reference_spec();
    spec.declarations
        .push(ProbabilityDeclaration::conditional("t", "z", 0.5));
    let result = ModelBuilder::new(&spec).assemble();
    assert!(matches!(
        result,
        Err(Error::UnknownCategory { category, .. }) if category == "z"
    ));
}

#[test]
fn assembly_rejects_same_variable_conditionals() {
    let mut spec = reference_spec();
    spec.declarations
        .push(ProbabilityDeclaration::conditional("t", "p", 0.5));
    let result = ModelBuilder::new(&spec).assemble();
    assert!(matches!(
        result,
        Err(Error::SameVariableCondition { variable, .. }) if variable == "colour"
    ));
}
