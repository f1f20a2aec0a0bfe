use std::fs;

use synthtab_core::{CategoricalVariable, ProbabilityDeclaration, TableSpec};
use synthtab_model::{AssembledModel, CategoryRef, ModelBuilder};
use synthtab_solve::{SolveEngine, SolveError, SolveStatus, SolvedTable};
use synthtab_solve::output::csv::write_cells_csv;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// The probability tree from the reference data: gender is the absolute
/// root, colour and degree hang off it. The optional degree->colour block
/// conflicts with the gender chain (it forces colour-t to 26 while the
/// gender chain forces 44), so it turns the model infeasible.
fn reference_spec(with_degree_colour: bool) -> TableSpec {
    let mut declarations = vec![
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
    ];
    if with_degree_colour {
        declarations.extend([
            ProbabilityDeclaration::conditional("t", "e", 0.6),
            ProbabilityDeclaration::conditional("p", "e", 0.4),
            ProbabilityDeclaration::conditional("t", "a", 0.1),
            ProbabilityDeclaration::conditional("p", "a", 0.9),
        ]);
    }

    TableSpec::new(
        vec![
            CategoricalVariable::new("gender", &["m", "f"]),
            CategoricalVariable::new("colour", &["t", "p"]),
            CategoricalVariable::new("degree", &["e", "a"]),
        ],
        100.0,
        declarations,
    )
}

fn count_with(model: &AssembledModel, table: &SolvedTable, label: &str) -> f64 {
    let category = model.catalog.resolve_label(label).expect("resolve label");
    count_with_ref(table, category)
}

fn count_with_ref(table: &SolvedTable, category: CategoryRef) -> f64 {
    table
        .cells
        .iter()
        .filter(|(key, _)| key.contains(category))
        .map(|(_, value)| value)
        .sum()
}

fn count_with_both(model: &AssembledModel, table: &SolvedTable, a: &str, b: &str) -> f64 {
    let a = model.catalog.resolve_label(a).expect("resolve label");
    let b = model.catalog.resolve_label(b).expect("resolve label");
    table
        .cells
        .iter()
        .filter(|(key, _)| key.contains(a) && key.contains(b))
        .map(|(_, value)| value)
        .sum()
}

#[test]
fn solves_the_reference_probability_tree() {
    init_tracing();
    let spec = reference_spec(false);
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");
    let result = SolveEngine::default().run(&model).expect("solve model");

    assert_eq!(result.report.status, SolveStatus::Solved);
    assert!(!result.report.run_id.is_empty());

    let table = &result.table;
    assert!((table.total - 100.0).abs() < 1e-6);

    let cell_sum: f64 = table.cells.values().sum();
    assert!((cell_sum - 100.0).abs() < 1e-6);
    for (key, value) in &table.cells {
        assert!(*value >= 0.0, "negative cell {key:?}: {value}");
    }

    assert!((count_with(&model, table, "m") - 40.0).abs() < 1e-6);
    assert!((count_with(&model, table, "f") - 60.0).abs() < 1e-6);

    // Every declared conditional holds exactly, recomputed from the cells.
    for (target, condition, probability) in [
        ("t", "m", 0.5),
        ("p", "m", 0.5),
        ("e", "m", 0.2),
        ("a", "m", 0.8),
        ("t", "f", 0.4),
        ("p", "f", 0.6),
        ("e", "f", 0.4),
        ("a", "f", 0.6),
    ] {
        let realized =
            count_with_both(&model, table, target, condition) / count_with(&model, table, condition);
        assert!(
            (realized - probability).abs() < 1e-6,
            "P({target} | {condition}) realized {realized}, declared {probability}"
        );
    }
}

#[test]
fn fully_determined_model_solves_to_exact_cells() {
    let spec = TableSpec::new(
        vec![
            CategoricalVariable::new("gender", &["m", "f"]),
            CategoricalVariable::new("colour", &["t", "p"]),
        ],
        100.0,
        vec![
            ProbabilityDeclaration::absolute("gender", "m", 0.4),
            ProbabilityDeclaration::absolute("gender", "f", 0.6),
            ProbabilityDeclaration::conditional("t", "m", 0.5),
            ProbabilityDeclaration::conditional("p", "m", 0.5),
            ProbabilityDeclaration::conditional("t", "f", 0.25),
            ProbabilityDeclaration::conditional("p", "f", 0.75),
        ],
    );
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");
    let result = SolveEngine::default().run(&model).expect("solve model");

    let expected = [
        (vec!["m", "t"], 20.0),
        (vec!["m", "p"], 20.0),
        (vec!["f", "t"], 15.0),
        (vec!["f", "p"], 45.0),
    ];
    for (labels, count) in expected {
        let (_, value) = result
            .table
            .rows(&model)
            .into_iter()
            .find(|(row, _)| *row == labels)
            .expect("cell row");
        assert!(
            (value - count).abs() < 1e-6,
            "cell {labels:?} solved to {value}, expected {count}"
        );
    }
}

#[test]
fn reports_infeasible_when_absolute_block_oversubscribes() {
    let mut spec = reference_spec(false);
    spec.declarations[0] = ProbabilityDeclaration::absolute("gender", "m", 0.7);
    // m + f now claim 130% of the sample.
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");
    let err = SolveEngine::default()
        .run(&model)
        .expect_err("expected infeasible model");
    assert!(matches!(err, SolveError::Infeasible));
    assert_eq!(err.status(), SolveStatus::Infeasible);
}

#[test]
fn reports_infeasible_on_conflicting_conditional_chains() {
    let spec = reference_spec(true);
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");
    let result = SolveEngine::default().run(&model);
    assert!(matches!(result, Err(SolveError::Infeasible)));
}

#[test]
fn exports_solved_cells_as_csv() {
    let spec = TableSpec::new(
        vec![
            CategoricalVariable::new("gender", &["m", "f"]),
            CategoricalVariable::new("colour", &["t", "p"]),
        ],
        100.0,
        vec![
            ProbabilityDeclaration::absolute("gender", "m", 0.4),
            ProbabilityDeclaration::absolute("gender", "f", 0.6),
            ProbabilityDeclaration::conditional("t", "m", 0.5),
            ProbabilityDeclaration::conditional("p", "m", 0.5),
            ProbabilityDeclaration::conditional("t", "f", 0.25),
            ProbabilityDeclaration::conditional("p", "f", 0.75),
        ],
    );
    let model = ModelBuilder::new(&spec).assemble().expect("assemble model");
    let result = SolveEngine::default().run(&model).expect("solve model");

    let out_dir = std::env::temp_dir().join(format!("synthtab_csv_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&out_dir).expect("create temp out dir");
    let path = out_dir.join("cells.csv");

    let rows = write_cells_csv(&path, &model, &result.table).expect("write csv");
    assert_eq!(rows, 4);

    let contents = fs::read_to_string(&path).expect("read csv");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "gender,colour,count");
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"m,t,20"));
    assert!(lines.contains(&"f,p,45"));
}
