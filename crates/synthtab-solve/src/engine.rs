use std::time::Instant;

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, default_solver,
    variable,
};
use tracing::info;

use synthtab_model::{AssembledModel, LinearExpr, Sense};

use crate::errors::SolveError;
use crate::model::{SolveOptions, SolveReport, SolveResult, SolveStatus, SolvedTable};

/// Single-shot LP solve over an assembled model.
///
/// The solver is an opaque collaborator: the engine lowers the neutral
/// equality system into `good_lp`, blocks on one solve call, and reads a
/// value back for every decision variable. No retries; an infeasible system
/// stays infeasible until the declarations change.
#[derive(Debug, Clone, Default)]
pub struct SolveEngine {
    options: SolveOptions,
}

impl SolveEngine {
    pub fn new(options: SolveOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, model: &AssembledModel) -> Result<SolveResult, SolveError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            variables = model.registry.len(),
            equalities = model.equalities.len(),
            "solve started"
        );

        let mut problem = ProblemVariables::new();
        let mut handles: Vec<Variable> = Vec::with_capacity(model.registry.len());
        for decision in model.registry.iter() {
            handles.push(problem.add(variable().min(0.0).name(decision.name.clone())));
        }

        let objective = lower(&model.objective.expr, &handles);
        let unsolved = match model.objective.sense {
            Sense::Maximize => problem.maximise(objective),
            Sense::Minimize => problem.minimise(objective),
        };

        let mut lp = unsolved.using(default_solver);
        for equality in &model.equalities {
            lp = lp.with(lower(&equality.lhs, &handles).eq(lower(&equality.rhs, &handles)));
        }

        let solution = match lp.solve() {
            Ok(solution) => solution,
            Err(err) => {
                let err = map_resolution(err);
                info!(
                    run_id = %run_id,
                    status = ?err.status(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "solve finished"
                );
                return Err(err);
            }
        };

        let read = |variable: Variable| -> f64 {
            let raw = solution.value(variable);
            if raw < 0.0 && raw >= -self.options.clamp_epsilon {
                0.0
            } else {
                raw
            }
        };

        let table = SolvedTable {
            total: read(handles[model.total.index()]),
            cells: model
                .cells
                .iter()
                .map(|(key, id)| (key.clone(), read(handles[id.index()])))
                .collect(),
            categories: model
                .categories
                .iter()
                .map(|(&category, id)| (category, read(handles[id.index()])))
                .collect(),
            pairs: model
                .pairs
                .iter()
                .map(|(&pair, id)| (pair, read(handles[id.index()])))
                .collect(),
        };

        let report = SolveReport {
            run_id: run_id.clone(),
            status: SolveStatus::Solved,
            variables: model.registry.len() as u64,
            equalities: model.equalities.len() as u64,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            run_id = %run_id,
            total = table.total,
            duration_ms = report.duration_ms,
            "solve finished"
        );

        Ok(SolveResult { report, table })
    }
}

fn lower(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut lowered = Expression::default();
    for (id, coefficient) in expr.terms() {
        lowered += *coefficient * handles[id.index()];
    }
    lowered += expr.offset();
    lowered
}

fn map_resolution(err: ResolutionError) -> SolveError {
    match err {
        ResolutionError::Infeasible => SolveError::Infeasible,
        ResolutionError::Unbounded => SolveError::Unbounded,
        other => SolveError::Solver(other.to_string()),
    }
}
