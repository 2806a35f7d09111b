use std::time::Instant;

use good_lp::solvers::ObjectiveDirection;
use good_lp::Solution as _;
use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, SolverModel};
use tracing::{debug, info, warn};

use super::solution::{clean, ConstraintActivity, Solution, SolveStatus};
use super::{LpSolver, SolveError};
use crate::model::{Comparison, Direction, LinearExpr, Model, ModelError, VarId};

/// LP engine backed by `good_lp` with the pure-Rust `microlp` simplex
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, handles: &[good_lp::Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    for (var, coefficient) in expr.terms() {
        out.add_mul(*coefficient, handles[var.index()]);
    }
    out + expr.constant()
}

impl LpSolver for GoodLpSolver {
    fn name(&self) -> &'static str {
        good_lp::solver_name(good_lp::microlp)
    }

    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        model.validate()?;
        let objective = model
            .objective()
            .ok_or_else(|| ModelError::MissingObjective(model.name().to_string()))?;

        info!(
            model = model.name(),
            solver = self.name(),
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            "solving model"
        );
        debug!(problem = %model, "problem definition");
        let started = Instant::now();

        let mut problem = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = model
            .variables()
            .iter()
            .map(|v| {
                let mut definition = variable().name(v.name.as_str());
                if v.lower.is_finite() {
                    definition = definition.min(v.lower);
                }
                if v.upper.is_finite() {
                    definition = definition.max(v.upper);
                }
                problem.add(definition)
            })
            .collect();

        let direction = match objective.direction {
            Direction::Maximize => ObjectiveDirection::Maximisation,
            Direction::Minimize => ObjectiveDirection::Minimisation,
        };
        let mut lp = problem
            .optimise(direction, to_expression(&objective.expr, &handles))
            .using(good_lp::microlp);

        for c in model.constraints() {
            let lhs = to_expression(&c.expr, &handles);
            let translated = match c.comparison {
                Comparison::LessEqual => constraint::leq(lhs, c.rhs),
                Comparison::GreaterEqual => constraint::geq(lhs, c.rhs),
                Comparison::Equal => constraint::eq(lhs, c.rhs),
            };
            lp.add_constraint(translated.set_name(c.name.clone()));
        }

        let outcome = lp.solve();
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

        match outcome {
            Ok(raw) => {
                let assignment: Vec<f64> = handles.iter().map(|h| clean(raw.value(*h))).collect();
                let value_of = |var: VarId| assignment[var.index()];

                let objective_value = objective.expr.evaluate(value_of);
                let values = model
                    .variables()
                    .iter()
                    .zip(&assignment)
                    .map(|(v, x)| (v.name.clone(), *x))
                    .collect();
                let constraints = model
                    .constraints()
                    .iter()
                    .map(|c| {
                        ConstraintActivity::new(
                            c.name.clone(),
                            c.expr.evaluate(value_of),
                            c.comparison,
                            c.rhs,
                        )
                    })
                    .collect();

                info!(
                    model = model.name(),
                    objective = objective_value,
                    elapsed_ms,
                    "optimal solution found"
                );
                Ok(Solution::optimal(objective_value, values, constraints).with_elapsed(elapsed))
            }
            Err(ResolutionError::Infeasible) => {
                warn!(model = model.name(), elapsed_ms, "model is infeasible");
                Ok(Solution::without_optimum(SolveStatus::Infeasible).with_elapsed(elapsed))
            }
            Err(ResolutionError::Unbounded) => {
                warn!(model = model.name(), elapsed_ms, "model is unbounded");
                Ok(Solution::without_optimum(SolveStatus::Unbounded).with_elapsed(elapsed))
            }
            Err(other) => Err(SolveError::Backend {
                solver: self.name(),
                message: other.to_string(),
            }),
        }
    }
}
