use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::model::Comparison;

/// Values closer to zero than this are reported as exactly zero
pub const ZERO_TOLERANCE: f64 = 1e-9;

/// Slack at or below this marks a constraint as binding
pub const BINDING_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

/// Left-hand side of a constraint evaluated at the solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintActivity {
    pub name: String,
    pub lhs: f64,
    pub comparison: Comparison,
    pub rhs: f64,
    /// Distance to the bound, non-negative when satisfied (`rhs - lhs` for `<=` and `=`)
    pub slack: f64,
    pub binding: bool,
}

impl ConstraintActivity {
    pub fn new(name: impl Into<String>, lhs: f64, comparison: Comparison, rhs: f64) -> Self {
        let slack = clean(match comparison {
            Comparison::GreaterEqual => lhs - rhs,
            Comparison::LessEqual | Comparison::Equal => rhs - lhs,
        });
        Self {
            name: name.into(),
            lhs: clean(lhs),
            comparison,
            rhs,
            slack,
            binding: slack.abs() <= BINDING_TOLERANCE,
        }
    }
}

/// Outcome of a solve call
///
/// Infeasible and unbounded models are reported through `status`; only an
/// optimal solution carries an objective value and assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub values: Vec<(String, f64)>,
    pub constraints: Vec<ConstraintActivity>,
    /// Wall time spent inside the engine
    pub elapsed: Duration,
}

impl Solution {
    pub fn optimal(
        objective_value: f64,
        values: Vec<(String, f64)>,
        constraints: Vec<ConstraintActivity>,
    ) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value: Some(clean(objective_value)),
            values,
            constraints,
            elapsed: Duration::ZERO,
        }
    }

    pub fn without_optimum(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            constraints: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Value assigned to the variable called `name`
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn binding_constraints(&self) -> impl Iterator<Item = &ConstraintActivity> {
        self.constraints.iter().filter(|c| c.binding)
    }
}

/// Snap negative zero and floating-point noise around zero to `0.0`.
pub fn clean(value: f64) -> f64 {
    if value.abs() < ZERO_TOLERANCE {
        0.0
    } else {
        value
    }
}
