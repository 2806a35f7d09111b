use std::fmt;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use uuid::Uuid;

use crate::config::OutputFormat;
use crate::solver::{ConstraintActivity, Solution, SolveStatus};

#[derive(Debug, Clone, Serialize)]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
}

/// Everything printed after a solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub run_id: Uuid,
    pub solved_at: DateTime<Utc>,
    pub model: String,
    pub solver: String,
    pub elapsed_ms: f64,
    pub status: SolveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    pub variables: Vec<VariableValue>,
    pub constraints: Vec<ConstraintActivity>,
}

impl SolveReport {
    /// Timing comes from `solution.elapsed`, measured by the engine.
    pub fn new(model: &str, solver: &str, solution: Solution) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            solved_at: Utc::now(),
            model: model.to_string(),
            solver: solver.to_string(),
            elapsed_ms: solution.elapsed.as_micros() as f64 / 1000.0,
            status: solution.status,
            objective: solution.objective_value,
            variables: solution
                .values
                .into_iter()
                .map(|(name, value)| VariableValue { name, value })
                .collect(),
            constraints: solution.constraints,
        }
    }

    pub fn render(&self, format: OutputFormat, precision: usize) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(self.to_text(precision)),
        }
    }

    pub fn to_text(&self, precision: usize) -> String {
        TextReport {
            report: self,
            precision,
        }
        .to_string()
    }
}

/// Fixed-width table view of a [`SolveReport`]
pub struct TextReport<'a> {
    report: &'a SolveReport,
    precision: usize,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let precision = self.precision;

        writeln!(f, "Model:     {}", report.model)?;
        writeln!(f, "Solver:    {}", report.solver)?;
        writeln!(f, "Status:    {}", report.status)?;
        if let Some(objective) = report.objective {
            writeln!(f, "Objective: {objective:.precision$}")?;
        }
        if report.variables.is_empty() {
            return Ok(());
        }

        let width = report
            .variables
            .iter()
            .map(|v| v.name.len())
            .chain(report.constraints.iter().map(|c| c.name.len()))
            .chain(["Constraint".len()])
            .max()
            .unwrap_or(0);

        writeln!(f)?;
        writeln!(f, "{:<width$}  {:>12}", "Variable", "Value")?;
        for v in &report.variables {
            writeln!(f, "{:<width$}  {:>12.precision$}", v.name, v.value)?;
        }

        if report.constraints.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            [
                format!("{:<width$}", "Constraint"),
                format!("{:>12}", "Activity"),
                format!("{:>2}", ""),
                format!("{:>12}", "Bound"),
                format!("{:>12}", "Slack"),
                "Binding".to_string(),
            ]
            .iter()
            .join("  ")
        )?;
        for c in &report.constraints {
            writeln!(
                f,
                "{:<width$}  {:>12.precision$}  {:>2}  {:>12.precision$}  {:>12.precision$}  {}",
                c.name,
                c.lhs,
                c.comparison.to_string(),
                c.rhs,
                c.slack,
                if c.binding { "yes" } else { "no" },
            )?;
        }
        Ok(())
    }
}
