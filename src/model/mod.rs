//! Linear programming model
//!
//! A [`Model`] owns its continuous decision variables, an optional linear
//! objective and an ordered list of linear constraints. It performs no solving
//! itself; see [`crate::solver`] for the engines that consume it.

pub mod error;
pub mod expr;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use error::ModelError;
pub use expr::{LinearExpr, VarId};

/// Continuous decision variable with bounds `[lower, upper]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

/// Relation between a constraint's left-hand side and its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Comparison {
    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessEqual,
    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterEqual,
    #[strum(to_string = "=", serialize = "==")]
    #[serde(rename = "=", alias = "==")]
    Equal,
}

impl Comparison {
    /// Whether `lhs` satisfies the relation against `rhs` within `tolerance`.
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Comparison::LessEqual => lhs <= rhs + tolerance,
            Comparison::GreaterEqual => lhs >= rhs - tolerance,
            Comparison::Equal => (lhs - rhs).abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub direction: Direction,
    pub expr: LinearExpr,
}

/// `expr <comparison> rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    objective: Option<Objective>,
    constraints: Vec<Constraint>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: None,
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Declare a continuous variable with the default bounds `[0, +inf)`.
    pub fn add_variable(&mut self, name: impl Into<String>) -> Result<VarId, ModelError> {
        self.add_bounded_variable(name, 0.0, f64::INFINITY)
    }

    pub fn add_bounded_variable(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
    ) -> Result<VarId, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName("variable"));
        }
        if self.variable_by_name(&name).is_some() {
            return Err(ModelError::DuplicateVariable(name));
        }
        check_bounds(&name, lower, upper)?;

        self.variables.push(Variable { name, lower, upper });
        Ok(VarId(self.variables.len() - 1))
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    pub fn variable_by_name(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .map(VarId)
    }

    pub fn set_objective(
        &mut self,
        direction: Direction,
        expr: impl Into<LinearExpr>,
    ) -> Result<(), ModelError> {
        let expr = expr.into();
        self.check_expr("objective", &expr)?;
        self.objective = Some(Objective { direction, expr });
        Ok(())
    }

    pub fn maximize(&mut self, expr: impl Into<LinearExpr>) -> Result<(), ModelError> {
        self.set_objective(Direction::Maximize, expr)
    }

    pub fn minimize(&mut self, expr: impl Into<LinearExpr>) -> Result<(), ModelError> {
        self.set_objective(Direction::Minimize, expr)
    }

    /// Append `expr <comparison> rhs` and return its position.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: impl Into<LinearExpr>,
        comparison: Comparison,
        rhs: f64,
    ) -> Result<usize, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName("constraint"));
        }
        let expr = expr.into();
        self.check_expr(&name, &expr)?;
        if !rhs.is_finite() {
            return Err(ModelError::NonFiniteCoefficient {
                context: format!("right-hand side of {name}"),
                value: rhs,
            });
        }

        self.constraints.push(Constraint {
            name,
            expr,
            comparison,
            rhs,
        });
        Ok(self.constraints.len() - 1)
    }

    /// Check every invariant a solver relies on.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.name.as_str()) {
                return Err(ModelError::DuplicateVariable(variable.name.clone()));
            }
            check_bounds(&variable.name, variable.lower, variable.upper)?;
        }

        let objective = self
            .objective
            .as_ref()
            .ok_or_else(|| ModelError::MissingObjective(self.name.clone()))?;
        self.check_expr("objective", &objective.expr)?;

        for constraint in &self.constraints {
            self.check_expr(&constraint.name, &constraint.expr)?;
            if !constraint.rhs.is_finite() {
                return Err(ModelError::NonFiniteCoefficient {
                    context: format!("right-hand side of {}", constraint.name),
                    value: constraint.rhs,
                });
            }
        }
        Ok(())
    }

    fn check_expr(&self, context: &str, expr: &LinearExpr) -> Result<(), ModelError> {
        if let Some((var, _)) = expr.terms().iter().find(|(v, _)| v.0 >= self.variables.len()) {
            return Err(ModelError::UnknownVariable(format!("#{} in {context}", var.0)));
        }
        if let Some(value) = expr.first_non_finite() {
            return Err(ModelError::NonFiniteCoefficient {
                context: context.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Render `expr` with this model's variable names.
    pub fn format_expr(&self, expr: &LinearExpr) -> String {
        let mut out = String::new();
        for (i, (var, coefficient)) in expr.terms().iter().enumerate() {
            let name = self
                .variable(*var)
                .map(|v| v.name.as_str())
                .unwrap_or("?");
            let magnitude = coefficient.abs();
            let sign = if *coefficient < 0.0 { "-" } else { "+" };
            match (i, sign) {
                (0, "+") => {}
                (0, _) => out.push('-'),
                _ => {
                    out.push(' ');
                    out.push_str(sign);
                    out.push(' ');
                }
            }
            if magnitude != 1.0 {
                out.push_str(&format!("{magnitude} "));
            }
            out.push_str(name);
        }

        let constant = expr.constant();
        if out.is_empty() {
            out.push_str(&format!("{constant}"));
        } else if constant > 0.0 {
            out.push_str(&format!(" + {constant}"));
        } else if constant < 0.0 {
            out.push_str(&format!(" - {}", constant.abs()));
        }
        out
    }
}

fn check_bounds(name: &str, lower: f64, upper: f64) -> Result<(), ModelError> {
    let invalid = lower.is_nan()
        || upper.is_nan()
        || lower > upper
        || lower == f64::INFINITY
        || upper == f64::NEG_INFINITY;
    if invalid {
        return Err(ModelError::InvalidBounds {
            name: name.to_string(),
            lower,
            upper,
        });
    }
    Ok(())
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\\ {}", self.name)?;
        match &self.objective {
            Some(objective) => writeln!(
                f,
                "{} {}",
                objective.direction,
                self.format_expr(&objective.expr)
            )?,
            None => writeln!(f, "(no objective)")?,
        }

        if !self.constraints.is_empty() {
            writeln!(f, "subject to")?;
            for c in &self.constraints {
                writeln!(
                    f,
                    "  {}: {} {} {}",
                    c.name,
                    self.format_expr(&c.expr),
                    c.comparison,
                    c.rhs
                )?;
            }
        }

        if !self.variables.is_empty() {
            writeln!(f, "bounds")?;
        }
        for v in &self.variables {
            match (v.lower.is_finite(), v.upper.is_finite()) {
                (true, true) => writeln!(f, "  {} <= {} <= {}", v.lower, v.name, v.upper)?,
                (true, false) => writeln!(f, "  {} >= {}", v.name, v.lower)?,
                (false, true) => writeln!(f, "  {} <= {}", v.name, v.upper)?,
                (false, false) => writeln!(f, "  {} free", v.name)?,
            }
        }
        Ok(())
    }
}
