use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::model::{Comparison, Direction, LinearExpr, Model, ModelError};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "PROFIT_LP__";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Replaces the built-in profit maximization model when present
    #[serde(default)]
    pub problem: Option<ProblemConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    4
}

/// Problem definition read from configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProblemConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    #[validate(length(min = 1), nested)]
    pub variables: Vec<VariableConfig>,
    /// Coefficient per variable name
    #[validate(length(min = 1))]
    pub objective: BTreeMap<String, f64>,
    #[serde(default)]
    #[validate(nested)]
    pub constraints: Vec<ConstraintConfig>,
}

fn default_direction() -> Direction {
    Direction::Maximize
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VariableConfig {
    #[validate(length(min = 1))]
    pub name: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConstraintConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub terms: BTreeMap<String, f64>,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl ProblemConfig {
    /// Build the model, declaring variables in file order.
    pub fn to_model(&self) -> Result<Model, ModelError> {
        let mut model = Model::new(self.name.clone());
        for v in &self.variables {
            model.add_bounded_variable(
                v.name.clone(),
                v.lower.unwrap_or(0.0),
                v.upper.unwrap_or(f64::INFINITY),
            )?;
        }

        let objective = expr_from_terms(&model, &self.objective, "objective")?;
        model.set_objective(self.direction, objective)?;

        for c in &self.constraints {
            let expr = expr_from_terms(&model, &c.terms, &c.name)?;
            model.add_constraint(c.name.clone(), expr, c.comparison, c.rhs)?;
        }
        Ok(model)
    }
}

/// Terms follow the model's variable order, not the map's key order.
fn expr_from_terms(
    model: &Model,
    terms: &BTreeMap<String, f64>,
    context: &str,
) -> Result<LinearExpr, ModelError> {
    if let Some(unknown) = terms.keys().find(|name| model.variable_by_name(name).is_none()) {
        return Err(ModelError::UnknownVariable(format!("{unknown} in {context}")));
    }
    Ok(model
        .variables()
        .iter()
        .filter_map(|v| {
            let id = model.variable_by_name(&v.name)?;
            terms.get(&v.name).map(|c| (id, *c))
        })
        .collect())
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
            .with_context(|| format!("loading configuration from {}", path.as_ref().display()))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        if let Some(problem) = &cfg.problem {
            problem.validate()?;
        }
        Ok(cfg)
    }

    /// Model from the `[problem]` section, or the built-in instance.
    pub fn model(&self) -> Result<Model> {
        match &self.problem {
            Some(problem) => problem
                .to_model()
                .with_context(|| format!("building model '{}'", problem.name)),
            None => Ok(crate::problems::profit_maximization()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> Result<Config> {
        Config::from_figment(Figment::from(Toml::string(text)))
    }

    #[test]
    fn test_defaults_without_sections() {
        let cfg = from_toml("").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert_eq!(cfg.logging.filter, "info");
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert_eq!(cfg.output.precision, 4);
        assert!(cfg.problem.is_none());
        assert_eq!(cfg.model().unwrap().name(), "profit_maximization");
    }

    #[test]
    fn test_problem_section_builds_model() {
        let cfg = from_toml(
            r#"
            [output]
            format = "json"

            [problem]
            name = "bakery"
            direction = "maximize"
            variables = [{ name = "y" }, { name = "x", upper = 4.0 }]
            objective = { x = 6.0, y = 5.0 }

            [[problem.constraints]]
            name = "labour"
            terms = { x = 1.0, y = 1.0 }
            comparison = "<="
            rhs = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.output.format, OutputFormat::Json);
        let model = cfg.model().unwrap();
        assert_eq!(model.name(), "bakery");
        assert_eq!(model.variables()[1].upper, 4.0);
        assert_eq!(model.variables()[0].lower, 0.0);
        // declaration order, y first
        let objective = &model.objective().unwrap().expr;
        assert_eq!(model.format_expr(objective), "5 y + 6 x");
        assert_eq!(model.constraints()[0].comparison, Comparison::LessEqual);
    }

    #[test]
    fn test_unknown_variable_in_constraint() {
        let cfg = from_toml(
            r#"
            [problem]
            name = "broken"
            variables = [{ name = "x" }]
            objective = { x = 1.0 }

            [[problem.constraints]]
            name = "c"
            terms = { z = 1.0 }
            comparison = ">="
            rhs = 1.0
            "#,
        )
        .unwrap();

        let problem = cfg.problem.as_ref().unwrap();
        assert_eq!(
            problem.to_model(),
            Err(ModelError::UnknownVariable("z in c".to_string()))
        );
        assert!(cfg.model().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_variables() {
        let result = from_toml(
            r#"
            [problem]
            name = "empty"
            variables = []
            objective = { x = 1.0 }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_constraint_without_terms() {
        let result = from_toml(
            r#"
            [problem]
            name = "p"
            variables = [{ name = "x" }]
            objective = { x = 1.0 }

            [[problem.constraints]]
            name = "c1"
            terms = {}
            comparison = "<="
            rhs = 1.0
            "#,
        );
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("terms"), "{message}");
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "profit.toml",
                r#"
                [output]
                format = "text"
                precision = 2
                "#,
            )?;
            jail.set_env("PROFIT_LP__OUTPUT__FORMAT", "json");

            let cfg = Config::load_from("profit.toml").map_err(|e| e.to_string())?;
            assert_eq!(cfg.output.format, OutputFormat::Json);
            assert_eq!(cfg.output.precision, 2);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_output_format() {
        assert!(from_toml("[output]\nformat = \"yaml\"").is_err());
    }
}
