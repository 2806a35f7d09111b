use thiserror::Error;

/// Errors raised while building or validating a [`super::Model`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Empty name for {0}")]
    EmptyName(&'static str),

    #[error("Variable '{0}' is already declared")]
    DuplicateVariable(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Non-finite value in {context}: {value}")]
    NonFiniteCoefficient { context: String, value: f64 },

    #[error("Invalid bounds for '{name}': [{lower}, {upper}]")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    #[error("Model '{0}' has no objective")]
    MissingObjective(String),
}
