//! Solver front-end
//!
//! The crate never pivots a tableau itself: an [`LpSolver`] hands the model to
//! an external engine and reads back a [`Solution`]. [`GoodLpSolver`] is the
//! engine shipped by default.

pub mod backend;
pub mod solution;

use thiserror::Error;

use crate::model::{Model, ModelError};

pub use backend::GoodLpSolver;
pub use solution::{ConstraintActivity, Solution, SolveStatus};

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Invalid model: {0}")]
    InvalidModel(#[from] ModelError),

    #[error("{solver} failed: {message}")]
    Backend {
        solver: &'static str,
        message: String,
    },
}

/// Blocking LP engine.
///
/// Implementations must return `Ok` with a non-optimal status for infeasible
/// or unbounded models and reserve `Err` for invalid input or engine failures.
pub trait LpSolver {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &Model) -> Result<Solution, SolveError>;
}
