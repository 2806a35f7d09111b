//! Profit maximization as a linear program.
//!
//! Build a [`model::Model`], hand it to an [`solver::LpSolver`] and read back
//! a [`solver::Solution`]. The simplex itself lives in the external engine.

pub mod config;
pub mod model;
pub mod problems;
pub mod report;
pub mod solver;
pub mod telemetry;
