use std::process::ExitCode;

use anyhow::{Context, Result};
use profit_lp::config::{Config, OutputFormat};
use profit_lp::report::SolveReport;
use profit_lp::solver::{GoodLpSolver, LpSolver};
use profit_lp::telemetry::init_tracing;
use tracing::{info, warn};

/// Exit code for a model without an optimal solution
const NO_OPTIMUM: u8 = 2;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(&cfg.logging);

    let model = cfg.model()?;
    info!(
        model = model.name(),
        variables = model.variables().len(),
        constraints = model.constraints().len(),
        "model built"
    );
    if cfg.output.format == OutputFormat::Text {
        println!("{model}");
    }

    let solver = GoodLpSolver::new();
    let solution = solver
        .solve(&model)
        .with_context(|| format!("solving model '{}'", model.name()))?;
    let optimal = solution.is_optimal();

    let report = SolveReport::new(model.name(), solver.name(), solution);
    println!(
        "{}",
        report
            .render(cfg.output.format, cfg.output.precision)
            .context("rendering report")?
    );

    if !optimal {
        warn!(model = model.name(), status = %report.status, "no optimal solution");
        return Ok(ExitCode::from(NO_OPTIMUM));
    }
    Ok(ExitCode::SUCCESS)
}
