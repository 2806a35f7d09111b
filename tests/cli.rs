//! Exit codes of the `profit-lp` binary for configured problems.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use rstest::rstest;
use uuid::Uuid;

const INFEASIBLE: &str = r#"
[problem]
name = "contradiction"
variables = [{ name = "x" }]
objective = { x = 1.0 }

[[problem.constraints]]
name = "low"
terms = { x = 1.0 }
comparison = "<="
rhs = 1.0

[[problem.constraints]]
name = "high"
terms = { x = 1.0 }
comparison = ">="
rhs = 3.0
"#;

const UNKNOWN_VARIABLE: &str = r#"
[problem]
name = "typo"
variables = [{ name = "x" }]
objective = { x = 1.0 }

[[problem.constraints]]
name = "c1"
terms = { z = 1.0 }
comparison = "<="
rhs = 1.0
"#;

const BUILT_IN: &str = r#"
[output]
format = "json"
"#;

/// Run the binary against `config` written to a fresh directory.
fn run_with_config(config: &str) -> Output {
    let dir: PathBuf = std::env::temp_dir().join(format!("profit-lp-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problem.toml");
    fs::write(&path, config).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_profit-lp"));
    command.arg(&path).current_dir(&dir).env_remove("RUST_LOG");
    for (key, _) in std::env::vars().filter(|(k, _)| k.starts_with("PROFIT_LP__")) {
        command.env_remove(key);
    }
    let output = command.output().unwrap();

    fs::remove_dir_all(&dir).ok();
    output
}

#[rstest]
#[case::optimal(BUILT_IN, 0)]
#[case::infeasible(INFEASIBLE, 2)]
#[case::bad_config(UNKNOWN_VARIABLE, 1)]
fn test_exit_code(#[case] config: &str, #[case] expected: i32) {
    let output = run_with_config(config);
    assert_eq!(
        output.status.code(),
        Some(expected),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_infeasible_report_has_no_objective() {
    let output = run_with_config(INFEASIBLE);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Status:    infeasible"), "{stdout}");
    assert!(!stdout.contains("Objective:"), "{stdout}");
}

#[test]
fn test_json_report_for_built_in_model() {
    let output = run_with_config(BUILT_IN);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["model"], "profit_maximization");
    assert_eq!(report["status"], "optimal");
    assert!((report["objective"].as_f64().unwrap() - 27.0).abs() < 1e-6);
}
