//! End-to-end solve of the profit maximization instance and its variations.

use profit_lp::model::{Comparison, Model};
use profit_lp::problems::profit_maximization;
use profit_lp::solver::{GoodLpSolver, LpSolver, SolveStatus};
use proptest::prelude::*;
use rstest::rstest;

const TOLERANCE: f64 = 1e-6;

fn profit(x: f64, y: f64) -> f64 {
    6.0 * x + 5.0 * y
}

/// Same objective with resource limits `x + y <= labour` and `3x + 2y <= material`
fn with_limits(labour: f64, material: f64) -> Model {
    let mut model = Model::new("profit_with_limits");
    let x = model.add_variable("x").unwrap();
    let y = model.add_variable("y").unwrap();
    model.maximize(6.0 * x + 5.0 * y).unwrap();
    model
        .add_constraint("labour", x + y, Comparison::LessEqual, labour)
        .unwrap();
    model
        .add_constraint("material", 3.0 * x + 2.0 * y, Comparison::LessEqual, material)
        .unwrap();
    model
}

/// Corner points of `{x + y <= a, 3x + 2y <= b, x >= 0, y >= 0}`
fn vertices(a: f64, b: f64) -> Vec<(f64, f64)> {
    let mut points = vec![(0.0, 0.0), (a.min(b / 3.0), 0.0), (0.0, a.min(b / 2.0))];
    let (x, y) = (b - 2.0 * a, 3.0 * a - b);
    if x >= 0.0 && y >= 0.0 {
        points.push((x, y));
    }
    points
}

#[test]
fn test_reference_optimum() {
    let solution = GoodLpSolver::new().solve(&profit_maximization()).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    let x = solution.value("x").unwrap();
    let y = solution.value("y").unwrap();
    assert!((x - 2.0).abs() < TOLERANCE, "x = {x}");
    assert!((y - 3.0).abs() < TOLERANCE, "y = {y}");
    assert!((solution.objective_value.unwrap() - 27.0).abs() < TOLERANCE);

    let binding: Vec<_> = solution.binding_constraints().map(|c| c.name.as_str()).collect();
    assert_eq!(binding, ["c1", "c2"]);
}

#[rstest]
#[case((0.0, 0.0), 0.0)]
#[case((4.0, 0.0), 24.0)]
#[case((0.0, 5.0), 25.0)]
#[case((2.0, 3.0), 27.0)]
fn test_vertex_values(#[case] vertex: (f64, f64), #[case] expected: f64) {
    assert!(vertices(5.0, 12.0).contains(&vertex));
    assert_eq!(profit(vertex.0, vertex.1), expected);
}

#[test]
fn test_no_vertex_beats_the_solver() {
    let solution = GoodLpSolver::new().solve(&profit_maximization()).unwrap();
    let best = solution.objective_value.unwrap();
    for (x, y) in vertices(5.0, 12.0) {
        assert!(profit(x, y) <= best + TOLERANCE, "vertex ({x}, {y})");
    }
}

#[test]
fn test_tightened_constraint_makes_model_infeasible() {
    let mut model = profit_maximization();
    let x = model.variable_by_name("x").unwrap();
    model
        .add_constraint("min_x", x, Comparison::GreaterEqual, 6.0)
        .unwrap();

    let solution = GoodLpSolver::new().solve(&model).unwrap();
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert_eq!(solution.objective_value, None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_optimum_matches_best_vertex(labour in 1.0f64..50.0, material in 1.0f64..100.0) {
        let solution = GoodLpSolver::new().solve(&with_limits(labour, material)).unwrap();
        prop_assert!(solution.is_optimal());

        let x = solution.value("x").unwrap();
        let y = solution.value("y").unwrap();
        prop_assert!(x >= -TOLERANCE && y >= -TOLERANCE);
        prop_assert!(x + y <= labour + TOLERANCE);
        prop_assert!(3.0 * x + 2.0 * y <= material + TOLERANCE);

        let best = vertices(labour, material)
            .into_iter()
            .map(|(vx, vy)| profit(vx, vy))
            .fold(f64::NEG_INFINITY, f64::max);
        let objective = solution.objective_value.unwrap();
        prop_assert!((objective - best).abs() <= 1e-6 * best.max(1.0), "{objective} vs {best}");
    }
}
