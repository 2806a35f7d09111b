//! Built-in problem instances

use crate::model::{Comparison, Model, ModelError};

pub const PROFIT_MAXIMIZATION: &str = "profit_maximization";

/// Two products sharing two resources:
///
/// ```text
/// maximize   6x + 5y
/// subject to  x +  y <= 5
///            3x + 2y <= 12
///             x, y   >= 0
/// ```
///
/// The optimum is `x = 2`, `y = 3` with profit `27`.
pub fn profit_maximization() -> Model {
    build_profit_maximization().expect("profit maximization model")
}

fn build_profit_maximization() -> Result<Model, ModelError> {
    let mut model = Model::new(PROFIT_MAXIMIZATION);
    let x = model.add_variable("x")?;
    let y = model.add_variable("y")?;

    model.maximize(6.0 * x + 5.0 * y)?;
    model.add_constraint("c1", x + y, Comparison::LessEqual, 5.0)?;
    model.add_constraint("c2", 3.0 * x + 2.0 * y, Comparison::LessEqual, 12.0)?;
    Ok(model)
}
