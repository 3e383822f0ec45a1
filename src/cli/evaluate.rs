//! Evaluate a formula at given points

use serde_json::json;

use super::CliError;

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// The formula to evaluate
    pub expression: String,
    /// Values of `x`, in output order
    pub points: Vec<f64>,
}

/// One evaluated point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatePoint {
    pub x: f64,
    pub value: f64,
}

impl EvaluatePoint {
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "x": self.x, "value": self.value })
    }
}

/// Parses the formula once and evaluates it at every point, failing on the
/// first point outside its domain.
pub fn execute_evaluate(options: &EvaluateOptions) -> Result<Vec<EvaluatePoint>, CliError> {
    if options.points.is_empty() {
        return Err(CliError::NoPoints);
    }

    let expr = crate::parse(&options.expression)?;

    options
        .points
        .iter()
        .map(|&x| {
            crate::evaluate(&expr, x)
                .map(|value| EvaluatePoint { x, value })
                .map_err(|source| CliError::Eval { x, source })
        })
        .collect()
}
