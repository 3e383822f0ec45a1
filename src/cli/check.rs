//! Validate a formula without evaluating it

use serde_json::json;

use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The formula to validate
    pub expression: String,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// The parsed formula printed back with explicit operators
    pub normalized: String,
    /// Size of the syntax tree
    pub nodes: usize,
}

impl CheckResult {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "valid": true,
            "normalized": self.normalized,
            "nodes": self.nodes,
        })
    }
}

/// Execute a numint check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = crate::parse(&options.expression)?;
    Ok(CheckResult {
        normalized: expr.to_string(),
        nodes: expr.node_count(),
    })
}
