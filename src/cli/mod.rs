//! CLI support for numint
//!
//! Provides programmatic access to the numint commands so they can be
//! embedded in other tools and exercised from tests.

mod check;
mod evaluate;
mod integrate;
mod menu;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use evaluate::{EvaluateOptions, EvaluatePoint, execute_evaluate};
pub use integrate::{
    CompareOptions, CompareReport, CompareRow, IntegrateOptions, IntegrateReport, Partition,
    execute_compare, execute_integrate,
};
pub use menu::run_menu;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParseError),
    /// Evaluation error at a given point
    Eval { x: f64, source: crate::EvalError },
    /// Integration error
    Integration(crate::IntegrationError),
    /// JSON serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No expression provided
    NoExpression,
    /// No evaluation point provided
    NoPoints,
    /// Neither a subinterval count nor a step size
    NoPartition,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Eval { x, source } => write!(f, "Evaluation error at x = {}: {}", x, source),
            CliError::Integration(e) => write!(f, "Integration error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoExpression => {
                write!(f, "No expression provided. Pass it as an argument or pipe it to stdin.")
            }
            CliError::NoPoints => write!(f, "No evaluation point provided. Use --at."),
            CliError::NoPartition => write!(f, "Either --subintervals or --step is required."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Eval { source, .. } => Some(source),
            CliError::Integration(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::IntegrationError> for CliError {
    fn from(e: crate::IntegrationError) -> Self {
        CliError::Integration(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
