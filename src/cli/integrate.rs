//! Integrate a formula with one rule, or compare all of them

use log::warn;
use serde_json::json;

use crate::{Expr, IntegrationError, QuadratureRequest, Rule};

use super::CliError;

/// How `[a, b]` is divided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Partition {
    /// Explicit number of subintervals
    Count(i64),
    /// Step size; the count is `round((b - a) / h)`
    Step(f64),
}

/// Options for the integrate command
#[derive(Debug, Clone)]
pub struct IntegrateOptions {
    /// The formula to integrate
    pub expression: String,
    pub rule: Rule,
    pub lower: f64,
    pub upper: f64,
    pub partition: Partition,
    /// Bump an odd Simpson count to the next even one instead of failing
    pub adjust_odd: bool,
    /// Sample on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

/// Outcome of one integration
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrateReport {
    pub rule: Rule,
    pub lower: f64,
    pub upper: f64,
    pub subintervals: usize,
    pub step: f64,
    /// The formula as the user wrote it
    pub expression: String,
    pub value: f64,
    /// Odd count that was replaced, when `adjust_odd` kicked in
    pub adjusted_from: Option<usize>,
}

impl IntegrateReport {
    /// Two-line summary with `precision` decimals.
    pub fn render(&self, precision: usize) -> String {
        format!(
            "{} Result: {:.*}\nParameters: a={}, b={}, n={}, f(x)={}",
            self.rule, precision, self.value, self.lower, self.upper, self.subintervals, self.expression
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "rule": self.rule.id(),
            "lower": self.lower,
            "upper": self.upper,
            "subintervals": self.subintervals,
            "step": self.step,
            "expression": self.expression,
            "value": self.value,
            "adjusted_from": self.adjusted_from,
        })
    }
}

/// Options for the compare command
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub expression: String,
    pub lower: f64,
    pub upper: f64,
    pub partition: Partition,
    /// Known value of the integral, to report absolute errors against
    pub exact: Option<f64>,
    pub parallel: bool,
}

/// One rule's line in a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRow {
    pub rule: Rule,
    pub result: Result<f64, IntegrationError>,
    /// `|result - exact|` when both are known
    pub error: Option<f64>,
}

/// All three rules applied to the same problem
#[derive(Debug, Clone, PartialEq)]
pub struct CompareReport {
    pub expression: String,
    pub rows: Vec<CompareRow>,
}

impl CompareReport {
    pub fn render(&self, precision: usize) -> String {
        let mut lines = vec![format!("f(x)={}", self.expression)];
        for row in &self.rows {
            let line = match (&row.result, row.error) {
                (Ok(value), Some(error)) => {
                    format!("{:<24}{:.*}  (error {:.3e})", row.rule.to_string(), precision, value, error)
                }
                (Ok(value), None) => format!("{:<24}{:.*}", row.rule.to_string(), precision, value),
                (Err(e), _) => format!("{:<24}{}", row.rule.to_string(), e),
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| match &row.result {
                Ok(value) => json!({
                    "rule": row.rule.id(),
                    "value": value,
                    "error": row.error,
                }),
                Err(e) => json!({
                    "rule": row.rule.id(),
                    "failure": e.to_string(),
                }),
            })
            .collect();

        json!({ "expression": self.expression, "results": rows })
    }
}

fn build_request(
    rule: Rule,
    lower: f64,
    upper: f64,
    partition: Partition,
) -> Result<QuadratureRequest, IntegrationError> {
    match partition {
        Partition::Count(n) => QuadratureRequest::from_count(rule, lower, upper, n),
        Partition::Step(h) => QuadratureRequest::from_step(rule, lower, upper, h),
    }
}

#[cfg(feature = "parallel")]
fn run(request: &QuadratureRequest, expr: &Expr, parallel: bool) -> Result<f64, IntegrationError> {
    if parallel {
        request.integrate_parallel(expr, &crate::ParallelConfig::default())
    } else {
        request.integrate(expr)
    }
}

#[cfg(not(feature = "parallel"))]
fn run(request: &QuadratureRequest, expr: &Expr, parallel: bool) -> Result<f64, IntegrationError> {
    if parallel {
        warn!("built without the `parallel` feature, sampling sequentially");
    }
    request.integrate(expr)
}

/// Execute a numint integrate operation
pub fn execute_integrate(options: &IntegrateOptions) -> Result<IntegrateReport, CliError> {
    let expr = crate::parse(&options.expression)?;

    let (request, adjusted_from) =
        match build_request(options.rule, options.lower, options.upper, options.partition) {
            Err(IntegrationError::OddSubintervalCount(n)) if options.adjust_odd => {
                warn!("n should be even for Simpson's rule, using n = {}", n + 1);
                let request =
                    QuadratureRequest::from_count(options.rule, options.lower, options.upper, n as i64 + 1)?;
                (request, Some(n))
            }
            result => (result?, None),
        };

    let value = run(&request, &expr, options.parallel)?;

    Ok(IntegrateReport {
        rule: request.rule(),
        lower: request.lower(),
        upper: request.upper(),
        subintervals: request.subintervals(),
        step: request.step(),
        expression: options.expression.clone(),
        value,
        adjusted_from,
    })
}

/// Execute a numint compare operation
///
/// A rule that cannot run (e.g. Simpson with an odd count) gets a failed
/// row; only a formula that does not parse fails the whole comparison.
pub fn execute_compare(options: &CompareOptions) -> Result<CompareReport, CliError> {
    let expr = crate::parse(&options.expression)?;

    let rows = Rule::ALL
        .iter()
        .map(|&rule| {
            let result = build_request(rule, options.lower, options.upper, options.partition)
                .and_then(|request| run(&request, &expr, options.parallel));
            let error = match (&result, options.exact) {
                (Ok(value), Some(exact)) => Some((value - exact).abs()),
                _ => None,
            };
            CompareRow { rule, result, error }
        })
        .collect();

    Ok(CompareReport {
        expression: options.expression.clone(),
        rows,
    })
}
