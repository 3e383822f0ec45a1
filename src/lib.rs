//! Numerical integration of single-variable formulas.
//!
//! A formula such as `2x^2 + 3sin(x)` is lexed and parsed into an [`Expr`]
//! tree, evaluated by walking that tree, and integrated over `[a, b]` with
//! one of three composite rules.
//!
//! ```
//! use numint::{Rule, integrate, parse};
//!
//! let f = parse("x^3").unwrap();
//! let area = integrate(Rule::Simpson, 0.0, 2.0, 4, &f).unwrap();
//! assert!((area - 4.0).abs() < 1e-12);
//! ```

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod quadrature;

#[cfg(feature = "cli")]
pub mod cli;

use log::debug;

pub use ast::{BinOp, Constant, Expr, Function, Symbol, Token};
pub use evaluator::{EvalError, evaluate};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser};
pub use quadrature::{Integrand, IntegrationError, QuadratureRequest, Rule};

#[cfg(feature = "parallel")]
pub use quadrature::ParallelConfig;

/// Parses a formula in `x`.
///
/// ```
/// use numint::parse;
///
/// assert_eq!(parse("3sin(x)").unwrap(), parse("3 * sin(x)").unwrap());
/// assert!(parse("(x + 1").is_err());
/// ```
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let lexer = Lexer::new(text);
    let mut parser = Parser::new(lexer)?;
    let expr = parser.parse()?;
    debug!("parsed `{}` as {} ({} nodes)", text, expr, expr.node_count());
    Ok(expr)
}

/// Integrates `expr` over `[a, b]` with `n` subintervals.
///
/// Shorthand for [`QuadratureRequest::from_count`] followed by
/// [`QuadratureRequest::integrate`].
pub fn integrate(rule: Rule, a: f64, b: f64, n: i64, expr: &Expr) -> Result<f64, IntegrationError> {
    QuadratureRequest::from_count(rule, a, b, n)?.integrate(expr)
}
