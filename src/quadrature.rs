//! Composite quadrature over `[a, b]`.
//!
//! A [`QuadratureRequest`] fixes the rule, the bounds and the number of
//! subintervals. It then samples any [`Integrand`] at the rule's nodes, in
//! ascending order, and folds the samples into an estimate with plain
//! left-to-right sums, so the same request always yields the same bits.
//!
//! | Rule        | Estimate                                                         |
//! |-------------|------------------------------------------------------------------|
//! | Midpoint    | `h * Σ f(a + (i + ½)h)` for `i` in `0..n`                        |
//! | Trapezoidal | `h * (½f(a) + Σ f(a + ih) + ½f(b))` for `i` in `1..n`            |
//! | Simpson     | `h/3 * (f(a) + 4 Σ_odd f(a + ih) + 2 Σ_even f(a + ih) + f(b))`   |
//!
//! where `h = (b - a) / n`.
//!
//! # Example
//!
//! ```
//! use numint::quadrature::{QuadratureRequest, Rule};
//!
//! let request = QuadratureRequest::from_count(Rule::Simpson, 0.0, 2.0, 4).unwrap();
//! let area = request.integrate(&|x: f64| x * x * x).unwrap();
//! assert!((area - 4.0).abs() < 1e-12);
//! ```

mod request;
mod rule;

#[cfg(feature = "parallel")]
mod parallel;

pub use request::{MAX_DERIVED_SUBINTERVALS, QuadratureRequest};
pub use rule::Rule;

#[cfg(feature = "parallel")]
pub use parallel::ParallelConfig;

use std::fmt;

use crate::{ast::Expr, evaluator::{EvalError, evaluate}};

/// Anything that can be sampled at a point of the integration interval.
pub trait Integrand {
    fn sample(&self, t: f64) -> Result<f64, EvalError>;
}

impl Integrand for Expr {
    fn sample(&self, t: f64) -> Result<f64, EvalError> {
        evaluate(self, t)
    }
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64,
{
    fn sample(&self, t: f64) -> Result<f64, EvalError> {
        Ok(self(t))
    }
}

/// Errors that can occur while setting up or running an integration.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// Bounds not finite, or `b <= a`
    InvalidBounds { lower: f64, upper: f64 },

    /// Subinterval count below one
    InvalidSubintervalCount(i64),

    /// Simpson's rule with an odd subinterval count
    OddSubintervalCount(usize),

    /// Step size that does not divide `[a, b]` into a usable count
    InvalidStepSize(f64),

    /// The integrand failed at a sample point; nothing is returned
    EvaluationFailed { point: f64, source: EvalError },

    /// Finite samples summed to `NaN` or an infinity
    NonFiniteResult(f64),
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationError::InvalidBounds { lower, upper } => write!(
                f,
                "Invalid bounds: b must be greater than a (a = {}, b = {})",
                lower, upper
            ),
            IntegrationError::InvalidSubintervalCount(n) => {
                write!(f, "Invalid subinterval count {}: n must be positive", n)
            }
            IntegrationError::OddSubintervalCount(n) => {
                write!(f, "n must be even for Simpson's rule (got {})", n)
            }
            IntegrationError::InvalidStepSize(h) => write!(f, "Invalid step size {}", h),
            IntegrationError::EvaluationFailed { point, source } => {
                write!(f, "Evaluation failed at x = {}: {}", point, source)
            }
            IntegrationError::NonFiniteResult(value) => {
                write!(f, "Integral does not have a finite value ({})", value)
            }
        }
    }
}

impl std::error::Error for IntegrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntegrationError::EvaluationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
