use log::debug;

use super::{Integrand, IntegrationError, Rule};

/// Largest subinterval count [`QuadratureRequest::from_step`] will derive.
pub const MAX_DERIVED_SUBINTERVALS: usize = u32::MAX as usize;

/// A validated integration problem: rule, bounds and subinterval count.
///
/// Construction checks every precondition up front. Nothing is adjusted
/// silently: an odd count for Simpson's rule is an error, not a hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureRequest {
    rule: Rule,
    lower: f64,
    upper: f64,
    subintervals: usize,
}

impl QuadratureRequest {
    /// Builds a request from an explicit subinterval count.
    pub fn from_count(rule: Rule, lower: f64, upper: f64, n: i64) -> Result<Self, IntegrationError> {
        check_bounds(lower, upper)?;

        let subintervals = usize::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(IntegrationError::InvalidSubintervalCount(n))?;

        Self::new(rule, lower, upper, subintervals)
    }

    /// Builds a request from a step size, using `round((b - a) / h)`
    /// subintervals. The actual step is then `(b - a) / n`.
    pub fn from_step(rule: Rule, lower: f64, upper: f64, step: f64) -> Result<Self, IntegrationError> {
        check_bounds(lower, upper)?;

        if !(step.is_finite() && step > 0.0) {
            return Err(IntegrationError::InvalidStepSize(step));
        }

        let count = ((upper - lower) / step).round();
        if !(count >= 1.0 && count <= MAX_DERIVED_SUBINTERVALS as f64) {
            return Err(IntegrationError::InvalidStepSize(step));
        }

        let subintervals = count as usize;
        debug!("step {} over [{}, {}] gives n = {}", step, lower, upper, subintervals);

        Self::new(rule, lower, upper, subintervals)
    }

    fn new(rule: Rule, lower: f64, upper: f64, subintervals: usize) -> Result<Self, IntegrationError> {
        if rule.requires_even_count() && subintervals % 2 != 0 {
            return Err(IntegrationError::OddSubintervalCount(subintervals));
        }

        Ok(QuadratureRequest {
            rule,
            lower,
            upper,
            subintervals,
        })
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn subintervals(&self) -> usize {
        self.subintervals
    }

    /// Width of one subinterval, `h = (b - a) / n`.
    pub fn step(&self) -> f64 {
        (self.upper - self.lower) / self.subintervals as f64
    }

    pub fn sample_count(&self) -> usize {
        self.rule.sample_count(self.subintervals)
    }

    /// The `i`-th sample point, for `i` in `0..sample_count()`.
    pub fn abscissa(&self, i: usize) -> f64 {
        let h = self.step();
        match self.rule {
            Rule::Midpoint => self.lower + (i as f64 + 0.5) * h,
            Rule::Trapezoidal | Rule::Simpson => {
                if i == self.subintervals {
                    self.upper
                } else {
                    self.lower + i as f64 * h
                }
            }
        }
    }

    pub(super) fn sample<F>(&self, f: &F, i: usize) -> Result<f64, IntegrationError>
    where
        F: Integrand + ?Sized,
    {
        let point = self.abscissa(i);
        f.sample(point)
            .map_err(|source| IntegrationError::EvaluationFailed { point, source })
    }

    /// Integrates `f`, stopping at the first sample that fails.
    pub fn integrate<F>(&self, f: &F) -> Result<f64, IntegrationError>
    where
        F: Integrand + ?Sized,
    {
        debug!(
            "{} over [{}, {}] with n = {}, h = {}",
            self.rule,
            self.lower,
            self.upper,
            self.subintervals,
            self.step()
        );

        let samples = (0..self.sample_count()).map(|i| self.sample(f, i));
        self.reduce(samples)
    }

    /// Folds samples, given in node order, into the rule's estimate.
    pub(super) fn reduce<I>(&self, samples: I) -> Result<f64, IntegrationError>
    where
        I: IntoIterator<Item = Result<f64, IntegrationError>>,
    {
        let h = self.step();
        let n = self.subintervals;

        let estimate = match self.rule {
            Rule::Midpoint => {
                let mut sum = 0.0;
                for value in samples {
                    sum += value?;
                }
                h * sum
            }
            Rule::Trapezoidal => {
                let (mut first, mut last, mut interior) = (0.0, 0.0, 0.0);
                for (i, value) in samples.into_iter().enumerate() {
                    let value = value?;
                    if i == 0 {
                        first = value;
                    } else if i == n {
                        last = value;
                    } else {
                        interior += value;
                    }
                }
                h * (0.5 * first + interior + 0.5 * last)
            }
            Rule::Simpson => {
                let (mut first, mut last) = (0.0, 0.0);
                let (mut odd, mut even) = (0.0, 0.0);
                for (i, value) in samples.into_iter().enumerate() {
                    let value = value?;
                    if i == 0 {
                        first = value;
                    } else if i == n {
                        last = value;
                    } else if i % 2 == 1 {
                        odd += value;
                    } else {
                        even += value;
                    }
                }
                (h / 3.0) * (first + 4.0 * odd + 2.0 * even + last)
            }
        };

        if estimate.is_finite() {
            Ok(estimate)
        } else {
            Err(IntegrationError::NonFiniteResult(estimate))
        }
    }
}

fn check_bounds(lower: f64, upper: f64) -> Result<(), IntegrationError> {
    let valid = lower.is_finite() && upper.is_finite() && upper > lower && (upper - lower).is_finite();
    if valid {
        Ok(())
    } else {
        Err(IntegrationError::InvalidBounds { lower, upper })
    }
}
