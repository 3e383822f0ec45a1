use std::fmt;

/// Composite quadrature rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Rule {
    /// One sample at the centre of each subinterval
    Midpoint,
    /// Samples at subinterval ends, halved at `a` and `b`
    Trapezoidal,
    /// Parabolic fit over pairs of subintervals; needs an even count
    Simpson,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::Midpoint, Rule::Trapezoidal, Rule::Simpson];

    /// Number of integrand evaluations for `n` subintervals.
    pub fn sample_count(self, n: usize) -> usize {
        match self {
            Rule::Midpoint => n,
            Rule::Trapezoidal | Rule::Simpson => n + 1,
        }
    }

    pub fn requires_even_count(self) -> bool {
        matches!(self, Rule::Simpson)
    }

    /// Short lowercase identifier, as accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Rule::Midpoint => "midpoint",
            Rule::Trapezoidal => "trapezoidal",
            Rule::Simpson => "simpson",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Midpoint => write!(f, "Composite Midpoint"),
            Rule::Trapezoidal => write!(f, "Composite Trapezoidal"),
            Rule::Simpson => write!(f, "Composite Simpson's"),
        }
    }
}
