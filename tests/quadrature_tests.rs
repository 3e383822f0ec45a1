// tests/quadrature_tests.rs

use approx::{assert_abs_diff_eq, assert_relative_eq};
use numint::{EvalError, IntegrationError, QuadratureRequest, Rule, integrate, parse};
use std::f64::consts::{E, PI};

fn integrate_str(rule: Rule, a: f64, b: f64, n: i64, expr_str: &str) -> Result<f64, IntegrationError> {
    let expr = parse(expr_str).unwrap();
    integrate(rule, a, b, n, &expr)
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn test_simpson_cubic() {
    let result = integrate_str(Rule::Simpson, 0.0, 2.0, 4, "x^3").unwrap();
    assert_abs_diff_eq!(result, 4.0, epsilon = 1e-12);
}

#[test]
fn test_midpoint_square() {
    let result = integrate_str(Rule::Midpoint, 0.0, 1.0, 1000, "x^2").unwrap();
    assert_abs_diff_eq!(result, 1.0 / 3.0, epsilon = 1e-6);
}

#[test]
fn test_trapezoidal_sine() {
    let result = integrate_str(Rule::Trapezoidal, 0.0, PI, 1000, "sin(x)").unwrap();
    assert_abs_diff_eq!(result, 2.0, epsilon = 1e-4);
}

#[test]
fn test_simpson_is_exact_for_cubics() {
    // ∫ x^k dx over [a, b] is (b^(k+1) - a^(k+1)) / (k+1)
    for (a, b) in [(0.0, 1.0), (-1.0, 2.0), (0.5, 3.25), (-3.0, -1.0)] {
        for k in 0..=3 {
            let expr = format!("x^{}", k);
            let exact = (f64::powi(b, k + 1) - f64::powi(a, k + 1)) / (k + 1) as f64;
            for n in [2, 4, 10] {
                let result = integrate_str(Rule::Simpson, a, b, n, &expr).unwrap();
                assert_abs_diff_eq!(result, exact, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_midpoint_and_trapezoidal_are_exact_for_lines() {
    for rule in [Rule::Midpoint, Rule::Trapezoidal] {
        let result = integrate_str(rule, -1.0, 3.0, 7, "2x + 1").unwrap();
        assert_abs_diff_eq!(result, 12.0, epsilon = 1e-12);
    }
}

#[test]
fn test_single_subinterval() {
    // Midpoint: 1 * f(0.5); trapezoidal: (f(0) + f(1)) / 2
    assert_eq!(integrate_str(Rule::Midpoint, 0.0, 1.0, 1, "x^2").unwrap(), 0.25);
    assert_eq!(integrate_str(Rule::Trapezoidal, 0.0, 1.0, 1, "x^2").unwrap(), 0.5);
}

#[test]
fn test_exponential() {
    let exact = E - 1.0;
    let result = integrate_str(Rule::Simpson, 0.0, 1.0, 100, "exp(x)").unwrap();
    assert_relative_eq!(result, exact, max_relative = 1e-10);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_error_shrinks_as_n_grows() {
    let counts = [2, 4, 8, 16, 32, 64, 128];
    let problems = [("x^2", 0.0, 1.0, 1.0 / 3.0), ("exp(x)", 0.0, 1.0, E - 1.0), ("sin(x)", 0.0, PI, 2.0)];

    for (expr_str, a, b, exact) in problems {
        for rule in Rule::ALL {
            if rule == Rule::Simpson && expr_str == "x^2" {
                continue;
            }

            let errors: Vec<f64> = counts
                .iter()
                .map(|&n| (integrate_str(rule, a, b, n, expr_str).unwrap() - exact).abs())
                .collect();

            for pair in errors.windows(2) {
                assert!(
                    pair[1] <= pair[0],
                    "{} on {} did not converge: {:?}",
                    rule,
                    expr_str,
                    errors
                );
            }
        }
    }
}

// ============================================================================
// Reproducibility
// ============================================================================

fn reference_simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let h = (b - a) / n as f64;
    let mut odd = 0.0;
    for i in (1..n).step_by(2) {
        odd += f(a + i as f64 * h);
    }
    let mut even = 0.0;
    for i in (2..n - 1).step_by(2) {
        even += f(a + i as f64 * h);
    }
    (h / 3.0) * (f(a) + 4.0 * odd + 2.0 * even + f(b))
}

fn reference_trapezoidal(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let h = (b - a) / n as f64;
    let mut sum = 0.0;
    for i in 1..n {
        sum += f(a + i as f64 * h);
    }
    h * (0.5 * f(a) + sum + 0.5 * f(b))
}

fn reference_midpoint(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let h = (b - a) / n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        sum += f(a + (i as f64 + 0.5) * h);
    }
    h * sum
}

#[test]
fn test_bit_identical_to_reference_formulas() {
    let f = |x: f64| (x * 1.3).sin() * (-x * x).exp() + 0.1 * x;
    let (a, b) = (-0.7, 2.3);

    for n in [2usize, 6, 50, 1000] {
        let run = |rule| {
            QuadratureRequest::from_count(rule, a, b, n as i64)
                .unwrap()
                .integrate(&f)
                .unwrap()
                .to_bits()
        };
        assert_eq!(run(Rule::Midpoint), reference_midpoint(f, a, b, n).to_bits());
        assert_eq!(run(Rule::Trapezoidal), reference_trapezoidal(f, a, b, n).to_bits());
        assert_eq!(run(Rule::Simpson), reference_simpson(f, a, b, n).to_bits());
    }
}

#[test]
fn test_repeated_integration_is_bit_identical() {
    let expr = parse("sqrt(1 + x^3) * cos(x)").unwrap();
    for rule in Rule::ALL {
        let first = integrate(rule, 0.0, 4.0, 500, &expr).unwrap();
        let second = integrate(rule, 0.0, 4.0, 500, &expr).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

// ============================================================================
// Request validation
// ============================================================================

#[test]
fn test_simpson_rejects_odd_count() {
    assert_eq!(
        integrate_str(Rule::Simpson, 0.0, 1.0, 3, "x"),
        Err(IntegrationError::OddSubintervalCount(3))
    );
}

#[test]
fn test_odd_count_is_fine_for_other_rules() {
    assert!(integrate_str(Rule::Midpoint, 0.0, 1.0, 3, "x").is_ok());
    assert!(integrate_str(Rule::Trapezoidal, 0.0, 1.0, 3, "x").is_ok());
}

#[test]
fn test_invalid_bounds() {
    for (a, b) in [(1.0, 1.0), (2.0, 1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY), (-f64::MAX, f64::MAX)] {
        for rule in Rule::ALL {
            let err = QuadratureRequest::from_count(rule, a, b, 2).unwrap_err();
            assert!(
                matches!(err, IntegrationError::InvalidBounds { .. }),
                "Failed for [{}, {}]",
                a,
                b
            );
        }
    }
}

#[test]
fn test_invalid_subinterval_count() {
    for n in [0, -1, -100] {
        assert_eq!(
            QuadratureRequest::from_count(Rule::Midpoint, 0.0, 1.0, n),
            Err(IntegrationError::InvalidSubintervalCount(n))
        );
    }
}

#[test]
fn test_bounds_are_checked_before_count() {
    assert!(matches!(
        QuadratureRequest::from_count(Rule::Simpson, 1.0, 0.0, 3),
        Err(IntegrationError::InvalidBounds { .. })
    ));
}

#[test]
fn test_from_step() {
    let request = QuadratureRequest::from_step(Rule::Trapezoidal, 0.0, 1.0, 0.1).unwrap();
    assert_eq!(request.subintervals(), 10);
    assert_relative_eq!(request.step(), 0.1);

    // 1 / 0.3 rounds to 3; the real step is then 1 / 3
    let request = QuadratureRequest::from_step(Rule::Midpoint, 0.0, 1.0, 0.3).unwrap();
    assert_eq!(request.subintervals(), 3);
    assert_relative_eq!(request.step(), 1.0 / 3.0);
}

#[test]
fn test_from_step_matches_from_count() {
    let expr = parse("x^2 + 1").unwrap();
    let by_step = QuadratureRequest::from_step(Rule::Simpson, 0.0, 2.0, 0.25).unwrap();
    let by_count = QuadratureRequest::from_count(Rule::Simpson, 0.0, 2.0, 8).unwrap();
    assert_eq!(by_step, by_count);
    assert_eq!(by_step.integrate(&expr), by_count.integrate(&expr));
}

#[test]
fn test_from_step_rejects_bad_steps() {
    for h in [0.0, -0.1, f64::NAN, f64::INFINITY, 10.0, 1e-300] {
        assert!(
            matches!(
                QuadratureRequest::from_step(Rule::Midpoint, 0.0, 1.0, h),
                Err(IntegrationError::InvalidStepSize(_))
            ),
            "Failed for h = {}",
            h
        );
    }
}

#[test]
fn test_from_step_keeps_the_parity_check() {
    assert_eq!(
        QuadratureRequest::from_step(Rule::Simpson, 0.0, 1.0, 0.2),
        Err(IntegrationError::OddSubintervalCount(5))
    );
}

#[test]
fn test_sample_points() {
    let request = QuadratureRequest::from_count(Rule::Midpoint, 0.0, 1.0, 4).unwrap();
    let points: Vec<f64> = (0..request.sample_count()).map(|i| request.abscissa(i)).collect();
    assert_eq!(points, vec![0.125, 0.375, 0.625, 0.875]);

    let request = QuadratureRequest::from_count(Rule::Simpson, 1.0, 2.0, 4).unwrap();
    let points: Vec<f64> = (0..request.sample_count()).map(|i| request.abscissa(i)).collect();
    assert_eq!(points, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn test_evaluation_failure_aborts_integration() {
    // log(0) at the left end
    assert_eq!(
        integrate_str(Rule::Trapezoidal, 0.0, 1.0, 4, "log(x)"),
        Err(IntegrationError::EvaluationFailed {
            point: 0.0,
            source: EvalError::DomainError {
                operation: "log",
                argument: 0.0,
            },
        })
    );

    // Midpoint never samples the end, so the same integrand works
    assert!(integrate_str(Rule::Midpoint, 0.0, 1.0, 4, "log(x)").is_ok());
}

#[test]
fn test_first_failing_point_is_reported() {
    // sqrt(x - 0.5) fails for every x below 0.5; the first sample is 0
    let err = integrate_str(Rule::Simpson, 0.0, 1.0, 10, "sqrt(x - 0.5)").unwrap_err();
    assert!(matches!(err, IntegrationError::EvaluationFailed { point, .. } if point == 0.0));
}

#[test]
fn test_interior_pole() {
    let err = integrate_str(Rule::Trapezoidal, -1.0, 1.0, 2, "1/x").unwrap_err();
    assert_eq!(
        err,
        IntegrationError::EvaluationFailed {
            point: 0.0,
            source: EvalError::DivisionByZero,
        }
    );
}

#[test]
fn test_overflowing_sum() {
    let f = |_: f64| f64::MAX;
    let request = QuadratureRequest::from_count(Rule::Midpoint, 0.0, 10.0, 4).unwrap();
    assert!(matches!(request.integrate(&f), Err(IntegrationError::NonFiniteResult(_))));
}

#[test]
fn test_error_source_chain() {
    use std::error::Error;

    let err = integrate_str(Rule::Trapezoidal, -1.0, 1.0, 2, "1/x").unwrap_err();
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "Division by zero");
}
