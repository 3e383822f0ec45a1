use approx::assert_abs_diff_eq;
use numint::{EvalError, Integrand, IntegrationError, QuadratureRequest, Rule, evaluate, integrate, parse};
use std::f64::consts::PI;

fn integrate_expr(rule: Rule, a: f64, b: f64, n: i64, expr_str: &str) -> Result<f64, String> {
    let expr = parse(expr_str).map_err(|e| format!("{:?}", e))?;
    integrate(rule, a, b, n, &expr).map_err(|e| format!("{:?}", e))
}

#[test]
fn test_polynomial_with_implicit_multiplication() {
    // ∫₀¹ 2x^2+3x-5 dx = 2/3 + 3/2 - 5
    let result = integrate_expr(Rule::Simpson, 0.0, 1.0, 2, "2x^2+3x-5").unwrap();
    assert_abs_diff_eq!(result, 2.0 / 3.0 + 1.5 - 5.0, epsilon = 1e-12);
}

#[test]
fn test_gaussian_density() {
    // Almost all the mass of the standard normal lies within ±6
    let result = integrate_expr(Rule::Simpson, -6.0, 6.0, 200, "exp(-(x^2)/2) / sqrt(2pi)").unwrap();
    assert_abs_diff_eq!(result, 1.0, epsilon = 1e-8);
}

#[test]
fn test_constants_in_bounds_and_body() {
    let result = integrate_expr(Rule::Simpson, 0.0, PI / 2.0, 100, "cos(x) + pi").unwrap();
    assert_abs_diff_eq!(result, 1.0 + PI * PI / 2.0, epsilon = 1e-8);
}

#[test]
fn test_all_rules_agree_on_smooth_integrand() {
    let expr = parse("1 / (1 + x^2)").unwrap();
    for rule in Rule::ALL {
        let result = integrate(rule, 0.0, 1.0, 2000, &expr).unwrap();
        assert_abs_diff_eq!(result, PI / 4.0, epsilon = 1e-6);
    }
}

#[test]
fn test_parse_errors_are_not_evaluation_errors() {
    for input in ["", "x+", "(x+1"] {
        let err = integrate_expr(Rule::Midpoint, 0.0, 1.0, 10, input).unwrap_err();
        assert!(err.starts_with("EmptyExpression") || err.starts_with("UnexpectedToken") || err.starts_with("UnbalancedParens"),
            "Failed for input: {} ({})", input, err);
    }
}

#[test]
fn test_domain_failure_names_the_point() {
    let expr = parse("sqrt(x)").unwrap();
    let err = integrate(Rule::Trapezoidal, -1.0, 1.0, 4, &expr).unwrap_err();
    assert_eq!(
        err,
        IntegrationError::EvaluationFailed {
            point: -1.0,
            source: EvalError::DomainError {
                operation: "sqrt",
                argument: -1.0,
            },
        }
    );
}

#[test]
fn test_custom_integrand() {
    struct Clamped;

    impl Integrand for Clamped {
        fn sample(&self, t: f64) -> Result<f64, EvalError> {
            if t > 0.5 {
                Err(EvalError::DomainError {
                    operation: "clamped",
                    argument: t,
                })
            } else {
                Ok(1.0)
            }
        }
    }

    let request = QuadratureRequest::from_count(Rule::Midpoint, 0.0, 0.5, 5).unwrap();
    assert_abs_diff_eq!(request.integrate(&Clamped).unwrap(), 0.5, epsilon = 1e-15);

    let request = QuadratureRequest::from_count(Rule::Midpoint, 0.0, 1.0, 2).unwrap();
    assert!(matches!(
        request.integrate(&Clamped),
        Err(IntegrationError::EvaluationFailed { point, .. }) if point == 0.75
    ));
}

#[test]
fn test_closure_and_expression_agree() {
    let expr = parse("x^2 * sin(x)").unwrap();
    let request = QuadratureRequest::from_count(Rule::Simpson, 0.0, 3.0, 64).unwrap();

    let from_expr = request.integrate(&expr).unwrap();
    let from_closure = request.integrate(&|x: f64| x.powf(2.0) * x.sin()).unwrap();
    assert_eq!(from_expr.to_bits(), from_closure.to_bits());
}

#[test]
fn test_trait_object_integrand() {
    let expr = parse("x").unwrap();
    let integrand: &dyn Integrand = &expr;
    let request = QuadratureRequest::from_count(Rule::Trapezoidal, 0.0, 2.0, 4).unwrap();
    assert_abs_diff_eq!(request.integrate(integrand).unwrap(), 2.0, epsilon = 1e-15);
}

#[test]
fn test_parse_once_evaluate_many() {
    let expr = parse("3sin(x)").unwrap();
    let explicit = parse("3*sin(x)").unwrap();
    for i in 0..100 {
        let x = i as f64 * 0.1;
        assert_eq!(evaluate(&expr, x), evaluate(&explicit, x));
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use numint::ParallelConfig;

    fn always_parallel() -> ParallelConfig {
        ParallelConfig {
            parallel_threshold: 0,
            min_chunk_len: 16,
        }
    }

    #[test]
    fn test_parallel_is_bit_identical() {
        let expr = parse("exp(-x) * cos(3x) + sqrt(x + 1)").unwrap();
        for rule in Rule::ALL {
            let request = QuadratureRequest::from_count(rule, 0.0, 5.0, 10_000).unwrap();
            let sequential = request.integrate(&expr).unwrap();
            let parallel = request.integrate_parallel(&expr, &always_parallel()).unwrap();
            assert_eq!(sequential.to_bits(), parallel.to_bits(), "Failed for {}", rule);
        }
    }

    #[test]
    fn test_parallel_reports_lowest_failing_point() {
        let expr = parse("log(x - 2)").unwrap();
        let request = QuadratureRequest::from_count(Rule::Trapezoidal, 0.0, 4.0, 4000).unwrap();
        let sequential = request.integrate(&expr).unwrap_err();
        let parallel = request.integrate_parallel(&expr, &always_parallel()).unwrap_err();
        assert_eq!(sequential, parallel);
        assert!(matches!(parallel, IntegrationError::EvaluationFailed { point, .. } if point == 0.0));
    }

    #[test]
    fn test_small_requests_fall_back_to_sequential() {
        let expr = parse("x^2").unwrap();
        let request = QuadratureRequest::from_count(Rule::Midpoint, 0.0, 1.0, 10).unwrap();
        let result = request.integrate_parallel(&expr, &ParallelConfig::default()).unwrap();
        assert_eq!(result, request.integrate(&expr).unwrap());
    }
}
