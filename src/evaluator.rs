//! Tree-walking evaluation of parsed expressions.
//!
//! Evaluation is strict: every step either produces a finite real number or
//! fails with an [`EvalError`]. `NaN` and infinities never escape.

use std::fmt;

use crate::ast::{BinOp, Expr, Function};

/// Errors that can occur during expression evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Argument outside the operation's real domain
    /// (`sqrt` of a negative, `log` of a non-positive, fractional power of a negative)
    DomainError {
        operation: &'static str,
        argument: f64,
    },

    /// Division by zero, including zero raised to a negative power
    DivisionByZero,

    /// Finite operands produced a result too large for `f64`
    Overflow { operation: &'static str },

    /// The variable was bound to, or a literal held, `NaN` or an infinity
    NonFiniteInput(f64),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DomainError {
                operation,
                argument,
            } => write!(f, "Domain error: {} is undefined for {}", operation, argument),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Overflow { operation } => write!(f, "Overflow in {}", operation),
            EvalError::NonFiniteInput(value) => write!(f, "Non-finite input {}", value),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates `expr` with the variable bound to `x`.
///
/// # Examples
///
/// ```
/// use numint::{evaluate, parse};
///
/// let expr = parse("2x^2 + 1").unwrap();
/// assert_eq!(evaluate(&expr, 3.0).unwrap(), 19.0);
/// ```
pub fn evaluate(expr: &Expr, x: f64) -> Result<f64, EvalError> {
    if !x.is_finite() {
        return Err(EvalError::NonFiniteInput(x));
    }
    eval_expr(expr, x)
}

fn eval_expr(expr: &Expr, x: f64) -> Result<f64, EvalError> {
    match expr {
        Expr::Literal(n) if n.is_finite() => Ok(*n),
        Expr::Literal(n) => Err(EvalError::NonFiniteInput(*n)),
        Expr::Variable => Ok(x),
        Expr::Constant(c) => Ok(c.value()),
        Expr::Call { function, argument } => {
            let value = eval_expr(argument, x)?;
            apply_function(*function, value)
        }
        Expr::BinaryOp { op, left, right } => {
            let left = eval_expr(left, x)?;
            let right = eval_expr(right, x)?;
            apply_binop(*op, left, right)
        }
        Expr::Negate(operand) => Ok(-eval_expr(operand, x)?),
    }
}

fn apply_binop(op: BinOp, left: f64, right: f64) -> Result<f64, EvalError> {
    let result = match op {
        BinOp::Add => left + right,
        BinOp::Subtract => left - right,
        BinOp::Multiply => left * right,
        BinOp::Divide => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
        BinOp::Power => {
            if left == 0.0 && right < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            if left < 0.0 && right.fract() != 0.0 {
                return Err(EvalError::DomainError {
                    operation: "^",
                    argument: left,
                });
            }
            left.powf(right)
        }
    };

    finite(result, op.symbol())
}

fn apply_function(function: Function, value: f64) -> Result<f64, EvalError> {
    let result = match function {
        Function::Sin => value.sin(),
        Function::Cos => value.cos(),
        Function::Tan => value.tan(),
        Function::Exp => value.exp(),
        Function::Log => {
            if value <= 0.0 {
                return Err(EvalError::DomainError {
                    operation: "log",
                    argument: value,
                });
            }
            value.ln()
        }
        Function::Sqrt => {
            if value < 0.0 {
                return Err(EvalError::DomainError {
                    operation: "sqrt",
                    argument: value,
                });
            }
            value.sqrt()
        }
    };

    finite(result, function.name())
}

/// Operands are always finite here, so a non-finite result is an overflow.
fn finite(result: f64, operation: &'static str) -> Result<f64, EvalError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::Overflow { operation })
    }
}
