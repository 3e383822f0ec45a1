use std::fmt;

use crate::ast::{BinOp, Constant, Function};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The AST is built once per formula and never mutated afterwards, so the
/// same tree can be evaluated any number of times, from any thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    ///
    /// # Example
    /// ```text
    /// 2.5
    /// ```
    Literal(f64),

    /// The independent variable `x`
    Variable,

    /// Named constant (`pi`, `e`)
    Constant(Constant),

    /// Built-in function applied to one argument
    ///
    /// # Example
    /// ```text
    /// sin(x)
    /// sqrt(x + 1)
    /// ```
    Call {
        function: Function,
        argument: Box<Expr>,
    },

    /// Binary operation
    ///
    /// Left and right operands with an operator.
    ///
    /// # Example
    /// ```text
    /// x + 1
    /// 2 * x
    /// x ^ 2
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary negation
    ///
    /// # Example
    /// ```text
    /// -x
    /// -(x + 1)
    /// ```
    Negate(Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, argument: Expr) -> Self {
        Expr::Call {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Negate(Box::new(operand))
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Variable | Expr::Constant(_) => 1,
            Expr::Call { argument, .. } => 1 + argument.node_count(),
            Expr::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Negate(operand) => 1 + operand.node_count(),
        }
    }

    /// Writes `self` as an operand of `parent`, adding parentheses where the
    /// grammar would otherwise regroup it.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: BinOp, is_right: bool) -> fmt::Result {
        let needs_parens = match self {
            Expr::Negate(_) => true,
            Expr::BinaryOp { op, .. } => {
                let (inner, outer) = (op.precedence(), parent.precedence());
                if inner != outer {
                    inner < outer
                } else if parent.is_right_associative() {
                    !is_right
                } else {
                    is_right
                }
            }
            _ => false,
        };

        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(n) => write!(f, "{}", n),
            Expr::Variable => f.write_str("x"),
            Expr::Constant(c) => f.write_str(c.name()),
            Expr::Call { function, argument } => write!(f, "{}({})", function.name(), argument),
            Expr::Negate(operand) => match operand.as_ref() {
                Expr::BinaryOp { .. } | Expr::Negate(_) => write!(f, "-({})", operand),
                _ => write!(f, "-{}", operand),
            },
            Expr::BinaryOp { op, left, right } => {
                left.fmt_operand(f, *op, false)?;
                write!(f, " {} ", op)?;
                right.fmt_operand(f, *op, true)
            }
        }
    }
}
