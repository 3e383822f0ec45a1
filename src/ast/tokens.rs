use std::fmt;

use crate::ast::Symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Numeric literal
    ///
    /// Digits with at most one decimal point. There is no sign and no
    /// scientific notation: `-2` is a unary minus applied to `2`.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// .5
    /// ```
    Number(f64),

    /// Known name from the vocabulary
    ///
    /// The lexer resolves names as it reads them, so an unknown name never
    /// becomes a token.
    ///
    /// # Examples
    /// ```text
    /// x
    /// pi
    /// sqrt
    /// ```
    Identifier(Symbol),

    // Arithmetic
    /// Addition
    Plus,

    /// Subtraction or negation
    Minus,

    /// Multiplication, written or implicit
    Star,

    /// Division
    Slash,

    /// Exponentiation
    ///
    /// # Examples
    /// ```text
    /// x^2
    /// x**2
    /// ```
    Caret,

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Identifier(symbol) => write!(f, "'{}'", symbol),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Caret => write!(f, "'^'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
