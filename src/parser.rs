use std::{fmt, mem};

use crate::{
    ast::{BinOp, Expr, Symbol, Token},
    lexer::{LexError, Lexer, Position},
};

/// Deepest nesting the parser accepts. Parentheses, unary minus, `^` and
/// every operator of a `+ - * /` chain each add one level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Errors that can occur while parsing a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing but whitespace
    EmptyExpression,

    /// Token not allowed at this point of the grammar
    UnexpectedToken {
        found: Token,
        expected: &'static str,
        position: Position,
    },

    /// Name outside the vocabulary (`x`, `pi`, `e`, `sin`, ...)
    UnknownIdentifier { name: String, position: Position },

    /// `(` without its `)`, or a stray `)`
    UnbalancedParens { position: Position },

    /// Character that starts no token
    InvalidCharacter { character: char, position: Position },

    /// Malformed numeric literal
    InvalidNumber { literal: String, position: Position },

    /// Nesting deeper than [`MAX_NESTING_DEPTH`]
    NestingTooDeep { position: Position },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyExpression => write!(f, "Empty expression"),
            ParseError::UnexpectedToken {
                found,
                expected,
                position,
            } => write!(f, "Expected {}, got {} at {}", expected, found, position),
            ParseError::UnknownIdentifier { name, position } => {
                write!(f, "Unknown identifier '{}' at {}", name, position)
            }
            ParseError::UnbalancedParens { position } => {
                write!(f, "Unbalanced parentheses at {}", position)
            }
            ParseError::InvalidCharacter {
                character,
                position,
            } => write!(f, "Unexpected character '{}' at {}", character, position),
            ParseError::InvalidNumber { literal, position } => {
                write!(f, "Invalid number '{}' at {}", literal, position)
            }
            ParseError::NestingTooDeep { position } => write!(
                f,
                "Expression nested deeper than {} levels at {}",
                MAX_NESTING_DEPTH, position
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        match e {
            LexError::UnexpectedCharacter {
                character,
                position,
            } => ParseError::InvalidCharacter {
                character,
                position,
            },
            LexError::InvalidNumber { literal, position } => {
                ParseError::InvalidNumber { literal, position }
            }
            LexError::UnknownIdentifier { name, position } => {
                ParseError::UnknownIdentifier { name, position }
            }
        }
    }
}

/// Recursive-descent parser over the token stream of one formula.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := factor (('*' | '/') factor)*
/// factor  := unary ('^' factor)?
/// unary   := '-' unary | primary
/// primary := NUMBER | CONST | VAR | FUNC '(' expr ')' | '(' expr ')'
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    depth: usize,
    open_groups: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            depth: 0,
            open_groups: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current_token.clone(),
            expected,
            position: self.current_position,
        }
    }

    /// Claims one level of the nesting budget.
    fn deepen(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.current_position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.deepen()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses a left-associative chain `operand (operator operand)*`.
    ///
    /// Each operator wraps the tree built so far in one more node, so each
    /// one claims a level until the chain ends.
    fn parse_chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        operator: fn(&Token) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        let outer = self.depth;
        let chain = |parser: &mut Self| -> Result<Expr, ParseError> {
            let mut left = operand(parser)?;
            while let Some(op) = operator(&parser.current_token) {
                parser.deepen()?;
                parser.advance()?;
                let right = operand(parser)?;
                left = Expr::binary(op, left, right);
            }
            Ok(left)
        };
        let result = chain(self);
        self.depth = outer;
        result
    }

    /// Consumes the `)` closing the group opened at `open`.
    fn close_paren(&mut self, open: Position) -> Result<(), ParseError> {
        match self.current_token {
            Token::RParen => self.advance(),
            Token::Eof => Err(ParseError::UnbalancedParens { position: open }),
            _ => Err(self.unexpected("')'")),
        }
    }

    /// Parses `( expr )` starting at the current `(`.
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let open = self.current_position;
        self.advance()?;
        self.open_groups += 1;
        let inner = self.nested(Self::parse_expression);
        self.open_groups -= 1;
        let inner = inner?;
        self.close_paren(open)?;
        Ok(inner)
    }

    /// Parse primary expressions (atoms): numbers, names, calls, groups
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Literal(n))
            }
            Token::Identifier(Symbol::Variable) => {
                self.advance()?;
                Ok(Expr::Variable)
            }
            Token::Identifier(Symbol::Constant(c)) => {
                self.advance()?;
                Ok(Expr::Constant(c))
            }
            Token::Identifier(Symbol::Function(function)) => {
                self.advance()?;
                if !self.check(&Token::LParen) {
                    return Err(self.unexpected("'(' after function name"));
                }
                let argument = self.parse_group()?;
                Ok(Expr::call(function, argument))
            }
            Token::LParen => self.parse_group(),
            Token::RParen if self.open_groups == 0 => {
                self.current_token = Token::RParen;
                Err(ParseError::UnbalancedParens {
                    position: self.current_position,
                })
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("an operand"))
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Minus) {
            self.advance()?;
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::negate(operand));
        }
        self.parse_primary()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;

        if self.check(&Token::Caret) {
            self.advance()?;
            // Right-associative: 2^3^2 is 2^(3^2)
            let exponent = self.nested(Self::parse_power)?;
            return Ok(Expr::binary(BinOp::Power, base, exponent));
        }
        Ok(base)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_chain(Self::parse_power, |token| match token {
            Token::Star => Some(BinOp::Multiply),
            Token::Slash => Some(BinOp::Divide),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_chain(Self::parse_multiplicative, |token| match token {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Subtract),
            _ => None,
        })
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_additive()
    }

    /// Parses the whole input as one expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Eof) {
            return Err(ParseError::EmptyExpression);
        }

        let expr = self.parse_expression()?;

        match self.current_token {
            Token::Eof => Ok(expr),
            Token::RParen => Err(ParseError::UnbalancedParens {
                position: self.current_position,
            }),
            _ => Err(self.unexpected("an operator or end of input")),
        }
    }
}
