use std::fmt;

use crate::ast::{Symbol, Token};

/// Zero-based character offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors raised while splitting the source text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that starts no token
    UnexpectedCharacter { character: char, position: Position },

    /// Digits and dots that do not form a finite number
    InvalidNumber { literal: String, position: Position },

    /// A name outside the vocabulary
    UnknownIdentifier { name: String, position: Position },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { character, position } => {
                write!(f, "Unexpected character '{}' at {}", character, position)
            }
            LexError::InvalidNumber { literal, position } => {
                write!(f, "Invalid number '{}' at {}", literal, position)
            }
            LexError::UnknownIdentifier { name, position } => {
                write!(f, "Unknown identifier '{}' at {}", name, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Start of the token most recently returned
    token_start: usize,
    /// Token read ahead while an implicit `*` is being emitted
    pending: Option<(Token, usize)>,
    last_was_number: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
            pending: None,
            last_was_number: false,
        }
    }

    /// Where the token most recently returned by [`Lexer::next_token`] starts.
    ///
    /// An implicit `*` reports the start of the token that follows it.
    pub fn token_start(&self) -> Position {
        Position {
            offset: self.token_start,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphabetic() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut literal = String::new();
        let mut seen_point = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                literal.push(ch);
                self.advance();
            } else if ch == '.' && !seen_point {
                seen_point = true;
                literal.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match literal.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(LexError::InvalidNumber {
                literal,
                position: Position { offset: start },
            }),
        }
    }

    /// Reads one token from the source, ignoring implicit multiplication.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('+') => {
                self.advance();
                Token::Plus
            }
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('*') => {
                if self.peek_char(1) == Some('*') {
                    self.advance();
                    self.advance();
                    Token::Caret
                } else {
                    self.advance();
                    Token::Star
                }
            }
            Some('/') => {
                self.advance();
                Token::Slash
            }
            Some('^') => {
                self.advance();
                Token::Caret
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number()?,
            Some(ch) if ch.is_alphabetic() => {
                let name = self.read_identifier();
                match Symbol::lookup(&name) {
                    Some(symbol) => Token::Identifier(symbol),
                    None => {
                        return Err(LexError::UnknownIdentifier {
                            name,
                            position: Position {
                                offset: self.token_start,
                            },
                        });
                    }
                }
            }
            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    position: Position {
                        offset: self.position,
                    },
                });
            }
        };

        Ok(token)
    }

    /// Returns the next token, inserting a `*` between a number and a
    /// directly following name or `(`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some((token, start)) = self.pending.take() {
            self.token_start = start;
            self.last_was_number = false;
            return Ok(token);
        }

        let token = self.scan_token()?;

        if self.last_was_number && matches!(token, Token::Identifier(_) | Token::LParen) {
            self.pending = Some((token, self.token_start));
            self.last_was_number = false;
            return Ok(Token::Star);
        }

        self.last_was_number = matches!(token, Token::Number(_));
        Ok(token)
    }

    /// Collects every token up to and including [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_implicit_multiplication_before_name() {
    use crate::ast::Function;

    let mut lexer = Lexer::new("3sin");
    assert_eq!(lexer.next_token(), Ok(Token::Number(3.0)));
    assert_eq!(lexer.next_token(), Ok(Token::Star));
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Identifier(Symbol::Function(Function::Sin)))
    );
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_double_star_is_caret() {
    let mut lexer = Lexer::new("x**2");
    assert_eq!(lexer.next_token(), Ok(Token::Identifier(Symbol::Variable)));
    assert_eq!(lexer.next_token(), Ok(Token::Caret));
    assert_eq!(lexer.next_token(), Ok(Token::Number(2.0)));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
