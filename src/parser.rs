//! Recursive-descent parser that evaluates while it parses.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | '(' expression ')' | ('+' | '-') factor
//! ```

use log::trace;

use crate::error::ParseError;
use crate::lexer::Token;

/// Deepest allowed parenthesis nesting. Unary sign chains do not count.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Parses and evaluates a complete token stream.
pub fn parse(tokens: &[Token]) -> Result<f64, ParseError> {
    Parser::new(tokens).parse()
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    current: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Evaluates the whole stream; leftover tokens are an error.
    pub fn parse(&mut self) -> Result<f64, ParseError> {
        let result = self.expression()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::TrailingTokens {
                found: token.clone(),
            });
        }
        Ok(result)
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.current);
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, ParseError> {
        let mut left = self.term()?;

        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.current += 1;
                    let right = self.term()?;
                    trace!("{left} + {right}");
                    left += right;
                }
                Some(Token::Minus) => {
                    self.current += 1;
                    let right = self.term()?;
                    trace!("{left} - {right}");
                    left -= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut left = self.factor()?;

        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.current += 1;
                    let right = self.factor()?;
                    trace!("{left} * {right}");
                    left *= right;
                }
                Some(Token::Slash) => {
                    self.current += 1;
                    let right = self.factor()?;
                    if right == 0.0 {
                        return Err(ParseError::DivisionByZero);
                    }
                    trace!("{left} / {right}");
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<f64, ParseError> {
        // sign chains fold in a loop so `---…5` never recurses
        let mut negate = false;
        loop {
            match self.peek() {
                Some(Token::Plus) => self.current += 1,
                Some(Token::Minus) => {
                    self.current += 1;
                    negate = !negate;
                }
                _ => break,
            }
        }

        let value = self.operand()?;
        if negate {
            trace!("-{value}");
            Ok(-value)
        } else {
            Ok(value)
        }
    }

    fn operand(&mut self) -> Result<f64, ParseError> {
        match self.advance() {
            Some(Token::Number(text)) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(ParseError::InvalidNumber { text: text.clone() }),
            },
            Some(Token::LeftParen) => {
                let value = self.parenthesized()?;
                match self.peek() {
                    Some(Token::RightParen) => {
                        self.current += 1;
                        Ok(value)
                    }
                    _ => Err(ParseError::UnmatchedParenthesis),
                }
            }
            found => Err(ParseError::UnexpectedToken {
                found: found.cloned(),
            }),
        }
    }

    fn parenthesized(&mut self) -> Result<f64, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.expression();
        self.depth -= 1;
        result
    }
}
