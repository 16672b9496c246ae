use thiserror::Error;

use crate::lexer::Token;

/// Errors raised while turning an expression string into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot start or continue any token.
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// 0-based char index in the input.
        position: usize,
    },
    /// A numeric literal that is not of the form `digits[.digits]`.
    #[error("malformed number '{text}' at position {position}")]
    MalformedNumber {
        /// The literal text as scanned.
        text: String,
        /// 0-based char index where the literal starts.
        position: usize,
    },
}

/// Errors raised while parsing and evaluating a token stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("missing closing parenthesis")]
    UnmatchedParenthesis,

    #[error("unexpected '{found}' after end of expression")]
    TrailingTokens { found: Token },

    #[error("{}", unexpected_message(.found))]
    UnexpectedToken { found: Option<Token> },

    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

fn unexpected_message(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("unexpected '{token}', expected a number or '('"),
        None => "unexpected end of expression, expected a number or '('".to_string(),
    }
}

/// The stage of a calculation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexing,
    Parsing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexing => write!(f, "lexing"),
            Self::Parsing => write!(f, "parsing"),
        }
    }
}

/// Everything [`Calculator::calculate`](crate::Calculator::calculate) can fail with.
///
/// Lexer and parser errors are kept intact and tagged with the phase that
/// produced them; the original error is reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("lexing error: {0}")]
    Lexing(#[source] LexError),

    #[error("parsing error: {0}")]
    Parsing(#[source] ParseError),
}

impl CalcError {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::EmptyExpression => None,
            Self::Lexing(_) => Some(Phase::Lexing),
            Self::Parsing(_) => Some(Phase::Parsing),
        }
    }
}

impl From<LexError> for CalcError {
    fn from(e: LexError) -> Self {
        Self::Lexing(e)
    }
}

impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self {
        Self::Parsing(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_culprit() {
        let e = LexError::InvalidCharacter { ch: 'a', position: 4 };
        assert_eq!(e.to_string(), "invalid character 'a' at position 4");

        let e = ParseError::TrailingTokens { found: Token::RightParen };
        assert_eq!(e.to_string(), "unexpected ')' after end of expression");

        let e = ParseError::UnexpectedToken { found: None };
        assert!(e.to_string().starts_with("unexpected end of expression"));

        let e = ParseError::UnexpectedToken { found: Some(Token::Star) };
        assert!(e.to_string().starts_with("unexpected '*'"));
    }

    #[test]
    fn calc_error_keeps_phase_and_source() {
        let e = CalcError::from(ParseError::DivisionByZero);
        assert_eq!(e.phase(), Some(Phase::Parsing));
        assert_eq!(e.to_string(), "parsing error: division by zero");
        assert_eq!(e.source().map(|s| s.to_string()), Some("division by zero".to_string()));

        let e = CalcError::from(LexError::InvalidCharacter { ch: '$', position: 0 });
        assert_eq!(e.phase(), Some(Phase::Lexing));

        assert_eq!(CalcError::EmptyExpression.phase(), None);
        assert!(CalcError::EmptyExpression.source().is_none());
    }
}
