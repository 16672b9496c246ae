use std::fmt;

use log::trace;

use crate::error::LexError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, always `digits` or `digits.digits`.
    Number(String),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => write!(f, "{text}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// Splits `input` into tokens, left to right.
///
/// Spaces and tabs separate tokens and are otherwise dropped. Signs are
/// always emitted as operator tokens; `-5` is `Minus, Number("5")`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LeftParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RightParen);
                chars.next();
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        num_str.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if !is_well_formed_number(&num_str) {
                    return Err(LexError::MalformedNumber { text: num_str, position });
                }
                tokens.push(Token::Number(num_str));
            }
            _ => return Err(LexError::InvalidCharacter { ch: c, position }),
        }
    }

    trace!("tokenized {:?} into {} tokens", input, tokens.len());
    Ok(tokens)
}

fn is_well_formed_number(text: &str) -> bool {
    let mut parts = text.split('.');
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next();

    if parts.next().is_some() || int_part.is_empty() {
        return false;
    }
    match frac_part {
        Some(frac) => !frac.is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    #[test]
    fn tokens_follow_source_order() {
        let tokens = tokenize("(12 + 3.5) * -4 / 2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                num("12"),
                Token::Plus,
                num("3.5"),
                Token::RightParen,
                Token::Star,
                Token::Minus,
                num("4"),
                Token::Slash,
                num("2"),
            ]
        );
    }

    #[test]
    fn whitespace_and_tabs_are_dropped() {
        assert_eq!(tokenize(" 2 +\t3 ").unwrap(), tokenize("2+3").unwrap());
        assert!(tokenize("   ").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn whitespace_splits_numbers() {
        assert_eq!(tokenize("1 2").unwrap(), vec![num("1"), num("2")]);
    }

    #[test]
    fn invalid_character_reports_char_position() {
        assert_eq!(
            tokenize("2 + a"),
            Err(LexError::InvalidCharacter { ch: 'a', position: 4 })
        );
        // positions count chars, not bytes
        assert_eq!(
            tokenize("é+x"),
            Err(LexError::InvalidCharacter { ch: 'é', position: 0 })
        );
        assert_eq!(
            tokenize("1+\n2"),
            Err(LexError::InvalidCharacter { ch: '\n', position: 2 })
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for (input, text, position) in [
            (".", ".", 0),
            ("1 + .5", ".5", 4),
            ("5.", "5.", 0),
            ("1.2.3", "1.2.3", 0),
            ("(7..1)", "7..1", 1),
        ] {
            assert_eq!(
                tokenize(input),
                Err(LexError::MalformedNumber { text: text.to_string(), position }),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn leading_zeros_are_kept_verbatim() {
        assert_eq!(tokenize("007.50").unwrap(), vec![num("007.50")]);
    }
}
