use crate::diagnostics::ErrorCode;
use crate::sql::{Position, Token};
use serde::Serialize;
use std::fmt::Display;

/// Result type of every tokenizer and parser entry point.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A fatal parse error.
///
/// `token` is `None` when the token stream was exhausted, or when the fault
/// sits inside a literal being scanned; `position` is then the offending
/// character (or `None` at end of input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error(
    "{code}: {message} at {}",
    .position.map_or_else(|| "end of input".to_string(), |p| p.to_string())
)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub token: Option<Token>,
    pub position: Option<Position>,
}

impl ParseError {
    /// Error raised at `token`.
    pub fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        Self {
            code,
            message: message.into(),
            token: Some(token.clone()),
            position: Some(token.position),
        }
    }

    /// Error raised at a source character that does not (yet) belong to a token.
    pub fn at_position(code: ErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self {
            code,
            message: message.into(),
            token: None,
            position: Some(position),
        }
    }

    /// The token stream ran out while `expected` was still required.
    pub fn end_of_input(expected: impl Display) -> Self {
        Self {
            code: ErrorCode::UnexpectedEndOfInput,
            message: format!("Unexpected end of input, expected {expected}"),
            token: None,
            position: None,
        }
    }

    /// `found` sits where `expected` was required.
    pub fn unexpected(expected: impl Display, found: &Token) -> Self {
        Self::new(
            ErrorCode::UnexpectedToken,
            format!("Expected {expected} but found '{}'", found.value),
            found,
        )
    }

    pub fn err<T>(self) -> ParseResult<T> {
        Err(self)
    }
}
