//! Token kind definitions for the SQL tokenizer.
//!
//! Keywords are not a separate kind: they are `Other` tokens compared
//! case-insensitively by the parsers (see `Token::is_keyword`). Only lexical
//! classes that change how a token is read are distinguished here.

use serde::Serialize;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Identifiers, keywords, punctuation, bind parameters.
    Other,
    /// `'...'`, quotes included in the token value.
    StringLiteral,
    /// Decimal, fractional, exponent or `0x` hexadecimal number.
    NumericLiteral,
    /// `x'...'` / `X'...'`.
    BlobLiteral,
    /// Symbolic operators plus the `AND` / `OR` keywords.
    Operator,
}

impl TokenKind {
    /// True for the three literal kinds.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral | TokenKind::NumericLiteral | TokenKind::BlobLiteral
        )
    }

    /// True if the token's text may be compared against keywords.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Other | TokenKind::Operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_classification() {
        assert!(TokenKind::StringLiteral.is_literal());
        assert!(TokenKind::NumericLiteral.is_literal());
        assert!(TokenKind::BlobLiteral.is_literal());
        assert!(!TokenKind::Other.is_literal());
        assert!(!TokenKind::Operator.is_literal());
    }

    #[test]
    fn word_classification() {
        assert!(TokenKind::Other.is_word());
        assert!(TokenKind::Operator.is_word());
        assert!(!TokenKind::StringLiteral.is_word());
    }
}
