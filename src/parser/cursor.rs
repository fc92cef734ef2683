use crate::diagnostics::{ParseError, ParseResult};
use crate::sql::{Keyword, Token};
use itertools::Itertools;
use std::fmt::Display;

/// Read position over an immutable token slice.
///
/// Every parser takes the cursor by `&mut`; running out of tokens while
/// something is still required is `ErrorCode::UnexpectedEndOfInput`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    /// The token `n` places ahead; `peek_nth(0) == peek()`.
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.index + n)
    }

    pub fn previous(&self) -> Option<&'t Token> {
        self.index.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The current token; fails at end of input.
    pub fn current(&self, expected: impl Display) -> ParseResult<&'t Token> {
        self.peek().ok_or_else(|| ParseError::end_of_input(expected))
    }

    /// Consume and return the current token.
    pub fn advance(&mut self, expected: impl Display) -> ParseResult<&'t Token> {
        let token = self.current(expected)?;
        self.index += 1;
        Ok(token)
    }

    pub fn check(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is(symbol))
    }

    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    pub fn check_nth_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_nth(n).is_some_and(|t| t.is_keyword(keyword))
    }

    /// Consume the current token if it is `symbol`.
    pub fn eat(&mut self, symbol: &str) -> bool {
        let found = self.check(symbol);
        if found {
            self.index += 1;
        }
        found
    }

    /// Consume the current token if it spells `keyword`.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.index += 1;
        }
        found
    }

    /// Consume the first of `keywords` found at the current position.
    pub fn eat_any_keyword(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        let found = keywords.iter().copied().find(|k| self.check_keyword(*k))?;
        self.index += 1;
        Some(found)
    }

    pub fn expect(&mut self, symbol: &str) -> ParseResult<&'t Token> {
        let expected = format!("'{symbol}'");
        let token = self.current(&expected)?;
        if !token.is(symbol) {
            return ParseError::unexpected(expected, token).err();
        }
        self.index += 1;
        Ok(token)
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<&'t Token> {
        let token = self.current(keyword)?;
        if !token.is_keyword(keyword) {
            return ParseError::unexpected(keyword, token).err();
        }
        self.index += 1;
        Ok(token)
    }

    /// Consume the first of `keywords`, or fail listing all of them.
    pub fn expect_any_keyword(&mut self, keywords: &[Keyword]) -> ParseResult<Keyword> {
        let expected = || keywords.iter().join(" or ");
        let token = self.current(expected())?;
        match self.eat_any_keyword(keywords) {
            Some(keyword) => Ok(keyword),
            None => ParseError::unexpected(expected(), token).err(),
        }
    }

    /// Consume an identifier token (bare or quoted) naming `what`.
    pub fn expect_identifier(&mut self, what: &str) -> ParseResult<&'t Token> {
        let token = self.current(what)?;
        if !token.is_identifier() {
            return ParseError::unexpected(what, token).err();
        }
        self.index += 1;
        Ok(token)
    }

    /// Consume a parenthesized group, nesting included, and return the
    /// tokens strictly inside it. String literals are single tokens, so
    /// parentheses inside them never count.
    pub fn skip_balanced(&mut self) -> ParseResult<&'t [Token]> {
        self.expect("(")?;
        let start = self.index;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance("')'")?;
            if token.is("(") {
                depth += 1;
            } else if token.is(")") {
                depth -= 1;
            }
        }
        Ok(&self.tokens[start..self.index - 1])
    }
}
