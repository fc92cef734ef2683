//! Token model tying a value and `TokenKind` to its source position.
//!
//! Positions exist so that diagnostics can point at exact source spans:
//! - `absolute` is a character offset into the original text;
//! - `line` / `column` are 0-based, `line` increments on `\n`.
//!
//! Tokens are immutable once produced; a token stream is in document order.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};
use serde::Serialize;

/// A 0-based source location, displayed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, Serialize)]
#[display("line {}, column {}", line + 1, column + 1)]
pub struct Position {
    pub absolute: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(absolute: usize, line: usize, column: usize) -> Self {
        Self {
            absolute,
            line,
            column,
        }
    }
}

/// A lexical token.
///
/// `value` is the verbatim source text: string, blob and quoted-identifier
/// tokens keep their quotes. Use `unquoted` for the bare identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub position: Position,
    pub is_binary_operator: bool,
    pub is_unary_operator: bool,
}

impl Token {
    /// Construct a non-operator token.
    pub fn new(value: impl Into<String>, kind: TokenKind, position: Position) -> Self {
        Self {
            value: value.into(),
            kind,
            position,
            is_binary_operator: false,
            is_unary_operator: false,
        }
    }

    /// Construct an operator token with its arity flags.
    pub fn operator(value: impl Into<String>, position: Position, binary: bool, unary: bool) -> Self {
        Self {
            value: value.into(),
            kind: TokenKind::Operator,
            position,
            is_binary_operator: binary,
            is_unary_operator: unary,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Absolute offset one past the last character of the token.
    pub fn end(&self) -> usize {
        self.position.absolute + self.len()
    }

    /// Lower-cased value, for case-insensitive keyword comparison.
    pub fn lower(&self) -> String {
        self.value.to_ascii_lowercase()
    }

    /// True if this token spells `kw` (any case). Literals never match.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_word() && self.value.eq_ignore_ascii_case(kw.as_str())
    }

    /// The recognized keyword, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        if !self.kind.is_word() {
            return None;
        }
        Keyword::from_lower(&self.lower())
    }

    /// True for the exact punctuation or operator text `symbol`.
    pub fn is(&self, symbol: &str) -> bool {
        !self.kind.is_literal() && self.value == symbol
    }

    /// True if the value is wrapped in `[]`, `""` or backquotes.
    pub fn is_quoted_identifier(&self) -> bool {
        self.kind == TokenKind::Other && unquote_pair(&self.value).is_some()
    }

    /// True for tokens usable as a table/column name: a quoted identifier,
    /// or a word that is neither punctuation nor a bind parameter.
    pub fn is_identifier(&self) -> bool {
        if self.kind != TokenKind::Other {
            return false;
        }
        if self.is_quoted_identifier() {
            return true;
        }
        self.value
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    /// Identifier with its quoting removed; string literals lose their quotes
    /// and escapes. Other tokens are returned unchanged.
    pub fn unquoted(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => unescape_string(&self.value),
            TokenKind::Other => unquote_pair(&self.value)
                .map(str::to_string)
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}

fn unquote_pair(value: &str) -> Option<&str> {
    let mut chars = value.chars();
    let (first, last) = (chars.next()?, chars.next_back()?);
    match (first, last) {
        ('[', ']') | ('"', '"') | ('`', '`') => Some(&value[1..value.len() - 1]),
        _ => None,
    }
}

fn unescape_string(value: &str) -> String {
    let inner = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some('\'')) | ('\'', Some('\'')) => {
                out.push('\'');
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
