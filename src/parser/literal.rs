use crate::diagnostics::{ParseError, ParseResult};
use crate::parser::Cursor;
use crate::sql::{Keyword, Token, TokenKind};

/// Keywords that are literal values on their own.
pub const LITERAL_KEYWORDS: [Keyword; 6] = [
    Keyword::Null,
    Keyword::True,
    Keyword::False,
    Keyword::CurrentTime,
    Keyword::CurrentDate,
    Keyword::CurrentTimestamp,
];

/// Consume a literal value if one starts here.
pub fn literal_value<'t>(cursor: &mut Cursor<'t>) -> Option<&'t Token> {
    let token = cursor.peek()?;
    let is_literal = token.kind.is_literal()
        || LITERAL_KEYWORDS.iter().any(|k| token.is_keyword(*k));
    if !is_literal {
        return None;
    }
    cursor.advance("a literal").ok()
}

/// Consume `[+|-] <numeric-literal>` if a number starts here, returning its
/// text with the sign attached. A sign not followed by a number is an error.
pub fn signed_number(cursor: &mut Cursor<'_>) -> ParseResult<Option<String>> {
    let Some(token) = cursor.peek() else {
        return Ok(None);
    };
    let sign = if token.is("+") || token.is("-") {
        cursor.advance("a sign")?;
        Some(token.value.as_str())
    } else {
        None
    };
    let number = match sign {
        Some(_) => cursor.advance("a numeric literal")?,
        None if token.kind == TokenKind::NumericLiteral => cursor.advance("a numeric literal")?,
        None => return Ok(None),
    };
    if number.kind != TokenKind::NumericLiteral {
        return ParseError::unexpected("a numeric literal", number).err();
    }
    Ok(Some(format!("{}{}", sign.unwrap_or_default(), number.value)))
}
