use crate::diagnostics::{ParseError, ParseResult};
use crate::parser::{Cursor, signed_number};
use crate::sql::{Keyword, Token};
use itertools::Itertools;

/// Keywords that end the words of a type name and start a column constraint.
const CONSTRAINT_STARTS: [Keyword; 11] = [
    Keyword::Constraint,
    Keyword::Primary,
    Keyword::Not,
    Keyword::Null,
    Keyword::Unique,
    Keyword::Check,
    Keyword::Default,
    Keyword::Collate,
    Keyword::References,
    Keyword::Generated,
    Keyword::As,
];

fn is_type_word(token: &Token) -> bool {
    token.is_identifier() && !CONSTRAINT_STARTS.iter().any(|k| token.is_keyword(*k))
}

/// Parse `<word>+ [( <signed-number> [, <signed-number>] )]`.
///
/// Words are joined by single spaces and the size arguments appended without
/// spaces, e.g. `unsigned big int`, `VARCHAR(255)`, `DECIMAL(10,5)`. Returns
/// `None` when no type name starts here.
pub fn type_name(cursor: &mut Cursor<'_>) -> ParseResult<Option<String>> {
    let mut words = Vec::new();
    while let Some(token) = cursor.peek().filter(|t| is_type_word(t)) {
        words.push(token.value.as_str());
        cursor.advance("a type name")?;
    }
    if words.is_empty() {
        return Ok(None);
    }
    let mut text = words.iter().join(" ");

    if cursor.eat("(") {
        let mut sizes = vec![size(cursor)?];
        if cursor.eat(",") {
            sizes.push(size(cursor)?);
        }
        cursor.expect(")")?;
        text.push_str(&format!("({})", sizes.join(",")));
    }
    Ok(Some(text))
}

fn size(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    match signed_number(cursor)? {
        Some(number) => Ok(number),
        None => {
            let token = cursor.current("a type size")?;
            ParseError::unexpected("a type size", token).err()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;
    use rstest::rstest;

    #[rstest]
    #[case("Text", Some("Text"), 1)]
    #[case("VARCHAR ( 255 )", Some("VARCHAR(255)"), 4)]
    #[case("decimal(10, -5)", Some("decimal(10,-5)"), 7)]
    #[case("unsigned big int not null", Some("unsigned big int"), 3)]
    #[case("PRIMARY KEY", None, 0)]
    #[case(", b", None, 0)]
    fn parses_type_names(#[case] sql: &str, #[case] expected: Option<&str>, #[case] consumed: usize) {
        let tokens = tokenize(sql).unwrap();
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(type_name(&mut cursor).unwrap().as_deref(), expected);
        assert_eq!(cursor.index(), consumed);
    }

    #[test]
    fn size_must_be_numeric() {
        let tokens = tokenize("CHAR(n)").unwrap();
        let err = type_name(&mut Cursor::new(&tokens)).unwrap_err();
        assert_eq!(err.message, "Expected a type size but found 'n'");
    }
}
