//! Scanners for the literal forms that need more than a character class:
//! string, blob, numeric and quoted-identifier literals.
//!
//! Each scanner takes the full character buffer and the index of the first
//! character, and returns the index one past the literal. Failures carry the
//! index of the offending character so the tokenizer can turn it into a
//! positioned `ParseError`.

use crate::diagnostics::ErrorCode;

/// A scanning failure at character index `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexFault {
    pub code: ErrorCode,
    pub message: String,
    pub at: usize,
}

impl LexFault {
    fn new(code: ErrorCode, message: impl Into<String>, at: usize) -> Self {
        Self {
            code,
            message: message.into(),
            at,
        }
    }
}

pub type ScanResult = std::result::Result<usize, LexFault>;

/// `'...'` with backslash-escaped or doubled quotes.
pub fn scan_string(chars: &[char], start: usize) -> ScanResult {
    let mut i = start + 1;
    while i < chars.len() {
        match (chars[i], chars.get(i + 1)) {
            ('\\', Some('\'')) | ('\'', Some('\'')) => i += 2,
            ('\'', _) => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(LexFault::new(
        ErrorCode::UnterminatedString,
        "Unterminated string literal",
        start,
    ))
}

/// `x'0A1B'`: even number of hex digits between quotes.
pub fn scan_blob(chars: &[char], start: usize) -> ScanResult {
    let code = ErrorCode::InvalidBlobLiteral;
    let Some(&lead) = chars.get(start) else {
        return Err(LexFault::new(code, "Blob literal is empty", start));
    };
    if lead != 'x' && lead != 'X' {
        return Err(LexFault::new(
            code,
            "Blob literal must start with 'x' or 'X'",
            start,
        ));
    }
    if chars.get(start + 1) != Some(&'\'') {
        return Err(LexFault::new(
            code,
            "Blob literal is missing its opening quote",
            start + 1,
        ));
    }

    let mut digits = 0usize;
    let mut i = start + 2;
    while let Some(&c) = chars.get(i) {
        match c {
            '\'' if digits % 2 == 0 => return Ok(i + 1),
            '\'' => {
                return Err(LexFault::new(
                    code,
                    "Blob literal has an odd number of hexadecimal digits",
                    i,
                ));
            }
            c if c.is_ascii_hexdigit() => digits += 1,
            c => {
                return Err(LexFault::new(
                    code,
                    format!("Invalid character '{c}' in blob literal"),
                    i,
                ));
            }
        }
        i += 1;
    }
    Err(LexFault::new(code, "Unterminated blob literal", i))
}

/// Decimal (`12`, `1.5`, `.5`, `1e-3`) or hexadecimal (`0x1F`) number.
pub fn scan_number(chars: &[char], start: usize) -> ScanResult {
    let code = ErrorCode::InvalidNumericLiteral;
    let at = |i: usize| chars.get(i).copied();
    let mut i = start;

    if at(i) == Some('0') && matches!(at(i + 1), Some('x' | 'X')) {
        i += 2;
        while at(i).is_some_and(|c| c.is_ascii_hexdigit()) {
            i += 1;
        }
        if i == start + 2 {
            return Err(LexFault::new(code, "Hexadecimal literal has no digits", i));
        }
        if at(i) == Some('.') {
            return Err(LexFault::new(
                code,
                "Hexadecimal literal cannot have a fractional part",
                i,
            ));
        }
        return trailing(chars, i);
    }

    while at(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if at(i) == Some('.') {
        i += 1;
        while at(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if at(i) == Some('.') {
            return Err(LexFault::new(
                code,
                "Numeric literal has more than one decimal point",
                i,
            ));
        }
    }
    if matches!(at(i), Some('e' | 'E')) {
        i += 1;
        if matches!(at(i), Some('+' | '-')) {
            i += 1;
        }
        let digits_start = i;
        while at(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if i == digits_start {
            return Err(LexFault::new(code, "Exponent has no digits", i));
        }
        if at(i) == Some('.') {
            return Err(LexFault::new(code, "Decimal point after exponent", i));
        }
    }
    trailing(chars, i)
}

fn trailing(chars: &[char], i: usize) -> ScanResult {
    match chars.get(i) {
        Some(&c) if c.is_alphanumeric() || c == '_' => Err(LexFault::new(
            ErrorCode::InvalidNumericLiteral,
            format!("Invalid character '{c}' in numeric literal"),
            i,
        )),
        _ => Ok(i),
    }
}

/// `[name]`, `"name"` or `` `name` ``, read verbatim up to `close`.
pub fn scan_quoted_identifier(chars: &[char], start: usize, close: char) -> ScanResult {
    chars[start + 1..]
        .iter()
        .position(|&c| c == close)
        .map(|offset| start + 1 + offset + 1)
        .ok_or_else(|| {
            LexFault::new(
                ErrorCode::UnterminatedIdentifier,
                "Unterminated quoted identifier",
                start,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[rstest]
    #[case("x''", 3)]
    #[case("X'00'", 5)]
    #[case("x'0a1B2c3D'", 11)]
    #[case("x'ff' tail", 5)]
    fn blob_ok(#[case] text: &str, #[case] end: usize) {
        assert_eq!(scan_blob(&chars(text), 0), Ok(end));
    }

    #[rstest]
    #[case("", "Blob literal is empty", 0)]
    #[case("y'00'", "Blob literal must start with 'x' or 'X'", 0)]
    #[case("x00", "Blob literal is missing its opening quote", 1)]
    #[case("x'abc'", "Blob literal has an odd number of hexadecimal digits", 5)]
    #[case("x'0g'", "Invalid character 'g' in blob literal", 3)]
    #[case("x'00", "Unterminated blob literal", 4)]
    fn blob_errors(#[case] text: &str, #[case] message: &str, #[case] at: usize) {
        let fault = scan_blob(&chars(text), 0).unwrap_err();
        assert_eq!(fault.code, ErrorCode::InvalidBlobLiteral);
        assert_eq!((fault.message.as_str(), fault.at), (message, at));
    }

    #[rstest]
    #[case("42", 2)]
    #[case("3.14", 4)]
    #[case(".5", 2)]
    #[case("1.", 2)]
    #[case("1e10", 4)]
    #[case("1.5E-3", 6)]
    #[case("0x1F", 4)]
    #[case("12,", 2)]
    #[case("7)", 1)]
    fn number_ok(#[case] text: &str, #[case] end: usize) {
        assert_eq!(scan_number(&chars(text), 0), Ok(end));
    }

    #[rstest]
    #[case("0x", "Hexadecimal literal has no digits", 2)]
    #[case("0x1.5", "Hexadecimal literal cannot have a fractional part", 3)]
    #[case("1.2.3", "Numeric literal has more than one decimal point", 3)]
    #[case("1e", "Exponent has no digits", 2)]
    #[case("1e+x", "Exponent has no digits", 3)]
    #[case("1e5.0", "Decimal point after exponent", 3)]
    #[case("12ab", "Invalid character 'a' in numeric literal", 2)]
    fn number_errors(#[case] text: &str, #[case] message: &str, #[case] at: usize) {
        let fault = scan_number(&chars(text), 0).unwrap_err();
        assert_eq!(fault.code, ErrorCode::InvalidNumericLiteral);
        assert_eq!((fault.message.as_str(), fault.at), (message, at));
    }

    #[rstest]
    #[case("'abc'", 5)]
    #[case("'it''s'", 7)]
    #[case("'a\\'b'", 6)]
    #[case("'' rest", 2)]
    fn string_ok(#[case] text: &str, #[case] end: usize) {
        assert_eq!(scan_string(&chars(text), 0), Ok(end));
    }

    #[test]
    fn unterminated_string_points_at_opening_quote() {
        let fault = scan_string(&chars("  'abc"), 2).unwrap_err();
        assert_eq!(fault.code, ErrorCode::UnterminatedString);
        assert_eq!(fault.at, 2);
    }

    #[test]
    fn quoted_identifiers() {
        assert_eq!(scan_quoted_identifier(&chars("[a b] x"), 0, ']'), Ok(5));
        assert_eq!(scan_quoted_identifier(&chars("\"id\""), 0, '"'), Ok(4));
        let fault = scan_quoted_identifier(&chars("[abc"), 0, ']').unwrap_err();
        assert_eq!(fault.code, ErrorCode::UnterminatedIdentifier);
    }
}
