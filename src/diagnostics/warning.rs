use crate::diagnostics::WarningCode;
use crate::sql::{Position, Token};
use serde::Serialize;

/// A non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, Serialize)]
#[display("{code}: {message}{}", position.map(|p| format!(" at {p}")).unwrap_or_default())]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    pub position: Option<Position>,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>, token: Option<&Token>) -> Self {
        Self {
            code,
            message: message.into(),
            position: token.map(|t| t.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::TokenKind;

    #[test]
    fn display_includes_position_when_known() {
        let token = Token::new("german", TokenKind::Other, Position::new(30, 2, 7));
        let warning = Warning::new(WarningCode::UnknownCollation, "Unknown collation 'german'", Some(&token));
        assert_eq!(
            warning.to_string(),
            format!("{}: Unknown collation 'german' at line 3, column 8", WarningCode::UnknownCollation)
        );
        let bare = Warning::new(WarningCode::MatchNotEnforced, "MATCH FULL is parsed but not enforced", None);
        assert!(bare.to_string().ends_with("not enforced"));
    }
}
