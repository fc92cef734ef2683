use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::metadata::parameter_name;
use crate::sql::{Token, TokenKind};
use serde::Serialize;

const NAMED_PREFIXES: [char; 3] = [':', '@', '$'];

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER`.
pub const MAX_PARAMETER_NUMBER: u32 = 32766;

/// A bind parameter. `number` is the 1-based SQLite parameter index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub number: u32,
    pub output_name: String,
    /// Source spelling (`:name`, `@name`, `$name`); `None` for `?` and `?N`.
    pub sql_name: Option<String>,
}

/// Parameter numbering context of one parse session.
///
/// `?` takes `highest + 1`; `?N` reserves `N`; named parameters take the next
/// number the first time they are seen and reuse it afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Sorted by number.
    pub parameters: Vec<Parameter>,
    pub highest_parameter_number: u32,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `token` is spelled like a bind parameter.
    pub fn is_parameter(token: &Token) -> bool {
        token.kind == TokenKind::Other
            && token
                .value
                .starts_with(|c: char| c == '?' || NAMED_PREFIXES.contains(&c))
    }

    pub fn parameter(&self, number: u32) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.number == number)
    }

    /// Register the parameter spelled by `token`, returning its number.
    pub fn register(&mut self, token: &Token) -> ParseResult<u32> {
        let value = token.value.as_str();
        if value == "?" {
            let number = self.next_number(token)?;
            return self.insert(number, format!("param{number}"), None, token);
        }
        if let Some(digits) = value.strip_prefix('?') {
            return self.numbered(digits, token);
        }

        let name = &value[1..];
        if name.is_empty() {
            return ParseError::new(
                ErrorCode::InvalidParameter,
                format!("Parameter '{value}' has no name"),
                token,
            )
            .err();
        }
        if let Some(existing) = self
            .parameters
            .iter()
            .find(|p| p.sql_name.as_deref() == Some(value))
        {
            return Ok(existing.number);
        }
        let number = self.next_number(token)?;
        self.insert(number, parameter_name(name), Some(value.to_string()), token)
    }

    fn numbered(&mut self, digits: &str, token: &Token) -> ParseResult<u32> {
        let invalid = |message: String| ParseError::new(ErrorCode::InvalidParameter, message, token);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(format!(
                "Parameter number in '{}' must be a non-negative integer",
                token.value
            )));
        }
        let number: u32 = digits
            .parse()
            .map_err(|_| invalid(format!("Parameter number '{digits}' is too large")))?;
        if number == 0 {
            return Err(invalid("Parameter numbers start at 1".to_string()));
        }
        if number > MAX_PARAMETER_NUMBER {
            return Err(invalid(format!(
                "Parameter number {number} exceeds the maximum of {MAX_PARAMETER_NUMBER}"
            )));
        }
        if self.parameter(number).is_some() {
            return Ok(number);
        }
        self.insert(number, format!("param{number}"), None, token)
    }

    /// Number for a parameter that does not name one itself.
    fn next_number(&self, token: &Token) -> ParseResult<u32> {
        match self.highest_parameter_number.checked_add(1) {
            Some(number) if number <= MAX_PARAMETER_NUMBER => Ok(number),
            _ => ParseError::new(
                ErrorCode::InvalidParameter,
                format!(
                    "Parameter '{}' would exceed the maximum parameter number {MAX_PARAMETER_NUMBER}",
                    token.value
                ),
                token,
            )
            .err(),
        }
    }

    fn insert(
        &mut self,
        number: u32,
        output_name: String,
        sql_name: Option<String>,
        token: &Token,
    ) -> ParseResult<u32> {
        if let Some(other) = self.parameters.iter().find(|p| p.output_name == output_name) {
            let other_name = other
                .sql_name
                .clone()
                .unwrap_or_else(|| format!("?{}", other.number));
            return ParseError::new(
                ErrorCode::ParameterNameCollision,
                format!(
                    "Parameter '{}' has the same output name '{output_name}' as parameter '{other_name}'",
                    token.value
                ),
                token,
            )
            .err();
        }
        let index = self.parameters.partition_point(|p| p.number < number);
        self.parameters.insert(
            index,
            Parameter {
                number,
                output_name,
                sql_name,
            },
        );
        self.highest_parameter_number = self.highest_parameter_number.max(number);
        Ok(number)
    }
}
