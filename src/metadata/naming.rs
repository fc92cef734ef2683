//! Derivation of identifier-safe output names from SQL identifiers.

use itertools::Itertools;

/// Pascal-case output name: `email_address` -> `EmailAddress`,
/// `[first name]` -> `FirstName`, `ID` -> `Id`.
///
/// Parts made only of upper-case letters and digits are normalized to
/// `Xxxx`; other parts keep their inner casing (`firstName` -> `FirstName`).
/// A leading `_` is added when the name would be empty or start with a digit.
pub fn output_name(sql_name: &str) -> String {
    let mut name = sql_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .join("");
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Camel-case variant used for bind parameters: `user_id` -> `userId`.
pub fn parameter_name(sql_name: &str) -> String {
    let pascal = output_name(sql_name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}

fn capitalize(part: &str) -> String {
    let normalized = if part.chars().count() > 1 && !part.chars().any(char::is_lowercase) {
        part.to_lowercase()
    } else {
        part.to_string()
    };
    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => normalized,
    }
}
