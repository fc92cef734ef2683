use crate::diagnostics::{ParseResult, Reporter, Warning, WarningCode};
use crate::metadata::TypeAffinity;
use crate::parser::Cursor;

/// Collating sequences built into SQLite.
pub const BUILTIN_COLLATIONS: [&str; 3] = ["BINARY", "NOCASE", "RTRIM"];

/// Parse the name following `COLLATE`.
///
/// Unknown names are reported, not rejected. When the collation applies to a
/// column, `affinity` is that column's affinity and anything but `TEXT` is
/// reported as well.
pub fn collation(
    cursor: &mut Cursor<'_>,
    reporter: &mut dyn Reporter,
    affinity: Option<TypeAffinity>,
) -> ParseResult<String> {
    let token = cursor.expect_identifier("a collation name")?;
    let name = token.unquoted();
    if !BUILTIN_COLLATIONS.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
        reporter.report(Warning::new(
            WarningCode::UnknownCollation,
            format!("Unknown collation '{name}'"),
            Some(token),
        ));
    }
    if let Some(affinity) = affinity.filter(|a| *a != TypeAffinity::Text) {
        reporter.report(Warning::new(
            WarningCode::CollateOnNonText,
            format!("COLLATE {name} applied to a column with {affinity} affinity"),
            Some(token),
        ));
    }
    Ok(name)
}
