use derive_more::Display;
use serde::Serialize;

/// SQLite's five-way column type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeAffinity {
    #[display("TEXT")]
    Text,
    #[display("NUMERIC")]
    Numeric,
    #[display("INTEGER")]
    Integer,
    #[display("REAL")]
    Real,
    #[display("BLOB")]
    Blob,
}

impl TypeAffinity {
    /// Affinity of a declared column type, following SQLite's rules in order:
    /// 1. contains `INT` -> INTEGER
    /// 2. contains `CHAR`, `CLOB` or `TEXT` -> TEXT
    /// 3. contains `BLOB`, or no type at all -> BLOB
    /// 4. contains `REAL`, `FLOA` or `DOUB` -> REAL
    /// 5. otherwise NUMERIC
    pub fn from_declared_type(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();
        let has = |needle: &str| upper.contains(needle);
        if has("INT") {
            TypeAffinity::Integer
        } else if has("CHAR") || has("CLOB") || has("TEXT") {
            TypeAffinity::Text
        } else if has("BLOB") || upper.trim().is_empty() {
            TypeAffinity::Blob
        } else if has("REAL") || has("FLOA") || has("DOUB") {
            TypeAffinity::Real
        } else {
            TypeAffinity::Numeric
        }
    }

    /// Rust type used for values of this affinity in generated code.
    pub const fn output_type(self) -> &'static str {
        match self {
            TypeAffinity::Text => "String",
            TypeAffinity::Numeric => "f64",
            TypeAffinity::Integer => "i64",
            TypeAffinity::Real => "f64",
            TypeAffinity::Blob => "Vec<u8>",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("INT", TypeAffinity::Integer)]
    #[case("integer", TypeAffinity::Integer)]
    #[case("TINYINT", TypeAffinity::Integer)]
    #[case("UNSIGNED BIG INT", TypeAffinity::Integer)]
    #[case("CHARINT", TypeAffinity::Integer)]
    #[case("Text", TypeAffinity::Text)]
    #[case("VARCHAR(255)", TypeAffinity::Text)]
    #[case("NATIVE CHARACTER(70)", TypeAffinity::Text)]
    #[case("CLOB", TypeAffinity::Text)]
    #[case("BLOB", TypeAffinity::Blob)]
    #[case("", TypeAffinity::Blob)]
    #[case("REAL", TypeAffinity::Real)]
    #[case("DOUBLE PRECISION", TypeAffinity::Real)]
    #[case("FLOAT", TypeAffinity::Real)]
    #[case("NUMERIC", TypeAffinity::Numeric)]
    #[case("DECIMAL(10,5)", TypeAffinity::Numeric)]
    #[case("BOOLEAN", TypeAffinity::Numeric)]
    #[case("DATETIME", TypeAffinity::Numeric)]
    #[case("STRING", TypeAffinity::Numeric)]
    #[case("FLOATING POINT", TypeAffinity::Integer)]
    fn sqlite_affinity_rules(#[case] declared: &str, #[case] expected: TypeAffinity) {
        assert_eq!(TypeAffinity::from_declared_type(declared), expected);
    }

    #[test]
    fn display_is_sql_name() {
        assert_eq!(TypeAffinity::Text.to_string(), "TEXT");
        assert_eq!(TypeAffinity::Blob.to_string(), "BLOB");
    }
}
