#![cfg(test)]
crate::reexport!(context);
pub use rstest::*;

use crate::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer()
            .init();
    });
}

/// Parse a schema that must be valid, returning it with its warnings.
pub fn schema(sql: &str) -> (DatabaseInfo, CollectingReporter) {
    common_init();
    let mut warnings = CollectingReporter::default();
    match parse_schema(sql, &mut warnings) {
        Ok(database) => (database, warnings),
        Err(err) => panic!("schema should parse: {err}\n{sql}"),
    }
}

/// Parse a schema that must be rejected.
pub fn schema_error(sql: &str) -> ParseError {
    common_init();
    match parse_schema(sql, &mut SilentReporter) {
        Ok(_) => panic!("schema should be rejected:\n{sql}"),
        Err(err) => err,
    }
}

mod schema_context_tests {
    use super::*;

    #[test_context(SchemaContext)]
    #[test]
    fn fixture_parses(ctx: &mut SchemaContext) {
        assert_eq!(ctx.database.tables.len(), 2);
        assert!(ctx.warnings.is_empty());
        let address = ctx.table("address");
        assert_eq!(address.foreign_keys.len(), 1);
    }

    #[test_context(SchemaContext)]
    #[test]
    fn fixture_selects(ctx: &mut SchemaContext) {
        let query = ctx.select("SELECT name FROM contact").unwrap();
        assert_eq!(query.columns.len(), 1);
    }
}
