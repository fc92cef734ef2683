use crate::testing::*;
pub use test_context::{TestContext, test_context};

/// Two related tables used across parser and query tests.
pub const CONTACT_SCHEMA: &str = "
CREATE TABLE contact (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE COLLATE NOCASE,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE address (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER NOT NULL REFERENCES contact ON DELETE CASCADE,
    street TEXT,
    city TEXT NOT NULL,
    zip VARCHAR(10)
);
";

pub struct SchemaContext {
    pub database: DatabaseInfo,
    pub warnings: CollectingReporter,
}

impl SchemaContext {
    pub fn select(&mut self, sql: &str) -> ParseResult<QueryInfo> {
        parse_select(sql, &self.database, &mut self.warnings)
    }

    pub fn table(&self, name: &str) -> &Table {
        self.database
            .find_table(name)
            .unwrap_or_else(|| panic!("fixture has no table '{name}'"))
    }
}

impl TestContext for SchemaContext {
    fn setup() -> Self {
        let (database, warnings) = schema(CONTACT_SCHEMA);
        Self { database, warnings }
    }
}
