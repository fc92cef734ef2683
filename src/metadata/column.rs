use super::*;

/// A column of a `Table`.
///
/// `table` is a non-owning link back to the owning table inside the
/// `DatabaseInfo` registry. Constraint parsing mutates the flags while the
/// owning table is being parsed; columns are never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub sql_name: String,
    /// Declared type text, normalized to single spaces; empty when absent.
    pub sql_type: String,
    pub output_name: String,
    pub affinity: TypeAffinity,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub collation: Option<String>,
    pub table: TableId,
}

impl Column {
    pub fn new(table: TableId, sql_name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        let sql_name = sql_name.into();
        let sql_type = sql_type.into();
        Self {
            output_name: output_name(&sql_name),
            affinity: TypeAffinity::from_declared_type(&sql_type),
            sql_name,
            sql_type,
            not_null: false,
            primary_key: false,
            auto_increment: false,
            unique: false,
            collation: None,
            table,
        }
    }

    /// True if the SQL name matches, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.sql_name.eq_ignore_ascii_case(name)
    }

    /// A single-column `INTEGER PRIMARY KEY` aliases the rowid and is never null.
    pub fn is_rowid_alias(&self) -> bool {
        self.primary_key && self.sql_type.eq_ignore_ascii_case("INTEGER")
    }

    /// Rust type of this column's values in generated code.
    pub fn output_type(&self) -> String {
        let base = self.affinity.output_type();
        if self.not_null || self.is_rowid_alias() {
            base.to_string()
        } else {
            format!("Option<{base}>")
        }
    }
}
