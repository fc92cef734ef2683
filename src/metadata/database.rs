use super::*;

/// Index of a table inside its `DatabaseInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TableId(pub usize);

/// The parse-session registry: tables in declaration order. Tables are only
/// ever appended.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    pub tables: Vec<Table>,
}

impl DatabaseInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, empty table and return its id.
    pub fn add_table(&mut self, sql_name: impl Into<String>) -> TableId {
        let id = TableId(self.tables.len());
        self.tables.push(Table::new(id, sql_name));
        id
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id.0]
    }

    /// Case-insensitive lookup by SQL name.
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.is_named(name))
    }

    pub fn find_by_output_name(&self, output_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.output_name == output_name)
    }

    /// The table owning `column`.
    pub fn owner(&self, column: &Column) -> &Table {
        self.table(column.table)
    }
}
