use super::*;

/// Why a primary key or unique constraint cannot be added to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintConflict {
    /// The table (or one of its columns) already has a primary key.
    PrimaryKeyExists,
    /// The single column is already declared unique.
    AlreadyUnique(String),
    /// The unique set is exactly the primary key.
    MatchesPrimaryKey,
    /// The single column is part of a composite primary key.
    InPrimaryKey(String),
    /// The column set is exactly an existing unique set.
    MatchesUnique,
}

/// Names of the implicit rowid column, usable unless the table is `WITHOUT ROWID`.
pub const ROWID_NAMES: [&str; 3] = ["rowid", "oid", "_rowid_"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub id: TableId,
    pub sql_name: String,
    pub output_name: String,
    // Declaration order; sql names are unique per table.
    pub columns: Vec<Column>,
    /// Source text of the `CREATE TABLE` statement, terminating `;` included.
    pub create_table_text: String,
    pub is_temporary: bool,
    /// Column indices, in constraint order.
    pub primary_key: Vec<usize>,
    /// Multi-column unique constraints, as column indices.
    pub unique_sets: Vec<Vec<usize>>,
    pub foreign_keys: Vec<ForeignKey>,
    pub without_rowid: bool,
    pub strict: bool,
}

impl Table {
    pub fn new(id: TableId, sql_name: impl Into<String>) -> Self {
        let sql_name = sql_name.into();
        Self {
            id,
            output_name: output_name(&sql_name),
            sql_name,
            columns: Vec::new(),
            create_table_text: String::new(),
            is_temporary: false,
            primary_key: Vec::new(),
            unique_sets: Vec::new(),
            foreign_keys: Vec::new(),
            without_rowid: false,
            strict: false,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.sql_name.eq_ignore_ascii_case(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.is_named(name))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_named(name))
    }

    /// True for a declared column or, in a rowid table, an implicit rowid name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
            || (!self.without_rowid && ROWID_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name)))
    }

    /// Declared column `name`, or a synthesized `INTEGER NOT NULL` column for
    /// an implicit rowid name.
    pub fn column_or_rowid(&self, name: &str) -> Option<Column> {
        if let Some(column) = self.column(name) {
            return Some(column.clone());
        }
        if !self.has_column(name) {
            return None;
        }
        let mut rowid = Column::new(self.id, name, "INTEGER");
        rowid.not_null = true;
        Some(rowid)
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty() || self.columns.iter().any(|c| c.primary_key)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_key.iter().map(|&i| &self.columns[i])
    }

    /// True if values of exactly this column set are unique: it is the
    /// primary key, a single unique column, or a declared unique set.
    /// Order does not matter.
    pub fn is_unique_by(&self, columns: &[usize]) -> bool {
        if columns.is_empty() {
            return false;
        }
        if let [single] = columns {
            let column = &self.columns[*single];
            if column.unique || column.primary_key {
                return true;
            }
        }
        same_set(&self.primary_key, columns)
            || self.unique_sets.iter().any(|set| same_set(set, columns))
    }

    /// Declare the primary key. A single column also gets its flag set.
    pub fn set_primary_key(&mut self, columns: Vec<usize>) -> Result<(), ConstraintConflict> {
        if self.has_primary_key() {
            return Err(ConstraintConflict::PrimaryKeyExists);
        }
        match columns.as_slice() {
            [single] => {
                let column = &mut self.columns[*single];
                if column.unique {
                    return Err(ConstraintConflict::AlreadyUnique(column.sql_name.clone()));
                }
                column.primary_key = true;
            }
            _ => {
                if self.unique_sets.iter().any(|set| same_set(set, &columns)) {
                    return Err(ConstraintConflict::MatchesUnique);
                }
            }
        }
        self.primary_key = columns;
        Ok(())
    }

    /// Declare a unique constraint. A single column gets its flag set;
    /// several columns are stored as a unique set.
    pub fn add_unique(&mut self, columns: Vec<usize>) -> Result<(), ConstraintConflict> {
        if same_set(&self.primary_key, &columns) {
            return Err(ConstraintConflict::MatchesPrimaryKey);
        }
        match columns.as_slice() {
            [single] => {
                let in_primary_key = self.primary_key.contains(single);
                let column = &mut self.columns[*single];
                if column.primary_key {
                    return Err(ConstraintConflict::MatchesPrimaryKey);
                }
                if in_primary_key {
                    return Err(ConstraintConflict::InPrimaryKey(column.sql_name.clone()));
                }
                if column.unique {
                    return Err(ConstraintConflict::AlreadyUnique(column.sql_name.clone()));
                }
                column.unique = true;
            }
            _ => {
                if self.unique_sets.iter().any(|set| same_set(set, &columns)) {
                    return Err(ConstraintConflict::MatchesUnique);
                }
                self.unique_sets.push(columns);
            }
        }
        Ok(())
    }

    pub fn column_names(&self, columns: &[usize]) -> String {
        columns
            .iter()
            .map(|&i| self.columns[i].sql_name.as_str())
            .join(", ")
    }
}

fn same_set(a: &[usize], b: &[usize]) -> bool {
    !a.is_empty() && a.len() == b.len() && a.iter().sorted().eq(b.iter().sorted())
}
