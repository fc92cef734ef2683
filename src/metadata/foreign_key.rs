use super::*;

/// `ON DELETE` / `ON UPDATE` action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, Serialize)]
pub enum ForeignKeyAction {
    #[default]
    #[display("NO ACTION")]
    NoAction,
    #[display("RESTRICT")]
    Restrict,
    #[display("SET NULL")]
    SetNull,
    #[display("SET DEFAULT")]
    SetDefault,
    #[display("CASCADE")]
    Cascade,
}

/// A validated foreign key: local column indices reference a unique column
/// set of `foreign_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub columns: Vec<usize>,
    pub foreign_table: TableId,
    pub foreign_columns: Vec<usize>,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}
