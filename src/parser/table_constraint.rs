use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::metadata::{ConstraintConflict, Table, TableId};
use crate::parser::{Cursor, SchemaParser, collation, conflict_clause};
use crate::sql::{Keyword, Token};

/// Turn a rejected primary key or unique constraint into a parse error at `token`.
pub(crate) fn conflict_error(
    table: &Table,
    conflict: ConstraintConflict,
    columns: &[usize],
    token: &Token,
) -> ParseError {
    let (code, message) = match conflict {
        ConstraintConflict::PrimaryKeyExists => (
            ErrorCode::DuplicatePrimaryKey,
            "Table already has a primary key".to_string(),
        ),
        ConstraintConflict::AlreadyUnique(column) => (
            ErrorCode::DuplicateUniqueConstraint,
            format!("Column '{column}' is already unique"),
        ),
        ConstraintConflict::MatchesPrimaryKey => (
            ErrorCode::DuplicateUniqueConstraint,
            format!("Table already has a primary key on ({})", table.column_names(columns)),
        ),
        ConstraintConflict::InPrimaryKey(column) => (
            ErrorCode::DuplicateUniqueConstraint,
            format!(
                "Table already has a primary key on ({}) which includes column '{column}'",
                table.column_names(&table.primary_key)
            ),
        ),
        ConstraintConflict::MatchesUnique => (
            ErrorCode::DuplicateUniqueConstraint,
            format!(
                "Table already has a unique constraint on ({})",
                table.column_names(columns)
            ),
        ),
    };
    ParseError::new(code, message, token)
}

impl SchemaParser<'_> {
    /// `[CONSTRAINT name] PRIMARY KEY (...) | UNIQUE (...) | CHECK (...) |
    /// FOREIGN KEY (...) REFERENCES ...`
    pub(super) fn table_constraint(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<()> {
        if cursor.eat_keyword(Keyword::Constraint) {
            cursor.expect_identifier("a constraint name")?;
        }
        let token = cursor.advance("a table constraint")?;
        match token.keyword() {
            Some(Keyword::Primary) => {
                cursor.expect_keyword(Keyword::Key)?;
                let columns = self.columns_in_parens(cursor, id, true)?;
                conflict_clause(cursor)?;
                let table = self.database.table_mut(id);
                table
                    .set_primary_key(columns.clone())
                    .map_err(|c| conflict_error(table, c, &columns, token))?;
            }
            Some(Keyword::Unique) => {
                let columns = self.columns_in_parens(cursor, id, true)?;
                conflict_clause(cursor)?;
                let table = self.database.table_mut(id);
                table
                    .add_unique(columns.clone())
                    .map_err(|c| conflict_error(table, c, &columns, token))?;
            }
            Some(Keyword::Check) => {
                cursor.skip_balanced()?;
            }
            Some(Keyword::Foreign) => {
                cursor.expect_keyword(Keyword::Key)?;
                let columns = self.column_list(cursor, id)?;
                cursor.expect_keyword(Keyword::References)?;
                self.references(cursor, id, columns)?;
            }
            _ => {
                return ParseError::unexpected("PRIMARY KEY, UNIQUE, CHECK or FOREIGN KEY", token).err();
            }
        }
        Ok(())
    }

    /// `( name, ... )` of columns in table `id`.
    pub(super) fn column_list(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<Vec<usize>> {
        self.columns_in_parens(cursor, id, false)
    }

    /// Parenthesized column names resolved to indices. Indexed lists also
    /// accept `COLLATE name` and `ASC|DESC` after each name.
    fn columns_in_parens(
        &mut self,
        cursor: &mut Cursor<'_>,
        id: TableId,
        indexed: bool,
    ) -> ParseResult<Vec<usize>> {
        cursor.expect("(")?;
        let mut columns = Vec::new();
        loop {
            let token = cursor.expect_identifier("a column name")?;
            let name = token.unquoted();
            let table = self.database.table(id);
            let Some(index) = table.column_index(&name) else {
                return ParseError::new(
                    ErrorCode::UnknownColumn,
                    format!("Column '{name}' does not exist in table '{}'", table.sql_name),
                    token,
                )
                .err();
            };
            if columns.contains(&index) {
                return ParseError::new(
                    ErrorCode::DuplicateColumn,
                    format!("Column '{name}' is listed more than once"),
                    token,
                )
                .err();
            }
            if indexed {
                if cursor.eat_keyword(Keyword::Collate) {
                    let affinity = table.columns[index].affinity;
                    collation(cursor, &mut *self.reporter, Some(affinity))?;
                }
                cursor.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
            }
            columns.push(index);
            if !cursor.eat(",") {
                break;
            }
        }
        cursor.expect(")")?;
        Ok(columns)
    }
}
