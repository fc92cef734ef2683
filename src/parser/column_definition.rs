use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::metadata::{Column, TableId, output_name};
use crate::parser::{
    Cursor, ExpressionParser, SchemaParser, Scope, collation, conflict_clause, conflict_error,
    literal_value, signed_number, type_name,
};
use crate::sql::{Keyword, Token};

impl SchemaParser<'_> {
    /// `name [type-name] [column-constraint]*`
    pub(super) fn column_definition(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<()> {
        let token = cursor.expect_identifier("a column name")?;
        let name = token.unquoted();
        let table = self.database.table(id);
        if table.column(&name).is_some() {
            return ParseError::new(
                ErrorCode::DuplicateColumn,
                format!("Column '{name}' already exists in table '{}'", table.sql_name),
                token,
            )
            .err();
        }
        let output = output_name(&name);
        if let Some(other) = table.columns.iter().find(|c| c.output_name == output) {
            return ParseError::new(
                ErrorCode::DuplicateColumn,
                format!(
                    "Column '{name}' has the same output name '{output}' as column '{}'",
                    other.sql_name
                ),
                token,
            )
            .err();
        }

        let sql_type = type_name(cursor)?.unwrap_or_default();
        let table = self.database.table_mut(id);
        table.columns.push(Column::new(id, name, sql_type));
        let index = table.columns.len() - 1;
        self.column_constraints(cursor, id, index)
    }

    fn column_mut(&mut self, id: TableId, index: usize) -> &mut Column {
        &mut self.database.table_mut(id).columns[index]
    }

    /// Constraints in any order until `,` or `)`.
    fn column_constraints(&mut self, cursor: &mut Cursor<'_>, id: TableId, index: usize) -> ParseResult<()> {
        while cursor.peek().is_some_and(|t| !t.is(",") && !t.is(")")) {
            if cursor.eat_keyword(Keyword::Constraint) {
                cursor.expect_identifier("a constraint name")?;
            }
            let token = cursor.advance("a column constraint")?;
            match token.keyword() {
                Some(Keyword::Not) => {
                    cursor.expect_keyword(Keyword::Null)?;
                    conflict_clause(cursor)?;
                    self.column_mut(id, index).not_null = true;
                }
                Some(Keyword::Null) => conflict_clause(cursor)?,
                Some(Keyword::Primary) => self.column_primary_key(cursor, id, index, token)?,
                Some(Keyword::Unique) => {
                    conflict_clause(cursor)?;
                    let table = self.database.table_mut(id);
                    table
                        .add_unique(vec![index])
                        .map_err(|c| conflict_error(table, c, &[index], token))?;
                }
                Some(Keyword::Check) => {
                    cursor.skip_balanced()?;
                }
                Some(Keyword::Default) => self.default_value(cursor, id)?,
                Some(Keyword::Collate) => {
                    let affinity = self.column_mut(id, index).affinity;
                    let name = collation(cursor, &mut *self.reporter, Some(affinity))?;
                    self.column_mut(id, index).collation = Some(name);
                }
                Some(Keyword::References) => self.references(cursor, id, vec![index])?,
                Some(Keyword::Generated) => {
                    cursor.expect_keyword(Keyword::Always)?;
                    cursor.expect_keyword(Keyword::As)?;
                    generated(cursor)?;
                }
                Some(Keyword::As) => generated(cursor)?,
                _ => {
                    let column = &self.database.table(id).columns[index];
                    return ParseError::new(
                        ErrorCode::UnexpectedToken,
                        format!(
                            "Unexpected '{}' in the definition of column '{}'",
                            token.value, column.sql_name
                        ),
                        token,
                    )
                    .err();
                }
            }
        }
        Ok(())
    }

    /// `PRIMARY KEY [ASC|DESC] [conflict-clause] [AUTOINCREMENT]`
    fn column_primary_key(
        &mut self,
        cursor: &mut Cursor<'_>,
        id: TableId,
        index: usize,
        at: &Token,
    ) -> ParseResult<()> {
        cursor.expect_keyword(Keyword::Key)?;
        cursor.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
        conflict_clause(cursor)?;
        let table = self.database.table_mut(id);
        table
            .set_primary_key(vec![index])
            .map_err(|c| conflict_error(table, c, &[index], at))?;

        if let Some(token) = cursor.peek().filter(|t| t.is_keyword(Keyword::Autoincrement)) {
            cursor.advance("AUTOINCREMENT")?;
            let column = &mut table.columns[index];
            if !column.sql_type.eq_ignore_ascii_case("INTEGER") {
                return ParseError::new(
                    ErrorCode::InvalidAutoIncrement,
                    format!(
                        "AUTOINCREMENT is only allowed on an INTEGER PRIMARY KEY, column '{}' has type '{}'",
                        column.sql_name, column.sql_type
                    ),
                    token,
                )
                .err();
            }
            column.auto_increment = true;
        }
        Ok(())
    }

    /// `DEFAULT <signed-number | literal | ( expr )>`
    fn default_value(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<()> {
        if signed_number(cursor)?.is_some() || literal_value(cursor).is_some() {
            return Ok(());
        }
        let token = cursor.current("a default value")?;
        if !token.is("(") {
            return ParseError::unexpected("a default value", token).err();
        }
        cursor.advance("'('")?;
        ExpressionParser::new(
            &self.database,
            &mut self.query,
            &mut *self.reporter,
            Scope::Table(id),
        )
        .parse(cursor, true)?;
        cursor.expect(")")?;
        Ok(())
    }
}

/// `( expr ) [STORED|VIRTUAL]` of a generated column, checked for balance only.
fn generated(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    cursor.skip_balanced()?;
    cursor.eat_any_keyword(&[Keyword::Stored, Keyword::Virtual]);
    Ok(())
}
