use crate::diagnostics::{ErrorCode, ParseError, ParseResult, Warning, WarningCode};
use crate::metadata::{ForeignKey, ForeignKeyAction, TableId};
use crate::parser::{Cursor, SchemaParser};
use crate::sql::{Keyword, Token};

fn mismatch(message: String, token: &Token) -> ParseError {
    ParseError::new(ErrorCode::ForeignKeyMismatch, message, token)
}

/// `SET NULL | SET DEFAULT | CASCADE | RESTRICT | NO ACTION`
fn action(cursor: &mut Cursor<'_>) -> ParseResult<ForeignKeyAction> {
    let options = [Keyword::Set, Keyword::Cascade, Keyword::Restrict, Keyword::No];
    Ok(match cursor.expect_any_keyword(&options)? {
        Keyword::Set => match cursor.expect_any_keyword(&[Keyword::Null, Keyword::Default])? {
            Keyword::Null => ForeignKeyAction::SetNull,
            _ => ForeignKeyAction::SetDefault,
        },
        Keyword::Cascade => ForeignKeyAction::Cascade,
        Keyword::Restrict => ForeignKeyAction::Restrict,
        _ => {
            cursor.expect_keyword(Keyword::Action)?;
            ForeignKeyAction::NoAction
        }
    })
}

impl SchemaParser<'_> {
    /// The clause after `REFERENCES`, for local `columns` of table `id`.
    ///
    /// The referenced table must already be registered. Without an explicit
    /// column list its primary key is referenced. Either way the referenced
    /// columns must be its primary key or a unique set.
    pub(super) fn references(
        &mut self,
        cursor: &mut Cursor<'_>,
        id: TableId,
        columns: Vec<usize>,
    ) -> ParseResult<()> {
        let name = cursor.expect_identifier("a table name")?;
        let Some(foreign) = self.database.find_table(&name.unquoted()) else {
            return ParseError::new(
                ErrorCode::UnknownTable,
                format!("Referenced table '{}' does not exist", name.unquoted()),
                name,
            )
            .err();
        };
        let foreign_id = foreign.id;
        let explicit = if cursor.check("(") {
            Some(self.column_list(cursor, foreign_id)?)
        } else {
            None
        };

        let mut on_delete = ForeignKeyAction::default();
        let mut on_update = ForeignKeyAction::default();
        loop {
            if cursor.check_keyword(Keyword::On) {
                cursor.advance("ON")?;
                match cursor.expect_any_keyword(&[Keyword::Delete, Keyword::Update])? {
                    Keyword::Delete => on_delete = action(cursor)?,
                    _ => on_update = action(cursor)?,
                }
            } else if let Some(token) = cursor.peek().filter(|t| t.is_keyword(Keyword::Match)) {
                cursor.advance("MATCH")?;
                let kind = cursor.expect_identifier("SIMPLE, PARTIAL or FULL")?;
                self.reporter.report(Warning::new(
                    WarningCode::MatchNotEnforced,
                    format!("MATCH {} is parsed but not enforced", kind.value.to_uppercase()),
                    Some(token),
                ));
            } else if cursor.check_keyword(Keyword::Deferrable)
                || (cursor.check_keyword(Keyword::Not) && cursor.check_nth_keyword(1, Keyword::Deferrable))
            {
                cursor.eat_keyword(Keyword::Not);
                cursor.advance("DEFERRABLE")?;
                if cursor.eat_keyword(Keyword::Initially) {
                    cursor.expect_any_keyword(&[Keyword::Deferred, Keyword::Immediate])?;
                }
            } else {
                break;
            }
        }

        let foreign = self.database.table(foreign_id);
        let foreign_columns = match explicit {
            Some(list) if list.len() != columns.len() => {
                return mismatch(
                    format!(
                        "Foreign key has {} column(s) but references {} column(s) of table '{}'",
                        columns.len(),
                        list.len(),
                        foreign.sql_name
                    ),
                    name,
                )
                .err();
            }
            Some(list) => list,
            None if foreign.primary_key.len() != columns.len() => {
                return mismatch(
                    format!(
                        "Referenced table doesn't have a matching foreign key: '{}' has a {}-column primary key, {} column(s) given",
                        foreign.sql_name,
                        foreign.primary_key.len(),
                        columns.len()
                    ),
                    name,
                )
                .err();
            }
            None => foreign.primary_key.clone(),
        };
        if !foreign.is_unique_by(&foreign_columns) {
            return mismatch(
                format!(
                    "Referenced table doesn't have a matching foreign key: ({}) of '{}' is neither a primary key nor unique",
                    foreign.column_names(&foreign_columns),
                    foreign.sql_name
                ),
                name,
            )
            .err();
        }

        self.database.table_mut(id).foreign_keys.push(ForeignKey {
            columns,
            foreign_table: foreign_id,
            foreign_columns,
            on_delete,
            on_update,
        });
        Ok(())
    }
}
