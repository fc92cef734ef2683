use crate::diagnostics::{ErrorCode, ParseError, ParseResult, Reporter};
use crate::metadata::{DatabaseInfo, TableId, output_name};
use crate::parser::Cursor;
use crate::query::Query;
use crate::sql::{Keyword, Token, tokenize};
use crate::{debug, trace};

/// Declared types a `STRICT` table accepts.
pub const STRICT_TYPES: [&str; 6] = ["INT", "INTEGER", "REAL", "TEXT", "BLOB", "ANY"];

/// Parse a schema of `;`-terminated `CREATE TABLE` statements.
pub fn parse_schema(sql: &str, reporter: &mut dyn Reporter) -> ParseResult<DatabaseInfo> {
    let tokens = tokenize(sql)?;
    trace!(tokens = tokens.len(), "Tokenized schema");
    SchemaParser::new(sql, reporter).parse(&tokens)
}

/// Builds a `DatabaseInfo` from DDL tokens.
///
/// A table is registered as soon as its name is read, so its own body may
/// refer to it; tables declared later are unknown at that point.
pub struct SchemaParser<'r> {
    source: Vec<char>,
    pub(super) database: DatabaseInfo,
    pub(super) query: Query,
    pub(super) reporter: &'r mut dyn Reporter,
}

impl<'r> SchemaParser<'r> {
    /// `sql` must be the text the tokens were produced from.
    pub fn new(sql: &str, reporter: &'r mut dyn Reporter) -> Self {
        Self {
            source: sql.chars().collect(),
            database: DatabaseInfo::new(),
            query: Query::new(),
            reporter,
        }
    }

    /// Continue adding tables to an existing registry.
    pub fn with_database(mut self, database: DatabaseInfo) -> Self {
        self.database = database;
        self
    }

    pub fn parse(mut self, tokens: &[Token]) -> ParseResult<DatabaseInfo> {
        let mut cursor = Cursor::new(tokens);
        while !cursor.is_at_end() {
            if cursor.eat(";") {
                continue;
            }
            self.create_table(&mut cursor)?;
        }
        Ok(self.database)
    }

    /// `CREATE [TEMP|TEMPORARY] TABLE [IF NOT EXISTS] name ( body ) [options] ;`
    fn create_table(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<TableId> {
        let create = cursor.current("CREATE TABLE")?;
        if !create.is_keyword(Keyword::Create) {
            return unsupported_statement(create).err();
        }
        cursor.advance("CREATE")?;
        let is_temporary = cursor
            .eat_any_keyword(&[Keyword::Temp, Keyword::Temporary])
            .is_some();
        let table = cursor.current("TABLE")?;
        if !table.is_keyword(Keyword::Table) {
            return unsupported_statement(table).err();
        }
        cursor.advance("TABLE")?;
        if cursor.eat_keyword(Keyword::If) {
            cursor.expect_keyword(Keyword::Not)?;
            cursor.expect_keyword(Keyword::Exists)?;
        }

        let id = self.table_name(cursor)?;
        self.database.table_mut(id).is_temporary = is_temporary;
        if let Some(token) = cursor.peek().filter(|t| t.is_keyword(Keyword::As)) {
            return ParseError::new(
                ErrorCode::UnsupportedSyntax,
                "CREATE TABLE ... AS SELECT is not supported",
                token,
            )
            .err();
        }

        cursor.expect("(")?;
        self.table_body(cursor, id)?;
        self.table_options(cursor, id)?;
        let end = cursor.expect(";")?;

        let text: String = self
            .source
            .get(create.position.absolute..end.end())
            .map(|chars| chars.iter().collect())
            .unwrap_or_default();
        let table = self.database.table_mut(id);
        table.create_table_text = text;
        debug!(
            table = %table.sql_name,
            columns = table.columns.len(),
            temporary = is_temporary,
            "Parsed table"
        );
        Ok(id)
    }

    /// Read and register the table name.
    fn table_name(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<TableId> {
        let token = cursor.expect_identifier("a table name")?;
        if cursor.check(".") {
            return ParseError::new(
                ErrorCode::UnsupportedSyntax,
                "Schema-qualified table names are not supported",
                token,
            )
            .err();
        }
        let name = token.unquoted();
        if self.database.find_table(&name).is_some() {
            return ParseError::new(
                ErrorCode::DuplicateTable,
                format!("Table '{name}' already exists"),
                token,
            )
            .err();
        }
        let output = output_name(&name);
        if let Some(other) = self.database.find_by_output_name(&output) {
            return ParseError::new(
                ErrorCode::DuplicateTable,
                format!(
                    "Table '{name}' has the same output name '{output}' as table '{}'",
                    other.sql_name
                ),
                token,
            )
            .err();
        }
        Ok(self.database.add_table(name))
    }

    /// Column definitions, then table constraints, up to and including `)`.
    fn table_body(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<()> {
        let mut in_constraints = false;
        loop {
            let token = cursor.current("a column definition or table constraint")?;
            if Keyword::TABLE_CONSTRAINTS.iter().any(|k| token.is_keyword(*k)) {
                in_constraints = true;
                self.table_constraint(cursor, id)?;
            } else if in_constraints {
                return ParseError::new(
                    ErrorCode::ConstraintOrder,
                    "Column definitions must come before table constraints",
                    token,
                )
                .err();
            } else {
                self.column_definition(cursor, id)?;
            }

            let separator = cursor.advance("',' or ')'")?;
            if separator.is(")") {
                return Ok(());
            }
            if !separator.is(",") {
                return ParseError::unexpected("',' or ')'", separator).err();
            }
        }
    }

    /// `[WITHOUT ROWID | STRICT] [, ...]`, each at most once.
    fn table_options(&mut self, cursor: &mut Cursor<'_>, id: TableId) -> ParseResult<()> {
        let mut without_rowid: Option<&Token> = None;
        let mut strict: Option<&Token> = None;
        if !cursor.check_keyword(Keyword::Without) && !cursor.check_keyword(Keyword::Strict) {
            return Ok(());
        }
        loop {
            let token = cursor.advance("WITHOUT ROWID or STRICT")?;
            let seen = match token.keyword() {
                Some(Keyword::Without) => {
                    cursor.expect_keyword(Keyword::Rowid)?;
                    without_rowid.replace(token)
                }
                Some(Keyword::Strict) => strict.replace(token),
                _ => return ParseError::unexpected("WITHOUT ROWID or STRICT", token).err(),
            };
            if seen.is_some() {
                return ParseError::new(
                    ErrorCode::DuplicateClause,
                    format!("Table option {} may appear only once", token.value.to_uppercase()),
                    token,
                )
                .err();
            }
            if !cursor.eat(",") {
                break;
            }
        }

        let table = self.database.table_mut(id);
        if let Some(token) = without_rowid {
            if !table.has_primary_key() {
                return ParseError::new(
                    ErrorCode::InvalidTableOption,
                    format!("WITHOUT ROWID table '{}' must have a primary key", table.sql_name),
                    token,
                )
                .err();
            }
            table.without_rowid = true;
        }
        if let Some(token) = strict {
            if let Some(column) = table
                .columns
                .iter()
                .find(|c| !STRICT_TYPES.iter().any(|t| t.eq_ignore_ascii_case(&c.sql_type)))
            {
                return ParseError::new(
                    ErrorCode::InvalidTableOption,
                    format!(
                        "Column '{}' of STRICT table '{}' has unsupported type '{}'",
                        column.sql_name, table.sql_name, column.sql_type
                    ),
                    token,
                )
                .err();
            }
            table.strict = true;
        }
        Ok(())
    }
}

/// `ON CONFLICT <resolution>`, parsed and discarded.
pub(super) fn conflict_clause(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    if cursor.check_keyword(Keyword::On) && cursor.check_nth_keyword(1, Keyword::Conflict) {
        cursor.advance("ON")?;
        cursor.advance("CONFLICT")?;
        cursor.expect_any_keyword(&[
            Keyword::Rollback,
            Keyword::Abort,
            Keyword::Fail,
            Keyword::Ignore,
            Keyword::Replace,
        ])?;
    }
    Ok(())
}

fn unsupported_statement(token: &Token) -> ParseError {
    ParseError::new(
        ErrorCode::UnsupportedSyntax,
        format!("Only CREATE TABLE statements are supported, found '{}'", token.value),
        token,
    )
}
