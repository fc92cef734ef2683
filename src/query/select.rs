use crate::diagnostics::{ErrorCode, ParseError, ParseResult, Reporter};
use crate::metadata::DatabaseInfo;
use crate::parser::{Cursor, Expr, ExpressionParser, Scope, unknown_table};
use crate::query::{ColumnSource, Query, QueryInfo, QueryType};
use crate::sql::{Keyword, Token, tokenize};
use crate::{debug, trace};

const JOIN_KEYWORDS: [Keyword; 8] = [
    Keyword::Join,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Cross,
    Keyword::Natural,
    Keyword::Outer,
];

/// Parse and resolve one `SELECT` against `database`.
pub fn parse_select(
    sql: &str,
    database: &DatabaseInfo,
    reporter: &mut dyn Reporter,
) -> ParseResult<QueryInfo> {
    let tokens = tokenize(sql)?;
    trace!(tokens = tokens.len(), "Tokenized query");
    SelectParser::new(database, reporter).parse(&tokens)
}

/// `SELECT [DISTINCT|ALL] result-columns [FROM tables] [WHERE expr]
/// [ORDER BY terms] [LIMIT expr [OFFSET expr | , expr]] [;]`
pub struct SelectParser<'a> {
    database: &'a DatabaseInfo,
    query: Query,
    reporter: &'a mut dyn Reporter,
}

impl<'a> SelectParser<'a> {
    pub fn new(database: &'a DatabaseInfo, reporter: &'a mut dyn Reporter) -> Self {
        Self {
            database,
            query: Query::new(),
            reporter,
        }
    }

    fn expressions<'s>(&'s mut self, scope: Scope<'s>) -> ExpressionParser<'s> {
        ExpressionParser::new(self.database, &mut self.query, &mut *self.reporter, scope)
    }

    pub fn parse(mut self, tokens: &[Token]) -> ParseResult<QueryInfo> {
        let mut cursor = Cursor::new(tokens);
        let mut info = QueryInfo::new(QueryType::Select);

        let first = cursor.current("SELECT")?;
        if !first.is_keyword(Keyword::Select) {
            return ParseError::new(
                ErrorCode::UnsupportedSyntax,
                format!("Only SELECT queries are supported, found '{}'", first.value),
                first,
            )
            .err();
        }
        cursor.advance("SELECT")?;
        info.distinct = cursor.eat_keyword(Keyword::Distinct);
        if !info.distinct {
            cursor.eat_keyword(Keyword::All);
        }

        self.result_columns(&mut cursor, &mut info)?;
        if cursor.eat_keyword(Keyword::From) {
            self.from_clause(&mut cursor, &mut info)?;
        }
        let sources = Scope::Sources(&info.from_tables);
        if cursor.eat_keyword(Keyword::Where) {
            self.expressions(sources).parse(&mut cursor, true)?;
        }
        if cursor.eat_keyword(Keyword::Order) {
            cursor.expect_keyword(Keyword::By)?;
            self.expressions(sources).ordering_terms(&mut cursor)?;
        }
        if cursor.eat_keyword(Keyword::Limit) {
            self.expressions(sources).parse(&mut cursor, true)?;
            if cursor.eat_keyword(Keyword::Offset) || cursor.eat(",") {
                self.expressions(sources).parse(&mut cursor, true)?;
            }
        }
        cursor.eat(";");
        if let Some(token) = cursor.peek() {
            return ParseError::unexpected("end of query", token).err();
        }

        info.parameters = self.query.parameters;
        info.process(self.database)?;
        debug!(
            tables = info.from_tables.len(),
            columns = info.columns.len(),
            "Parsed query"
        );
        Ok(info)
    }

    fn result_columns(&mut self, cursor: &mut Cursor<'_>, info: &mut QueryInfo) -> ParseResult<()> {
        loop {
            let token = cursor.current("a result column")?;
            if cursor.eat("*") {
                info.add_column_source(ColumnSource::AllColumnsOfAllTables);
            } else if token.is_identifier()
                && cursor.peek_nth(1).is_some_and(|t| t.is("."))
                && cursor.peek_nth(2).is_some_and(|t| t.is("*"))
            {
                for _ in 0..3 {
                    cursor.advance("'*'")?;
                }
                info.add_column_source(ColumnSource::AllColumnsOfTable {
                    table: token.clone(),
                });
            } else {
                let Expr::Column(reference) = self.expressions(Scope::Deferred).parse(cursor, true)? else {
                    return ParseError::new(
                        ErrorCode::UnsupportedResultColumn,
                        "Only column references are supported in the select list",
                        token,
                    )
                    .err();
                };
                let alias = alias(cursor)?;
                info.add_column_source(ColumnSource::NamedColumn {
                    table: reference.table,
                    column: reference.column,
                    alias,
                });
            }
            if !cursor.eat(",") {
                return Ok(());
            }
        }
    }

    /// Comma-separated table names, each with an optional alias and
    /// `INDEXED BY name | NOT INDEXED`.
    fn from_clause(&mut self, cursor: &mut Cursor<'_>, info: &mut QueryInfo) -> ParseResult<()> {
        loop {
            let token = cursor.current("a table name")?;
            if token.is("(") {
                return ParseError::new(
                    ErrorCode::UnsupportedSyntax,
                    "Sub-queries in FROM are not supported",
                    token,
                )
                .err();
            }
            let name = cursor.expect_identifier("a table name")?;
            if cursor.check(".") {
                return ParseError::new(
                    ErrorCode::UnsupportedSyntax,
                    "Schema-qualified table names are not supported",
                    name,
                )
                .err();
            }
            let table = self
                .database
                .find_table(&name.unquoted())
                .ok_or_else(|| unknown_table(name))?;
            let alias = alias(cursor)?.unwrap_or_else(|| name.unquoted());
            if info.from_tables.iter().any(|f| f.alias.eq_ignore_ascii_case(&alias)) {
                return ParseError::new(
                    ErrorCode::DuplicateTable,
                    format!("Table alias '{alias}' is used more than once in FROM"),
                    name,
                )
                .err();
            }
            if cursor.eat_keyword(Keyword::Indexed) {
                cursor.expect_keyword(Keyword::By)?;
                cursor.expect_identifier("an index name")?;
            } else if cursor.check_keyword(Keyword::Not) && cursor.check_nth_keyword(1, Keyword::Indexed) {
                cursor.advance("NOT")?;
                cursor.advance("INDEXED")?;
            }
            info.add_from_table(alias, table.id);

            if let Some(join) = cursor
                .peek()
                .filter(|t| JOIN_KEYWORDS.iter().any(|k| t.is_keyword(*k)))
            {
                return ParseError::new(
                    ErrorCode::UnsupportedSyntax,
                    "JOIN is not supported, list the tables separated by commas",
                    join,
                )
                .err();
            }
            if !cursor.eat(",") {
                return Ok(());
            }
        }
    }
}

/// `AS name`, or a bare name that is not a keyword.
fn alias(cursor: &mut Cursor<'_>) -> ParseResult<Option<String>> {
    if cursor.eat_keyword(Keyword::As) {
        return Ok(Some(cursor.expect_identifier("an alias")?.unquoted()));
    }
    match cursor.peek() {
        Some(token) if token.is_identifier() && token.keyword().is_none() => {
            cursor.advance("an alias")?;
            Ok(Some(token.unquoted()))
        }
        _ => Ok(None),
    }
}
