use crate::diagnostics::{ErrorCode, ParseError, ParseResult, Reporter};
use crate::metadata::{DatabaseInfo, Table, TableId};
use crate::parser::{Cursor, collation, literal_value, type_name};
use crate::query::{FromTable, Query};
use crate::sql::{Keyword, Token, TokenKind};
use crate::trace;

/// Where column references are checked.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'s> {
    /// The table whose definition is being parsed.
    Table(TableId),
    /// The `FROM` tables of a query.
    Sources(&'s [FromTable]),
    /// Not checked; the caller resolves the reference later.
    Deferred,
}

/// `[table.]column` as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Option<Token>,
    pub column: Token,
}

impl ColumnRef {
    pub fn name(&self) -> String {
        self.column.unquoted()
    }

    pub fn qualifier(&self) -> Option<String> {
        self.table.as_ref().map(Token::unquoted)
    }
}

/// What an expression turned out to be. Anything beyond a lone primary is
/// `Compound`; the parser validates but does not build a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Token),
    Parameter(u32),
    Column(ColumnRef),
    Function(String),
    Compound,
}

/// How far binary operator chaining may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chain {
    All,
    /// Everything but `AND`, which closes `BETWEEN x AND y`.
    ExceptAnd,
    None,
}

/// Recursive-descent parser for scalar and boolean expressions.
///
/// Binary operators chain flat: after a primary, a binary operator consumes
/// the whole remainder as its right-hand side. There is no precedence.
pub struct ExpressionParser<'a> {
    database: &'a DatabaseInfo,
    query: &'a mut Query,
    reporter: &'a mut dyn Reporter,
    scope: Scope<'a>,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(
        database: &'a DatabaseInfo,
        query: &'a mut Query,
        reporter: &'a mut dyn Reporter,
        scope: Scope<'a>,
    ) -> Self {
        Self {
            database,
            query,
            reporter,
            scope,
        }
    }

    pub fn parse(&mut self, cursor: &mut Cursor<'_>, include_binary: bool) -> ParseResult<Expr> {
        let chain = if include_binary { Chain::All } else { Chain::None };
        self.expression(cursor, chain)
    }

    /// Parse an expression only if the current token can start one.
    pub fn probe(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Option<Expr>> {
        match cursor.peek() {
            Some(token) if starts_expression(token) || is_function_start(cursor) => {
                self.parse(cursor, true).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// `expr [, expr]*`
    pub fn expression_list(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Vec<Expr>> {
        let mut list = vec![self.parse(cursor, true)?];
        while cursor.eat(",") {
            list.push(self.parse(cursor, true)?);
        }
        Ok(list)
    }

    /// `expr [COLLATE name] [ASC|DESC] [NULLS FIRST|LAST]`, comma separated.
    pub fn ordering_terms(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        loop {
            self.parse(cursor, true)?;
            cursor.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
            if cursor.eat_keyword(Keyword::Nulls) {
                cursor.expect_any_keyword(&[Keyword::First, Keyword::Last])?;
            }
            if !cursor.eat(",") {
                return Ok(());
            }
        }
    }

    pub(crate) fn expression(&mut self, cursor: &mut Cursor<'_>, chain: Chain) -> ParseResult<Expr> {
        let mut expr = self.primary(cursor)?;
        if self.postfix(cursor)? {
            expr = Expr::Compound;
        }
        if let Some(operator) = cursor.peek().filter(|t| t.is_binary_operator) {
            let stop = match chain {
                Chain::All => false,
                Chain::ExceptAnd => operator.is_keyword(Keyword::And),
                Chain::None => true,
            };
            if !stop {
                cursor.advance("an operator")?;
                self.expression(cursor, chain)?;
                expr = Expr::Compound;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        if let Some(literal) = literal_value(cursor) {
            return Ok(Expr::Literal(literal.clone()));
        }
        let token = cursor.current("an expression")?;
        if Query::is_parameter(token) {
            cursor.advance("a parameter")?;
            let number = self.query.register(token)?;
            trace!(parameter = %token.value, number, "Registered parameter");
            return Ok(Expr::Parameter(number));
        }
        if is_function_start(cursor) {
            return self.function(cursor);
        }
        match token.keyword() {
            Some(Keyword::Cast) => return self.cast(cursor),
            Some(Keyword::Exists) => {
                cursor.advance("EXISTS")?;
                cursor.skip_balanced()?;
                return Ok(Expr::Compound);
            }
            Some(Keyword::Case) => return self.case(cursor),
            Some(Keyword::Raise) => return self.raise(cursor),
            Some(Keyword::Not) => {
                cursor.advance("NOT")?;
                self.expression(cursor, Chain::None)?;
                return Ok(Expr::Compound);
            }
            _ => {}
        }
        if token.is("(") {
            return self.parenthesized(cursor);
        }
        if token.is_unary_operator {
            cursor.advance("an operator")?;
            self.expression(cursor, Chain::None)?;
            return Ok(Expr::Compound);
        }
        self.column(cursor)
    }

    /// Trailing clauses after a primary. Returns whether any was consumed.
    fn postfix(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<bool> {
        let mut consumed = false;
        while let Some(token) = cursor.peek() {
            match token.keyword() {
                Some(Keyword::Collate) => {
                    cursor.advance("COLLATE")?;
                    collation(cursor, &mut *self.reporter, None)?;
                }
                Some(Keyword::Not) => {
                    let negatable = [
                        Keyword::Like,
                        Keyword::Glob,
                        Keyword::Regexp,
                        Keyword::Match,
                        Keyword::Null,
                        Keyword::Between,
                        Keyword::In,
                    ];
                    if !negatable.iter().any(|k| cursor.check_nth_keyword(1, *k)) {
                        break;
                    }
                    cursor.advance("NOT")?;
                    cursor.eat_keyword(Keyword::Null);
                }
                Some(Keyword::Like) => {
                    cursor.advance("LIKE")?;
                    self.expression(cursor, Chain::None)?;
                    if cursor.eat_keyword(Keyword::Escape) {
                        self.expression(cursor, Chain::None)?;
                    }
                }
                Some(Keyword::Glob | Keyword::Regexp | Keyword::Match) => {
                    cursor.advance("an operator")?;
                    self.expression(cursor, Chain::None)?;
                }
                Some(Keyword::Isnull | Keyword::Notnull) => {
                    cursor.advance("an operator")?;
                }
                Some(Keyword::Is) => {
                    cursor.advance("IS")?;
                    cursor.eat_keyword(Keyword::Not);
                    if cursor.eat_keyword(Keyword::Distinct) {
                        cursor.expect_keyword(Keyword::From)?;
                    }
                    self.expression(cursor, Chain::None)?;
                }
                Some(Keyword::Between) => {
                    cursor.advance("BETWEEN")?;
                    self.expression(cursor, Chain::ExceptAnd)?;
                    cursor.expect_keyword(Keyword::And)?;
                    self.expression(cursor, Chain::ExceptAnd)?;
                }
                Some(Keyword::In) => {
                    cursor.advance("IN")?;
                    self.in_target(cursor)?;
                }
                _ => break,
            }
            consumed = true;
        }
        Ok(consumed)
    }

    /// `( select ) | ( expr-list ) | table | table-function(args)`
    fn in_target(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        if cursor.check("(") {
            if is_sub_select(cursor) {
                cursor.skip_balanced()?;
                return Ok(());
            }
            return self.arguments(cursor);
        }
        let name = cursor.expect_identifier("'(' or a table name")?;
        if cursor.check("(") {
            return self.arguments(cursor);
        }
        if self.database.find_table(&name.unquoted()).is_none() {
            return unknown_table(name).err();
        }
        Ok(())
    }

    /// `( [expr-list] )`
    fn arguments(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        cursor.expect("(")?;
        if !cursor.check(")") {
            self.expression_list(cursor)?;
        }
        cursor.expect(")")?;
        Ok(())
    }

    fn function(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        let name = cursor.advance("a function name")?;
        cursor.expect("(")?;
        if !cursor.eat("*") {
            let distinct = cursor.eat_keyword(Keyword::Distinct);
            if self.probe(cursor)?.is_some() {
                while cursor.eat(",") {
                    self.parse(cursor, true)?;
                }
            } else if distinct {
                let token = cursor.current("an expression")?;
                return ParseError::unexpected("an expression", token).err();
            }
        }
        cursor.expect(")")?;

        if cursor.eat_keyword(Keyword::Filter) {
            cursor.expect("(")?;
            cursor.expect_keyword(Keyword::Where)?;
            self.parse(cursor, true)?;
            cursor.expect(")")?;
        }
        if cursor.eat_keyword(Keyword::Over) {
            self.over_clause(cursor)?;
        }
        Ok(Expr::Function(name.unquoted()))
    }

    /// `CAST ( expr AS type-name )`
    fn cast(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        cursor.expect_keyword(Keyword::Cast)?;
        cursor.expect("(")?;
        self.parse(cursor, true)?;
        cursor.expect_keyword(Keyword::As)?;
        if type_name(cursor)?.is_none() {
            let token = cursor.current("a type name")?;
            return ParseError::unexpected("a type name", token).err();
        }
        cursor.expect(")")?;
        Ok(Expr::Compound)
    }

    /// `CASE [base] WHEN expr THEN expr [WHEN ...]* [ELSE expr] END`
    fn case(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        cursor.expect_keyword(Keyword::Case)?;
        if !cursor.check_keyword(Keyword::When) {
            self.parse(cursor, true)?;
        }
        cursor.expect_keyword(Keyword::When)?;
        loop {
            self.parse(cursor, true)?;
            cursor.expect_keyword(Keyword::Then)?;
            self.parse(cursor, true)?;
            if !cursor.eat_keyword(Keyword::When) {
                break;
            }
        }
        if cursor.eat_keyword(Keyword::Else) {
            self.parse(cursor, true)?;
        }
        cursor.expect_keyword(Keyword::End)?;
        Ok(Expr::Compound)
    }

    /// `RAISE ( IGNORE | {ROLLBACK|ABORT|FAIL} , 'message' )`
    fn raise(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        cursor.expect_keyword(Keyword::Raise)?;
        cursor.expect("(")?;
        if !cursor.eat_keyword(Keyword::Ignore) {
            cursor.expect_any_keyword(&[Keyword::Rollback, Keyword::Abort, Keyword::Fail])?;
            cursor.expect(",")?;
            let message = cursor.advance("an error message")?;
            if message.kind != TokenKind::StringLiteral {
                return ParseError::unexpected("an error message", message).err();
            }
        }
        cursor.expect(")")?;
        Ok(Expr::Compound)
    }

    /// `( select )` placeholder, or `( expr-list )`. A single parenthesized
    /// expression is transparent.
    fn parenthesized(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        if is_sub_select(cursor) {
            cursor.skip_balanced()?;
            return Ok(Expr::Compound);
        }
        cursor.expect("(")?;
        let mut list = self.expression_list(cursor)?;
        cursor.expect(")")?;
        match (list.pop(), list.is_empty()) {
            (Some(single), true) => Ok(single),
            _ => Ok(Expr::Compound),
        }
    }

    fn column(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<Expr> {
        let first = cursor.advance("an expression")?;
        if !first.is_identifier() || first.keyword().is_some_and(Keyword::is_reserved) {
            return ParseError::unexpected("an expression", first).err();
        }
        let reference = if cursor.eat(".") {
            let column = cursor.expect_identifier("a column name")?;
            if cursor.check(".") {
                return ParseError::new(
                    ErrorCode::UnsupportedSyntax,
                    "Schema-qualified column references are not supported",
                    first,
                )
                .err();
            }
            ColumnRef {
                table: Some(first.clone()),
                column: column.clone(),
            }
        } else {
            ColumnRef {
                table: None,
                column: first.clone(),
            }
        };
        self.validate(&reference)?;
        Ok(Expr::Column(reference))
    }

    fn validate(&self, reference: &ColumnRef) -> ParseResult<()> {
        let name = reference.name();
        match (self.scope, &reference.table) {
            (Scope::Deferred, _) => Ok(()),
            (Scope::Table(id), None) => require_column(self.database.table(id), reference),
            (Scope::Table(_), Some(qualifier)) => {
                let table = self
                    .database
                    .find_table(&qualifier.unquoted())
                    .ok_or_else(|| unknown_table(qualifier))?;
                require_column(table, reference)
            }
            (Scope::Sources(sources), None) => {
                let owners = sources
                    .iter()
                    .filter(|s| self.database.table(s.table).has_column(&name))
                    .count();
                match owners {
                    0 => ParseError::new(
                        ErrorCode::UnknownColumn,
                        format!("Column '{name}' does not exist in any FROM table"),
                        &reference.column,
                    )
                    .err(),
                    1 => Ok(()),
                    _ => ambiguous_column(&reference.column).err(),
                }
            }
            (Scope::Sources(sources), Some(qualifier)) => {
                let source = FromTable::find(sources, self.database, &qualifier.unquoted())
                    .ok_or_else(|| not_in_from(qualifier))?;
                require_column(self.database.table(source.table), reference)
            }
        }
    }
}

/// True if `token` can begin an expression.
fn starts_expression(token: &Token) -> bool {
    if token.kind.is_literal() || token.is("(") || token.is_unary_operator || Query::is_parameter(token) {
        return true;
    }
    match token.keyword() {
        Some(
            Keyword::Cast
            | Keyword::Exists
            | Keyword::Case
            | Keyword::Raise
            | Keyword::Not
            | Keyword::Null,
        ) => true,
        Some(keyword) => !keyword.is_reserved(),
        None => token.is_identifier(),
    }
}

/// Reserved operator keywords that SQLite also provides as functions.
const CALLABLE_KEYWORDS: [Keyword; 3] = [Keyword::Like, Keyword::Glob, Keyword::Regexp];

fn is_function_start(cursor: &Cursor<'_>) -> bool {
    let (Some(name), Some(paren)) = (cursor.peek(), cursor.peek_nth(1)) else {
        return false;
    };
    paren.is("(")
        && name.is_identifier()
        && name.keyword().is_none_or(|k| {
            CALLABLE_KEYWORDS.contains(&k) || (!k.is_reserved() && k != Keyword::Raise)
        })
}

fn is_sub_select(cursor: &Cursor<'_>) -> bool {
    cursor.check("(")
        && (cursor.check_nth_keyword(1, Keyword::Select) || cursor.check_nth_keyword(1, Keyword::With))
}

fn require_column(table: &Table, reference: &ColumnRef) -> ParseResult<()> {
    let name = reference.name();
    if table.has_column(&name) {
        return Ok(());
    }
    ParseError::new(
        ErrorCode::UnknownColumn,
        format!("Column '{name}' does not exist in table '{}'", table.sql_name),
        &reference.column,
    )
    .err()
}

pub(crate) fn unknown_table(token: &Token) -> ParseError {
    ParseError::new(
        ErrorCode::UnknownTable,
        format!("Table '{}' does not exist", token.unquoted()),
        token,
    )
}

pub(crate) fn not_in_from(token: &Token) -> ParseError {
    ParseError::new(
        ErrorCode::UnknownTable,
        format!("Table '{}' is not in the FROM clause", token.unquoted()),
        token,
    )
}

pub(crate) fn ambiguous_column(token: &Token) -> ParseError {
    ParseError::new(
        ErrorCode::AmbiguousColumn,
        format!("Ambiguous column name '{}'", token.unquoted()),
        token,
    )
}
