use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::parser::{Chain, Cursor, ExpressionParser};
use crate::sql::{Keyword, Token};

const FRAME_UNITS: [Keyword; 3] = [Keyword::Range, Keyword::Rows, Keyword::Groups];

fn duplicate_clause(clause: &str, token: &Token) -> ParseError {
    ParseError::new(
        ErrorCode::DuplicateClause,
        format!("{clause} may appear only once in a window definition"),
        token,
    )
}

impl ExpressionParser<'_> {
    /// After `OVER`: a window name or a parenthesized window definition.
    pub(crate) fn over_clause(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        if cursor.check("(") {
            self.window_definition(cursor)
        } else {
            cursor.expect_identifier("a window name or '('")?;
            Ok(())
        }
    }

    /// `( [base-window] [PARTITION BY ...] [ORDER BY ...] [frame-spec] )`
    ///
    /// The three clauses may come in any order, each at most once.
    pub(crate) fn window_definition(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        cursor.expect("(")?;
        let starts_clause = |t: &Token| {
            t.is_keyword(Keyword::Partition)
                || t.is_keyword(Keyword::Order)
                || FRAME_UNITS.iter().any(|k| t.is_keyword(*k))
        };
        if cursor
            .peek()
            .is_some_and(|t| t.is_identifier() && !starts_clause(t))
        {
            cursor.advance("a window name")?;
        }

        let (mut partition, mut order, mut frame) = (false, false, false);
        loop {
            let token = cursor.current("')'")?;
            match token.keyword() {
                Some(Keyword::Partition) => {
                    if std::mem::replace(&mut partition, true) {
                        return duplicate_clause("PARTITION BY", token).err();
                    }
                    cursor.advance("PARTITION")?;
                    cursor.expect_keyword(Keyword::By)?;
                    self.expression_list(cursor)?;
                }
                Some(Keyword::Order) => {
                    if std::mem::replace(&mut order, true) {
                        return duplicate_clause("ORDER BY", token).err();
                    }
                    cursor.advance("ORDER")?;
                    cursor.expect_keyword(Keyword::By)?;
                    self.ordering_terms(cursor)?;
                }
                Some(Keyword::Range | Keyword::Rows | Keyword::Groups) => {
                    if std::mem::replace(&mut frame, true) {
                        return duplicate_clause("A frame specification", token).err();
                    }
                    cursor.advance("a frame unit")?;
                    self.frame_spec(cursor)?;
                }
                _ => break,
            }
        }
        cursor.expect(")")?;
        Ok(())
    }

    /// Frame extent after `RANGE|ROWS|GROUPS`, with an optional `EXCLUDE`.
    fn frame_spec(&mut self, cursor: &mut Cursor<'_>) -> ParseResult<()> {
        if cursor.eat_keyword(Keyword::Between) {
            self.frame_bound(cursor, true)?;
            cursor.expect_keyword(Keyword::And)?;
            self.frame_bound(cursor, true)?;
        } else {
            self.frame_bound(cursor, false)?;
        }

        if cursor.eat_keyword(Keyword::Exclude) {
            let options = [Keyword::No, Keyword::Current, Keyword::Group, Keyword::Ties];
            match cursor.expect_any_keyword(&options)? {
                Keyword::No => {
                    cursor.expect_keyword(Keyword::Others)?;
                }
                Keyword::Current => {
                    cursor.expect_keyword(Keyword::Row)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// `UNBOUNDED PRECEDING | CURRENT ROW | expr PRECEDING`; inside
    /// `BETWEEN` the `FOLLOWING` forms are legal too.
    fn frame_bound(&mut self, cursor: &mut Cursor<'_>, between: bool) -> ParseResult<()> {
        let directions: &[Keyword] = if between {
            &[Keyword::Preceding, Keyword::Following]
        } else {
            &[Keyword::Preceding]
        };
        if cursor.eat_keyword(Keyword::Current) {
            cursor.expect_keyword(Keyword::Row)?;
            return Ok(());
        }
        if !cursor.eat_keyword(Keyword::Unbounded) {
            self.expression(cursor, Chain::ExceptAnd)?;
        }
        cursor.expect_any_keyword(directions)?;
        Ok(())
    }
}
