use crate::debug;
use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::metadata::{Column, DatabaseInfo, TableId, output_name};
use crate::parser::{ambiguous_column, not_in_from};
use crate::query::Parameter;
use crate::sql::Token;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, Serialize)]
pub enum QueryType {
    #[default]
    #[display("SELECT")]
    Select,
}

/// A `FROM` entry: its alias (the table name when none was given) and table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromTable {
    pub alias: String,
    pub table: TableId,
}

impl FromTable {
    /// Index of the entry `qualifier` names: aliases first, then table names.
    pub fn position(sources: &[FromTable], database: &DatabaseInfo, qualifier: &str) -> Option<usize> {
        sources
            .iter()
            .position(|s| s.alias.eq_ignore_ascii_case(qualifier))
            .or_else(|| {
                sources
                    .iter()
                    .position(|s| database.table(s.table).is_named(qualifier))
            })
    }

    pub fn find<'f>(
        sources: &'f [FromTable],
        database: &DatabaseInfo,
        qualifier: &str,
    ) -> Option<&'f FromTable> {
        Self::position(sources, database, qualifier).map(|i| &sources[i])
    }
}

/// A select-list entry, resolved only once the `FROM` list is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ColumnSource {
    /// `*`
    AllColumnsOfAllTables,
    /// `table.*`
    AllColumnsOfTable { table: Token },
    /// `[table.]column [AS alias]`
    NamedColumn {
        table: Option<Token>,
        column: Token,
        alias: Option<String>,
    },
}

/// A parsed query and, after `process`, its projected columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryInfo {
    pub query_type: QueryType,
    pub distinct: bool,
    pub from_tables: Vec<FromTable>,
    pub column_sources: Vec<ColumnSource>,
    /// Empty until `process` ran.
    pub columns: Vec<Column>,
    pub parameters: Vec<Parameter>,
    #[serde(skip)]
    processed: bool,
}

/// A resolved column and the `FROM` entry it came from.
struct Projected {
    source: usize,
    aliased: bool,
    column: Column,
}

impl QueryInfo {
    pub fn new(query_type: QueryType) -> Self {
        Self {
            query_type,
            ..Default::default()
        }
    }

    pub fn add_from_table(&mut self, alias: impl Into<String>, table: TableId) {
        self.from_tables.push(FromTable {
            alias: alias.into(),
            table,
        });
    }

    pub fn add_column_source(&mut self, source: ColumnSource) {
        self.column_sources.push(source);
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Resolve every column source against `from_tables`, in select-list
    /// order, then make output names unique. Later calls do nothing.
    pub fn process(&mut self, database: &DatabaseInfo) -> ParseResult<()> {
        if self.processed {
            return Ok(());
        }
        let mut projected = Vec::new();
        for source in &self.column_sources {
            self.resolve(source, database, &mut projected)?;
        }
        rename_collisions(database, &mut projected);
        self.columns = projected.into_iter().map(|p| p.column).collect();
        self.processed = true;
        debug!(
            query_type = %self.query_type,
            tables = self.from_tables.len(),
            columns = self.columns.len(),
            parameters = self.parameters.len(),
            "Processed query"
        );
        Ok(())
    }

    fn source_position(&self, database: &DatabaseInfo, qualifier: &Token) -> ParseResult<usize> {
        FromTable::position(&self.from_tables, database, &qualifier.unquoted())
            .ok_or_else(|| not_in_from(qualifier))
    }

    fn resolve(
        &self,
        source: &ColumnSource,
        database: &DatabaseInfo,
        projected: &mut Vec<Projected>,
    ) -> ParseResult<()> {
        let mut push_all = |index: usize| {
            let table = database.table(self.from_tables[index].table);
            projected.extend(table.columns.iter().map(|column| Projected {
                source: index,
                aliased: false,
                column: column.clone(),
            }));
        };
        match source {
            ColumnSource::AllColumnsOfAllTables => (0..self.from_tables.len()).for_each(push_all),
            ColumnSource::AllColumnsOfTable { table } => push_all(self.source_position(database, table)?),
            ColumnSource::NamedColumn {
                table,
                column,
                alias,
            } => {
                let name = column.unquoted();
                let (index, mut resolved) = match table {
                    Some(qualifier) => {
                        let index = self.source_position(database, qualifier)?;
                        let table = database.table(self.from_tables[index].table);
                        let resolved = table.column_or_rowid(&name).ok_or_else(|| {
                            ParseError::new(
                                ErrorCode::UnknownColumn,
                                format!("Column '{name}' does not exist in table '{}'", table.sql_name),
                                column,
                            )
                        })?;
                        (index, resolved)
                    }
                    None => {
                        let candidates = self
                            .from_tables
                            .iter()
                            .enumerate()
                            .filter_map(|(i, f)| database.table(f.table).column_or_rowid(&name).map(|c| (i, c)))
                            .collect_vec();
                        match <[_; 1]>::try_from(candidates) {
                            Ok([single]) => single,
                            Err(candidates) if candidates.is_empty() => {
                                return ParseError::new(
                                    ErrorCode::UnknownColumn,
                                    format!("Column '{name}' does not exist in any FROM table"),
                                    column,
                                )
                                .err();
                            }
                            Err(_) => return ambiguous_column(column).err(),
                        }
                    }
                };
                if let Some(alias) = alias {
                    resolved.output_name = output_name(alias);
                }
                crate::trace!(column = %name, table = index, "Resolved select column");
                projected.push(Projected {
                    source: index,
                    aliased: alias.is_some(),
                    column: resolved,
                });
            }
        }
        Ok(())
    }
}

/// Two passes over the projected columns:
/// 1. a non-aliased column sharing its output name with a column of another
///    `FROM` entry gets the table output name as prefix;
/// 2. names still shared get `1`, `2`, ... in select-list order, skipping
///    any candidate already taken.
fn rename_collisions(database: &DatabaseInfo, projected: &mut [Projected]) {
    let clashing = (0..projected.len())
        .filter(|&i| {
            let this = &projected[i];
            !this.aliased
                && projected
                    .iter()
                    .any(|other| other.source != this.source && other.column.output_name == this.column.output_name)
        })
        .collect_vec();
    for i in clashing {
        let column = &mut projected[i].column;
        column.output_name = format!("{}{}", database.table(column.table).output_name, column.output_name);
    }

    let counts = projected.iter().map(|p| p.column.output_name.as_str()).counts();
    let mut taken: HashSet<String> = counts
        .iter()
        .filter(|(_, count)| **count == 1)
        .map(|(name, _)| name.to_string())
        .collect();
    let groups = projected
        .iter()
        .map(|p| p.column.output_name.clone())
        .filter(|name| counts.get(name.as_str()).is_some_and(|count| *count > 1))
        .unique()
        .map(|name| {
            let members = projected
                .iter()
                .positions(|p| p.column.output_name == name)
                .collect_vec();
            (name, members)
        })
        .collect_vec();
    for (name, members) in groups {
        let mut suffix = 1;
        for i in members {
            let mut candidate = format!("{name}{suffix}");
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = format!("{name}{suffix}");
            }
            suffix += 1;
            taken.insert(candidate.clone());
            projected[i].column.output_name = candidate;
        }
    }
}
