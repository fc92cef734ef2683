//! SQL keyword model used by the schema, expression and query parsers.
//!
//! The tokenizer never classifies keywords: a keyword is an `Other` (or, for
//! `AND`/`OR`, `Operator`) token whose text matches one of these words in any
//! case. `Keyword::from_lower` expects an already lower-cased slice.

macro_rules! keywords {
    ($($variant:ident => $text:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)+
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Keyword::$variant,)+];

            /// Attempt to classify a *lower-cased* word into a `Keyword`.
            pub fn from_lower(word: &str) -> Option<Self> {
                match word {
                    $($text => Some(Keyword::$variant),)+
                    _ => None,
                }
            }

            /// Canonical lowercase string form of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)+
                }
            }
        }
    };
}

keywords! {
    Abort => "abort",
    Action => "action",
    All => "all",
    Always => "always",
    And => "and",
    As => "as",
    Asc => "asc",
    Autoincrement => "autoincrement",
    Between => "between",
    By => "by",
    Cascade => "cascade",
    Case => "case",
    Cast => "cast",
    Check => "check",
    Collate => "collate",
    Conflict => "conflict",
    Constraint => "constraint",
    Create => "create",
    Cross => "cross",
    Current => "current",
    CurrentDate => "current_date",
    CurrentTime => "current_time",
    CurrentTimestamp => "current_timestamp",
    Default => "default",
    Deferrable => "deferrable",
    Deferred => "deferred",
    Delete => "delete",
    Desc => "desc",
    Distinct => "distinct",
    Else => "else",
    End => "end",
    Escape => "escape",
    Except => "except",
    Exclude => "exclude",
    Exists => "exists",
    Fail => "fail",
    False => "false",
    Filter => "filter",
    First => "first",
    Following => "following",
    Foreign => "foreign",
    From => "from",
    Full => "full",
    Generated => "generated",
    Glob => "glob",
    Group => "group",
    Groups => "groups",
    Having => "having",
    If => "if",
    Ignore => "ignore",
    Immediate => "immediate",
    In => "in",
    Indexed => "indexed",
    Initially => "initially",
    Inner => "inner",
    Intersect => "intersect",
    Is => "is",
    Isnull => "isnull",
    Join => "join",
    Key => "key",
    Last => "last",
    Left => "left",
    Like => "like",
    Limit => "limit",
    Match => "match",
    Natural => "natural",
    No => "no",
    Not => "not",
    Notnull => "notnull",
    Null => "null",
    Nulls => "nulls",
    Offset => "offset",
    On => "on",
    Or => "or",
    Order => "order",
    Others => "others",
    Outer => "outer",
    Over => "over",
    Partition => "partition",
    Preceding => "preceding",
    Primary => "primary",
    Raise => "raise",
    Range => "range",
    References => "references",
    Regexp => "regexp",
    Replace => "replace",
    Restrict => "restrict",
    Right => "right",
    Rollback => "rollback",
    Row => "row",
    Rowid => "rowid",
    Rows => "rows",
    Select => "select",
    Set => "set",
    Stored => "stored",
    Strict => "strict",
    Table => "table",
    Temp => "temp",
    Temporary => "temporary",
    Then => "then",
    Ties => "ties",
    True => "true",
    Unbounded => "unbounded",
    Union => "union",
    Unique => "unique",
    Update => "update",
    Using => "using",
    Virtual => "virtual",
    When => "when",
    Where => "where",
    Window => "window",
    With => "with",
    Without => "without",
}

impl Keyword {
    /// Keywords that can never be read as a bare column name inside an
    /// expression.
    pub const RESERVED: [Self; 41] = [
        Keyword::All,
        Keyword::And,
        Keyword::As,
        Keyword::Between,
        Keyword::Case,
        Keyword::Cast,
        Keyword::Check,
        Keyword::Collate,
        Keyword::Constraint,
        Keyword::Create,
        Keyword::Default,
        Keyword::Distinct,
        Keyword::Else,
        Keyword::End,
        Keyword::Escape,
        Keyword::Except,
        Keyword::Exists,
        Keyword::Foreign,
        Keyword::From,
        Keyword::Glob,
        Keyword::Group,
        Keyword::Having,
        Keyword::In,
        Keyword::Intersect,
        Keyword::Is,
        Keyword::Isnull,
        Keyword::Join,
        Keyword::Like,
        Keyword::Limit,
        Keyword::Not,
        Keyword::Notnull,
        Keyword::Null,
        Keyword::Offset,
        Keyword::On,
        Keyword::Or,
        Keyword::Order,
        Keyword::References,
        Keyword::Regexp,
        Keyword::Select,
        Keyword::Then,
        Keyword::Where,
    ];

    /// Keywords that open a table constraint inside a `CREATE TABLE` body.
    pub const TABLE_CONSTRAINTS: [Self; 5] = [
        Keyword::Constraint,
        Keyword::Primary,
        Keyword::Unique,
        Keyword::Check,
        Keyword::Foreign,
    ];

    pub fn is_reserved(self) -> bool {
        Self::RESERVED.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}
