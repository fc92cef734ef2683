use derive_more::Display;
use serde::Serialize;

/// Catalog of fatal error codes. The display form is stable and meant for
/// tooling that filters diagnostics by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ErrorCode {
    #[display("QS-E001")]
    UnexpectedCharacter,
    #[display("QS-E002")]
    UnterminatedString,
    #[display("QS-E003")]
    UnterminatedIdentifier,
    #[display("QS-E004")]
    UnterminatedComment,
    #[display("QS-E005")]
    InvalidBlobLiteral,
    #[display("QS-E006")]
    InvalidNumericLiteral,

    #[display("QS-E010")]
    UnexpectedEndOfInput,
    #[display("QS-E011")]
    UnexpectedToken,
    #[display("QS-E012")]
    UnsupportedSyntax,
    #[display("QS-E013")]
    DuplicateClause,

    #[display("QS-E020")]
    DuplicateTable,
    #[display("QS-E021")]
    DuplicateColumn,
    #[display("QS-E022")]
    UnknownTable,
    #[display("QS-E023")]
    UnknownColumn,
    #[display("QS-E024")]
    DuplicatePrimaryKey,
    #[display("QS-E025")]
    DuplicateUniqueConstraint,
    #[display("QS-E026")]
    InvalidAutoIncrement,
    #[display("QS-E027")]
    ForeignKeyMismatch,
    #[display("QS-E028")]
    ConstraintOrder,
    #[display("QS-E029")]
    InvalidTableOption,

    #[display("QS-E030")]
    InvalidParameter,
    #[display("QS-E031")]
    ParameterNameCollision,
    #[display("QS-E032")]
    AmbiguousColumn,
    #[display("QS-E033")]
    UnsupportedResultColumn,
}

/// Catalog of warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum WarningCode {
    /// `COLLATE` names a collation outside the built-in set.
    #[display("QS-W001")]
    UnknownCollation,
    /// `COLLATE` applied to a column whose affinity is not `TEXT`.
    #[display("QS-W002")]
    CollateOnNonText,
    /// Foreign key `MATCH` clause: parsed, never enforced by SQLite.
    #[display("QS-W003")]
    MatchNotEnforced,
    /// Two generated records share a name but disagree on a member type.
    /// Raised by the code generator consuming this model.
    #[display("QS-W004")]
    GeneratedRecordTypeMismatch,
}
