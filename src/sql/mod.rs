//! Position-tracked SQL tokenization.
//!
//! Modules:
//! - `keyword`    : Keywords the parsers compare tokens against.
//! - `token_kind` : Lexical classes (`Other`, literals, `Operator`).
//! - `token`      : `Token` and its `Position`.
//! - `literals`   : Scanners for string, blob, numeric and quoted-identifier literals.
//! - `tokenizer`  : Single pass tokenizer producing a `Vec<Token>` from raw SQL.
//!
//! Tokenization is total: either the whole input becomes tokens or the first
//! malformed construct is reported as a `ParseError` pointing at the
//! offending character.
//!
//! Example:
//! ```rust
//! use qschema::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table").unwrap();
//! assert!(tokens[0].is_keyword(Keyword::Select));
//! assert!(tokens.iter().any(|t| t.value == "my_table"));
//! ```

pub mod keyword;
pub mod literals;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use token::{Position, Token};
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;
