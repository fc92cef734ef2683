//! Diagnostics shared by the tokenizer and every parser.
//!
//! Two channels exist:
//! - fatal errors (`ParseError`): the parse stops at the first one and the
//!   error carries the offending token (or none when input ran out);
//! - warnings (`Warning`): valid but risky SQL, routed through an injectable
//!   `Reporter` so callers decide whether to collect, log or drop them.
//!
//! Both carry a stable code from the `ErrorCode` / `WarningCode` catalogs.

pub mod code;
pub mod parse_error;
pub mod reporter;
pub mod warning;

pub use code::{ErrorCode, WarningCode};
pub use parse_error::{ParseError, ParseResult};
pub use reporter::{CollectingReporter, Reporter, SilentReporter, TracingReporter};
pub use warning::Warning;
