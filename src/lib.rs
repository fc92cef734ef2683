//! Front end for a restricted SQLite dialect.
//!
//! `qschema` turns `CREATE TABLE` schema text into a validated table/column
//! model and resolves `SELECT` queries against it:
//!
//! - `sql`         : position-tracked tokens and the tokenizer.
//! - `diagnostics` : error/warning codes, warning reporters, `ParseError`.
//! - `metadata`    : `DatabaseInfo`, `Table`, `Column`, type affinity, naming.
//! - `parser`      : token cursor, sub-parsers, expression and schema parsers.
//! - `query`       : bind parameters and the `SELECT` resolver.
//!
//! ```rust
//! use qschema::*;
//!
//! let mut warnings = CollectingReporter::default();
//! let database = parse_schema("CREATE TABLE contact (name Text, email Text);", &mut warnings)
//!     .expect("valid schema");
//! let query = parse_select("SELECT * FROM contact", &database, &mut warnings)
//!     .expect("valid query");
//! assert_eq!(query.columns.len(), 2);
//! ```

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

reexport!(testing, test);
reexport!(config);
reexport!(error);
reexport!(diagnostics);
reexport!(sql);
reexport!(metadata);
reexport!(parser);
reexport!(query);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, info, trace, warn};
