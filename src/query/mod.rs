//! `SELECT` resolution.
//!
//! - `parameter` : bind parameters and the per-parse numbering context.
//! - `info`      : `QueryInfo`, deferred column sources, collision renaming.
//! - `select`    : the `SELECT` parser.
crate::reexport!(parameter);
crate::reexport!(info);
crate::reexport!(select);
crate::reexport!(select_tests, test);
