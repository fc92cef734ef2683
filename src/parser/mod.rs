//! Recursive-descent parsers over a token slice.
//!
//! - `cursor`         : read position with end-of-input aware accessors.
//! - `literal`, `type_name`, `collation` : small grammar fragments.
//! - `expression`, `window` : expressions, predicates, functions, windows.
//! - `schema`, `column_definition`, `table_constraint`, `foreign_key` :
//!   `CREATE TABLE` into the `DatabaseInfo` registry.
crate::reexport!(cursor);
crate::reexport!(literal);
crate::reexport!(type_name);
crate::reexport!(collation);
crate::reexport!(expression);
crate::reexport!(window);
crate::reexport!(schema);
crate::reexport!(column_definition);
crate::reexport!(table_constraint);
crate::reexport!(foreign_key);
crate::reexport!(schema_tests, test);
