#![cfg(test)]
use crate::*;
use rstest::rstest;

fn names(table: &Table) -> Vec<&str> {
    table.columns.iter().map(|c| c.sql_name.as_str()).collect()
}

#[test]
fn contact_table() {
    let sql = "CREATE TABLE contact (name Text, email Text);";
    let (database, warnings) = schema(sql);
    assert!(warnings.is_empty());
    let [contact] = database.tables.as_slice() else {
        panic!("expected one table");
    };
    assert_eq!(contact.sql_name, "contact");
    assert_eq!(contact.output_name, "Contact");
    assert_eq!(contact.create_table_text, sql);
    assert_eq!(names(contact), ["name", "email"]);
    for column in &contact.columns {
        assert_eq!(column.affinity, TypeAffinity::Text);
        assert!(!column.not_null);
        assert_eq!(column.table, contact.id);
    }
}

#[test]
fn composite_primary_key() {
    let (database, _) = schema("CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id));");
    let contact = &database.tables[0];
    assert_eq!(contact.primary_key, vec![0, 1]);
    assert_eq!(
        contact.primary_key_columns().map(|c| c.sql_name.as_str()).collect::<Vec<_>>(),
        ["name", "id"]
    );
    assert!(contact.columns.iter().all(|c| !c.primary_key));
}

#[rstest]
#[case::second_primary_key(
    "CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id), PRIMARY KEY (id));",
    ErrorCode::DuplicatePrimaryKey
)]
#[case::inline_then_table(
    "CREATE TABLE contact (name Text PRIMARY KEY, id integer, PRIMARY KEY (name, id));",
    ErrorCode::DuplicatePrimaryKey
)]
#[case::two_inline(
    "CREATE TABLE contact (name Text PRIMARY KEY, id integer PRIMARY KEY);",
    ErrorCode::DuplicatePrimaryKey
)]
#[case::unique_on_primary_key(
    "CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id), UNIQUE (id, name));",
    ErrorCode::DuplicateUniqueConstraint
)]
#[case::unique_on_key_member(
    "CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id), UNIQUE (name));",
    ErrorCode::DuplicateUniqueConstraint
)]
#[case::unique_on_last_key_member(
    "CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id), UNIQUE (id));",
    ErrorCode::DuplicateUniqueConstraint
)]
#[case::unique_on_primary_column(
    "CREATE TABLE contact (id integer PRIMARY KEY UNIQUE);",
    ErrorCode::DuplicateUniqueConstraint
)]
fn table_already_has_primary_key(#[case] sql: &str, #[case] code: ErrorCode) {
    let err = schema_error(sql);
    assert_eq!(err.code, code);
    assert!(
        err.message.contains("Table already has a primary key"),
        "{}",
        err.message
    );
}

#[test]
fn primary_key_error_points_at_constraint() {
    let err = schema_error("CREATE TABLE t (a INT PRIMARY KEY,\n  b INT PRIMARY KEY);");
    let token = err.token.expect("error token");
    assert_eq!(token.value, "PRIMARY");
    assert_eq!((token.position.line, token.position.column), (1, 8));
}

#[test]
fn table_level_single_column_primary_key_sets_flag() {
    let (database, _) = schema("CREATE TABLE t (id INTEGER, PRIMARY KEY (id));");
    let id = &database.tables[0].columns[0];
    assert!(id.primary_key);
    assert!(id.is_rowid_alias());
    assert_eq!(id.output_type(), "i64");
}

#[rstest]
#[case("INT")]
#[case("BIGINT")]
#[case("integer(10)")]
#[case("TEXT")]
#[case("")]
fn autoincrement_requires_integer(#[case] declared: &str) {
    let err = schema_error(&format!(
        "CREATE TABLE t (id {declared} PRIMARY KEY AUTOINCREMENT);"
    ));
    assert_eq!(err.code, ErrorCode::InvalidAutoIncrement);
    assert_eq!(err.token.map(|t| t.value), Some("AUTOINCREMENT".to_string()));
}

#[test]
fn autoincrement_on_integer() {
    let (database, _) = schema("CREATE TABLE t (id integer PRIMARY KEY ASC AUTOINCREMENT);");
    let id = &database.tables[0].columns[0];
    assert!(id.primary_key && id.auto_increment);
}

#[test]
fn unique_constraints() {
    let (database, _) = schema("CREATE TABLE t (a TEXT UNIQUE, b INT, c INT, UNIQUE (b, c));");
    let t = &database.tables[0];
    assert!(t.columns[0].unique);
    assert_eq!(t.unique_sets, vec![vec![1, 2]]);

    let err = schema_error("CREATE TABLE t (a, b, UNIQUE (a, b), UNIQUE (b, a));");
    assert_eq!(err.code, ErrorCode::DuplicateUniqueConstraint);
    assert_eq!(err.message, "Table already has a unique constraint on (b, a)");

    let err = schema_error("CREATE TABLE t (a UNIQUE, UNIQUE (a));");
    assert_eq!(err.message, "Column 'a' is already unique");
}

#[rstest]
#[case::implicit_composite(
    "CREATE TABLE a (x INT, y INT, PRIMARY KEY (x, y)); CREATE TABLE b (x INT REFERENCES a);"
)]
#[case::implicit_without_primary_key("CREATE TABLE a (x INT); CREATE TABLE b (x INT REFERENCES a);")]
#[case::explicit_not_unique("CREATE TABLE a (x INT, y INT); CREATE TABLE b (x INT REFERENCES a (y));")]
#[case::explicit_subset_of_key(
    "CREATE TABLE a (x INT, y INT, PRIMARY KEY (x, y)); CREATE TABLE b (p INT, FOREIGN KEY (p) REFERENCES a (x));"
)]
fn foreign_key_without_matching_key(#[case] sql: &str) {
    let err = schema_error(sql);
    assert_eq!(err.code, ErrorCode::ForeignKeyMismatch);
    assert!(
        err.message
            .starts_with("Referenced table doesn't have a matching foreign key"),
        "{}",
        err.message
    );
}

#[test]
fn foreign_key_column_count_mismatch() {
    let err = schema_error(
        "CREATE TABLE a (x INT, y INT, UNIQUE (x, y)); CREATE TABLE b (p INT, FOREIGN KEY (p) REFERENCES a (x, y));",
    );
    assert_eq!(err.code, ErrorCode::ForeignKeyMismatch);
    assert_eq!(err.token.map(|t| t.value), Some("a".to_string()));
}

#[test]
fn foreign_keys_are_recorded() {
    let (database, _) = schema(
        "CREATE TABLE a (x INT, y INT UNIQUE, PRIMARY KEY (x, y));
         CREATE TABLE b (
             p INT,
             q INT REFERENCES a (y) ON DELETE SET NULL ON UPDATE CASCADE,
             r INT,
             CONSTRAINT fk FOREIGN KEY (p, r) REFERENCES a NOT DEFERRABLE
         );",
    );
    let (a, b) = (&database.tables[0], &database.tables[1]);
    let [column_level, table_level] = b.foreign_keys.as_slice() else {
        panic!("expected two foreign keys");
    };
    assert_eq!(column_level.columns, vec![1]);
    assert_eq!(column_level.foreign_table, a.id);
    assert_eq!(column_level.foreign_columns, vec![1]);
    assert_eq!(column_level.on_delete, ForeignKeyAction::SetNull);
    assert_eq!(column_level.on_update, ForeignKeyAction::Cascade);

    assert_eq!(table_level.columns, vec![0, 2]);
    assert_eq!(table_level.foreign_columns, vec![0, 1]);
    assert_eq!(table_level.on_delete, ForeignKeyAction::NoAction);
}

#[test]
fn foreign_key_to_later_table_is_unknown() {
    let err = schema_error("CREATE TABLE b (x INT REFERENCES a); CREATE TABLE a (x INT PRIMARY KEY);");
    assert_eq!(err.code, ErrorCode::UnknownTable);
    assert_eq!(err.message, "Referenced table 'a' does not exist");
}

#[test]
fn self_referencing_foreign_key() {
    let (database, _) =
        schema("CREATE TABLE node (id INTEGER PRIMARY KEY, parent INTEGER REFERENCES node (id));");
    let node = &database.tables[0];
    assert_eq!(node.foreign_keys[0].foreign_table, node.id);
}

#[test]
fn match_clause_warns() {
    let (_, warnings) = schema(
        "CREATE TABLE a (x INT PRIMARY KEY);
         CREATE TABLE b (x INT REFERENCES a ON DELETE NO ACTION MATCH FULL DEFERRABLE INITIALLY DEFERRED);",
    );
    assert_eq!(warnings.len(), 1);
    assert!(warnings.has(WarningCode::MatchNotEnforced));
}

#[test]
fn collation_warnings() {
    let (database, warnings) = schema("CREATE TABLE a (x TEXT COLLATE nocase, y INTEGER COLLATE german);");
    let codes: Vec<_> = warnings.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        [WarningCode::UnknownCollation, WarningCode::CollateOnNonText]
    );
    let columns = &database.tables[0].columns;
    assert_eq!(columns[0].collation.as_deref(), Some("nocase"));
    assert_eq!(columns[1].collation.as_deref(), Some("german"));
}

#[test]
fn column_constraints_in_any_order() {
    let (database, warnings) = schema(
        "CREATE TEMP TABLE IF NOT EXISTS [order item] (
            id INTEGER CONSTRAINT pk PRIMARY KEY DESC ON CONFLICT REPLACE AUTOINCREMENT,
            \"quantity\" INT NOT NULL ON CONFLICT ABORT DEFAULT -1 CHECK (quantity > 0 AND note <> ')'),
            price REAL NULL DEFAULT (quantity * 2.5),
            total REAL GENERATED ALWAYS AS (price * quantity) STORED,
            note TEXT AS (upper(price)) VIRTUAL,
            created TEXT DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT positive CHECK (price >= 0)
        );",
    );
    assert!(warnings.is_empty());
    let table = &database.tables[0];
    assert!(table.is_temporary);
    assert_eq!(table.sql_name, "order item");
    assert_eq!(table.output_name, "OrderItem");
    assert_eq!(
        names(table),
        ["id", "quantity", "price", "total", "note", "created"]
    );
    assert!(table.columns[0].auto_increment);
    assert!(table.columns[1].not_null);
    assert_eq!(table.columns[1].output_type(), "i64");
    assert_eq!(table.columns[2].output_type(), "Option<f64>");
}

#[rstest]
#[case::duplicate_table("CREATE TABLE a (x); CREATE TABLE A (y);", ErrorCode::DuplicateTable)]
#[case::table_output_name(
    "CREATE TABLE user_account (x); CREATE TABLE UserAccount (y);",
    ErrorCode::DuplicateTable
)]
#[case::duplicate_column("CREATE TABLE a (x, X);", ErrorCode::DuplicateColumn)]
#[case::column_output_name("CREATE TABLE a (first_name, FirstName);", ErrorCode::DuplicateColumn)]
#[case::column_after_constraint("CREATE TABLE a (x, PRIMARY KEY (x), y);", ErrorCode::ConstraintOrder)]
#[case::unknown_constraint_column("CREATE TABLE a (x, UNIQUE (y));", ErrorCode::UnknownColumn)]
#[case::repeated_constraint_column("CREATE TABLE a (x, y, UNIQUE (x, x));", ErrorCode::DuplicateColumn)]
#[case::parameter_number_overflow(
    "CREATE TABLE t (a INT, b INT DEFAULT (?4294967295 + ?));",
    ErrorCode::InvalidParameter
)]
#[case::parameter_after_maximum(
    "CREATE TABLE t (a INT, b INT DEFAULT (?32766 + ?));",
    ErrorCode::InvalidParameter
)]
#[case::unknown_default_column("CREATE TABLE a (x INT DEFAULT (y + 1));", ErrorCode::UnknownColumn)]
#[case::not_create("DROP TABLE a;", ErrorCode::UnsupportedSyntax)]
#[case::create_index("CREATE INDEX i ON a (x);", ErrorCode::UnsupportedSyntax)]
#[case::create_as_select("CREATE TABLE a AS SELECT 1;", ErrorCode::UnsupportedSyntax)]
#[case::schema_qualified("CREATE TABLE main.a (x);", ErrorCode::UnsupportedSyntax)]
#[case::missing_semicolon("CREATE TABLE a (x)", ErrorCode::UnexpectedEndOfInput)]
#[case::empty_body("CREATE TABLE a ();", ErrorCode::UnexpectedToken)]
#[case::primary_without_key("CREATE TABLE a (x INT PRIMARY);", ErrorCode::UnexpectedToken)]
#[case::stray_word("CREATE TABLE a (x INT NOT NULL foo);", ErrorCode::UnexpectedToken)]
#[case::unbalanced_check("CREATE TABLE a (x INT CHECK (x > (1);", ErrorCode::UnexpectedEndOfInput)]
#[case::bad_conflict("CREATE TABLE a (x INT UNIQUE ON CONFLICT NOTHING);", ErrorCode::UnexpectedToken)]
#[case::without_rowid_no_key("CREATE TABLE a (x TEXT) WITHOUT ROWID;", ErrorCode::InvalidTableOption)]
#[case::strict_bad_type("CREATE TABLE a (x VARCHAR(10)) STRICT;", ErrorCode::InvalidTableOption)]
#[case::strict_no_type("CREATE TABLE a (x) STRICT;", ErrorCode::InvalidTableOption)]
#[case::strict_twice("CREATE TABLE a (x INT) STRICT, STRICT;", ErrorCode::DuplicateClause)]
#[case::option_trailing_comma("CREATE TABLE a (x INT) STRICT, ;", ErrorCode::UnexpectedToken)]
fn rejected(#[case] sql: &str, #[case] code: ErrorCode) {
    let err = schema_error(sql);
    assert_eq!(err.code, code, "{err}");
}

#[test]
fn unique_on_composite_key_member_message() {
    let err = schema_error(
        "CREATE TABLE contact (name Text, id integer, PRIMARY KEY (name, id), UNIQUE (name));",
    );
    assert_eq!(
        err.message,
        "Table already has a primary key on (name, id) which includes column 'name'"
    );
    assert_eq!(err.token.map(|t| t.value), Some("UNIQUE".to_string()));
}

#[test]
fn unexpected_constraint_token_names_column() {
    let err = schema_error("CREATE TABLE a (x INT NOT NULL foo);");
    assert_eq!(err.message, "Unexpected 'foo' in the definition of column 'x'");
}

#[test]
fn end_of_input_has_no_token() {
    let err = schema_error("CREATE TABLE a (x INT");
    assert_eq!(err.code, ErrorCode::UnexpectedEndOfInput);
    assert!(err.token.is_none());
    assert!(err.to_string().ends_with("at end of input"));
}

#[test]
fn table_options() {
    let (database, _) =
        schema("CREATE TABLE a (id INTEGER PRIMARY KEY, v ANY, t text) STRICT, WITHOUT ROWID;");
    let a = &database.tables[0];
    assert!(a.strict && a.without_rowid);
    assert!(!a.has_column("rowid"));
}

#[test]
fn comments_and_empty_statements() {
    let (database, _) = schema(";\n-- contacts\nCREATE TABLE a (x /* the x */ INT);;\n");
    let a = &database.tables[0];
    assert_eq!(a.create_table_text, "CREATE TABLE a (x /* the x */ INT);");
    assert_eq!(a.columns[0].sql_type, "INT");
}

#[test]
fn type_names_are_normalized() {
    let (database, _) = schema(
        "CREATE TABLE a (p VARCHAR ( 80 ), q unsigned   big int, r DECIMAL(10, 5), s DOUBLE PRECISION, t);",
    );
    let types: Vec<_> = database.tables[0]
        .columns
        .iter()
        .map(|c| (c.sql_type.as_str(), c.affinity))
        .collect();
    assert_eq!(
        types,
        [
            ("VARCHAR(80)", TypeAffinity::Text),
            ("unsigned big int", TypeAffinity::Integer),
            ("DECIMAL(10,5)", TypeAffinity::Numeric),
            ("DOUBLE PRECISION", TypeAffinity::Real),
            ("", TypeAffinity::Blob),
        ]
    );
}

#[test]
fn create_table_text_round_trips() {
    let (database, _) = schema(CONTACT_SCHEMA);
    let text = database
        .tables
        .iter()
        .map(|t| t.create_table_text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let (reparsed, _) = schema(&text);
    assert_eq!(reparsed, database);
}

#[test]
fn continues_an_existing_registry() {
    let (database, _) = schema("CREATE TABLE a (x INT PRIMARY KEY);");
    let sql = "CREATE TABLE b (x INT REFERENCES a);";
    let tokens = tokenize(sql).unwrap();
    let mut warnings = CollectingReporter::default();
    let database = SchemaParser::new(sql, &mut warnings)
        .with_database(database)
        .parse(&tokens)
        .unwrap();
    assert_eq!(database.tables.len(), 2);
    assert_eq!(database.tables[1].foreign_keys.len(), 1);
}
