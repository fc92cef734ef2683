#![cfg(test)]
use crate::*;
use rstest::rstest;

fn output_names(query: &QueryInfo) -> Vec<&str> {
    query.columns.iter().map(|c| c.output_name.as_str()).collect()
}

fn select_in(schema_sql: &str, sql: &str) -> ParseResult<QueryInfo> {
    let (database, mut warnings) = schema(schema_sql);
    parse_select(sql, &database, &mut warnings)
}

#[test_context(SchemaContext)]
#[test]
fn star_over_two_tables(ctx: &mut SchemaContext) {
    let query = ctx.select("SELECT * FROM contact, address").unwrap();
    assert!(query.is_processed());
    assert_eq!(query.query_type, QueryType::Select);
    assert_eq!(
        output_names(&query),
        [
            "ContactId1",
            "Name",
            "Email",
            "CreatedAt",
            "AddressId",
            "ContactId2",
            "Street",
            "City",
            "Zip"
        ]
    );
}

#[test]
fn prefixed_names_collide_again() {
    let query = select_in(
        "CREATE TABLE a (x INT, a_x INT); CREATE TABLE b (x INT);",
        "SELECT * FROM a, b",
    )
    .unwrap();
    assert_eq!(output_names(&query), ["AX1", "AX2", "BX"]);
}

#[test_context(SchemaContext)]
#[test]
fn named_columns_keep_their_types(ctx: &mut SchemaContext) {
    let query = ctx
        .select("SELECT contact.id, name, email, zip FROM contact, address")
        .unwrap();
    let columns: Vec<_> = query
        .columns
        .iter()
        .map(|c| (c.output_name.as_str(), c.output_type()))
        .collect();
    assert_eq!(
        columns,
        [
            ("Id", "i64".to_string()),
            ("Name", "String".to_string()),
            ("Email", "Option<String>".to_string()),
            ("Zip", "Option<String>".to_string()),
        ]
    );
    let address = ctx.table("address").id;
    assert_eq!(query.columns[3].table, address);
}

#[test_context(SchemaContext)]
#[test]
fn aliases_and_clauses(ctx: &mut SchemaContext) {
    let query = ctx
        .select(
            "SELECT c.name AS full_name, a.city FROM contact AS c, address a
             WHERE a.contact_id = c.id AND c.name LIKE :pattern
             ORDER BY c.name COLLATE NOCASE DESC, city
             LIMIT ? OFFSET ?;",
        )
        .unwrap();
    assert_eq!(output_names(&query), ["FullName", "City"]);
    let aliases: Vec<_> = query.from_tables.iter().map(|f| f.alias.as_str()).collect();
    assert_eq!(aliases, ["c", "a"]);
    let parameters: Vec<_> = query
        .parameters
        .iter()
        .map(|p| (p.number, p.output_name.as_str()))
        .collect();
    assert_eq!(parameters, [(1, "pattern"), (2, "param2"), (3, "param3")]);
}

#[test_context(SchemaContext)]
#[test]
fn ambiguous_column_is_positioned(ctx: &mut SchemaContext) {
    let err = ctx.select("SELECT id FROM contact, address").unwrap_err();
    assert_eq!(err.code, ErrorCode::AmbiguousColumn);
    assert_eq!(err.message, "Ambiguous column name 'id'");
    assert_eq!(err.position, Some(Position::new(7, 0, 7)));
}

#[test_context(SchemaContext)]
#[test]
fn all_columns_of_one_table(ctx: &mut SchemaContext) {
    let query = ctx.select("SELECT contact.*, city FROM contact, address").unwrap();
    assert_eq!(output_names(&query), ["Id", "Name", "Email", "CreatedAt", "City"]);
    assert!(matches!(
        &query.column_sources[0],
        ColumnSource::AllColumnsOfTable { table } if table.value == "contact"
    ));
}

#[test_context(SchemaContext)]
#[test]
fn self_join_prefixes_both_sides(ctx: &mut SchemaContext) {
    let query = ctx
        .select("SELECT a1.city, a2.city FROM address a1, address a2")
        .unwrap();
    assert_eq!(output_names(&query), ["AddressCity1", "AddressCity2"]);
}

#[test_context(SchemaContext)]
#[test]
fn colliding_aliases_are_numbered(ctx: &mut SchemaContext) {
    let query = ctx
        .select("SELECT name AS n, city AS n FROM contact, address")
        .unwrap();
    assert_eq!(output_names(&query), ["N1", "N2"]);
}

#[test_context(SchemaContext)]
#[test]
fn distinct_and_rowid(ctx: &mut SchemaContext) {
    let query = ctx.select("SELECT DISTINCT rowid, name FROM contact").unwrap();
    assert!(query.distinct);
    assert_eq!(query.columns[0].output_type(), "i64");
    assert!(!ctx.select("SELECT ALL name FROM contact").unwrap().distinct);
}

#[rstest]
#[case("SELECT name FROM contact WHERE id IN (SELECT contact_id FROM address)")]
#[case("SELECT name FROM contact INDEXED BY contact_name, address NOT INDEXED")]
#[case("SELECT name FROM contact WHERE EXISTS (SELECT 1) ORDER BY created_at NULLS FIRST LIMIT 10, 5")]
#[case("SELECT street FROM address WHERE zip BETWEEN '1000' AND '2000' AND city IS NOT NULL")]
#[case("select Name from CONTACT where NAME = ?1 or NAME = ?1")]
fn accepted_queries(#[case] sql: &str) {
    if let Err(err) = select_in(CONTACT_SCHEMA, sql) {
        panic!("{sql}: {err}");
    }
}

#[rstest]
#[case::unknown_column("SELECT nope FROM contact", ErrorCode::UnknownColumn)]
#[case::unknown_qualified_column("SELECT contact.city FROM contact", ErrorCode::UnknownColumn)]
#[case::unknown_table("SELECT * FROM nope", ErrorCode::UnknownTable)]
#[case::table_not_in_from("SELECT address.city FROM contact", ErrorCode::UnknownTable)]
#[case::star_of_missing_table("SELECT address.* FROM contact", ErrorCode::UnknownTable)]
#[case::where_not_in_from("SELECT name FROM contact WHERE address.city = 'x'", ErrorCode::UnknownTable)]
#[case::literal("SELECT 1 FROM contact", ErrorCode::UnsupportedResultColumn)]
#[case::aggregate("SELECT count(*) FROM contact", ErrorCode::UnsupportedResultColumn)]
#[case::computed("SELECT name || email FROM contact", ErrorCode::UnsupportedResultColumn)]
#[case::join("SELECT * FROM contact JOIN address", ErrorCode::UnsupportedSyntax)]
#[case::left_join("SELECT * FROM contact c LEFT JOIN address a", ErrorCode::UnsupportedSyntax)]
#[case::from_sub_query("SELECT * FROM (SELECT 1)", ErrorCode::UnsupportedSyntax)]
#[case::schema_qualified("SELECT * FROM main.contact", ErrorCode::UnsupportedSyntax)]
#[case::insert("INSERT INTO contact VALUES (1)", ErrorCode::UnsupportedSyntax)]
#[case::group_by("SELECT name FROM contact GROUP BY name", ErrorCode::UnexpectedToken)]
#[case::duplicate_alias("SELECT * FROM contact c, address c", ErrorCode::DuplicateTable)]
#[case::same_table_twice("SELECT * FROM contact, contact", ErrorCode::DuplicateTable)]
#[case::empty("", ErrorCode::UnexpectedEndOfInput)]
#[case::missing_column("SELECT FROM contact", ErrorCode::UnexpectedToken)]
#[case::parameter_collision("SELECT name FROM contact WHERE id = ? OR name = :param1", ErrorCode::ParameterNameCollision)]
fn rejected_queries(#[case] sql: &str, #[case] code: ErrorCode) {
    match select_in(CONTACT_SCHEMA, sql) {
        Ok(_) => panic!("{sql} should be rejected"),
        Err(err) => assert_eq!(err.code, code, "{sql}: {err}"),
    }
}

#[test_context(SchemaContext)]
#[test]
fn processing_is_idempotent(ctx: &mut SchemaContext) {
    let mut query = ctx.select("SELECT * FROM contact, address").unwrap();
    let before = query.clone();
    query.process(&ctx.database).unwrap();
    assert_eq!(query, before);
}

#[test_context(SchemaContext)]
#[test]
fn manual_query_info(ctx: &mut SchemaContext) {
    let contact = ctx.table("contact").id;
    let mut query = QueryInfo::new(QueryType::Select);
    query.add_from_table("contact", contact);
    query.add_column_source(ColumnSource::AllColumnsOfAllTables);
    assert!(query.columns.is_empty());
    query.process(&ctx.database).unwrap();
    assert_eq!(query.columns.len(), 4);
}

#[test_context(SchemaContext)]
#[test]
fn serializes_with_tagged_sources(ctx: &mut SchemaContext) {
    let query = ctx.select("SELECT *, name AS label FROM contact").unwrap();
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["query_type"], "Select");
    assert_eq!(json["column_sources"][0]["kind"], "AllColumnsOfAllTables");
    assert_eq!(json["column_sources"][1]["kind"], "NamedColumn");
    assert_eq!(json["column_sources"][1]["alias"], "label");
    assert!(json.get("processed").is_none());
}
