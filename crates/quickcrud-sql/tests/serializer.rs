use pretty_assertions::assert_eq;
use quickcrud_core::{
    driver::operation::{Select, Transaction},
    schema::{Field, Model, Type},
    stmt::{Expr, OrderBy, Record, Value},
};
use quickcrud_sql::{
    stmt::{CreateTable, Delete, Insert, Query, Update},
    Serializer, Statement,
};

fn parent() -> Model {
    Model::new(
        "parent",
        [
            Field::new("id", Type::I32).primary_key(),
            Field::new("name", Type::Text).not_null().unique(),
        ],
    )
}

fn child() -> Model {
    Model::new(
        "child",
        [
            Field::new("id", Type::I32).primary_key(),
            Field::new("parent_id", Type::I32).references("parent", "id"),
            Field::new("tags", Type::Array(Box::new(Type::Text))),
            Field::new("code", Type::Char(10)),
        ],
    )
}

fn sqlite(stmt: impl Into<Statement>) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::sqlite().serialize(&stmt.into(), &mut params);
    (sql, params)
}

fn postgresql(stmt: impl Into<Statement>) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::postgresql().serialize(&stmt.into(), &mut params);
    (sql, params)
}

#[test]
fn create_table_sqlite() {
    let (sql, params) = sqlite(CreateTable::from_model(&child()));

    assert_eq!(
        sql,
        "CREATE TABLE \"child\" (\n    \
             \"id\" INTEGER NOT NULL,\n    \
             \"parent_id\" INTEGER,\n    \
             \"tags\" TEXT,\n    \
             \"code\" TEXT,\n    \
             PRIMARY KEY (\"id\"),\n    \
             FOREIGN KEY (\"parent_id\") REFERENCES \"parent\" (\"id\")\n\
         );"
    );
    assert!(params.is_empty());
}

#[test]
fn create_table_postgresql() {
    let (sql, _) = postgresql(CreateTable::from_model(&child()));

    assert!(sql.contains("\"tags\" TEXT[],"), "{sql}");
    assert!(sql.contains("\"code\" CHAR(10),"), "{sql}");
}

#[test]
fn create_table_unique_columns() {
    let (sql, _) = sqlite(CreateTable::from_model(&parent()));

    assert_eq!(
        sql,
        "CREATE TABLE \"parent\" (\n    \
             \"id\" INTEGER NOT NULL,\n    \
             \"name\" TEXT NOT NULL,\n    \
             PRIMARY KEY (\"id\"),\n    \
             UNIQUE (\"name\")\n\
         );"
    );
}

#[test]
fn insert_returns_every_column() {
    let record: Record = [("name", Value::from("a"))].into_iter().collect();
    let (sql, params) = sqlite(Insert::new(&parent(), record));

    assert_eq!(
        sql,
        "INSERT INTO \"parent\" (\"name\") VALUES (?1) RETURNING \"id\", \"name\";"
    );
    assert_eq!(params, vec![Value::from("a")]);
}

#[test]
fn insert_without_columns_uses_defaults() {
    let (sql, params) = postgresql(Insert::new(&parent(), Record::new()));

    assert_eq!(
        sql,
        "INSERT INTO \"parent\" DEFAULT VALUES RETURNING \"id\", \"name\";"
    );
    assert!(params.is_empty());
}

#[test]
fn query_without_filter() {
    let select = Select::new("parent", Expr::from(true));
    let (sql, _) = sqlite(Query::from_select(&parent(), select));

    assert_eq!(sql, "SELECT \"id\", \"name\" FROM \"parent\";");
}

#[test]
fn query_with_filter_order_and_paging() {
    let mut select = Select::new(
        "parent",
        Expr::and(
            Expr::ge(Expr::column("id"), Value::I32(2)),
            Expr::like(Expr::column("name"), Value::from("a%")),
        ),
    );
    select.order_by = vec![OrderBy::desc("id"), OrderBy::asc("name")];
    select.limit = Some(10);
    select.offset = Some(5);

    let (sql, params) = sqlite(Query::from_select(&parent(), select));

    assert_eq!(
        sql,
        "SELECT \"id\", \"name\" FROM \"parent\" \
         WHERE \"id\" >= ?1 AND \"name\" LIKE ?2 \
         ORDER BY \"id\" DESC, \"name\" ASC LIMIT 10 OFFSET 5;"
    );
    assert_eq!(params, vec![Value::I32(2), Value::from("a%")]);
}

#[test]
fn sqlite_offset_without_limit() {
    let mut select = Select::new("parent", Expr::from(true));
    select.offset = Some(3);

    let (sql, _) = sqlite(Query::from_select(&parent(), select));
    assert_eq!(
        sql,
        "SELECT \"id\", \"name\" FROM \"parent\" LIMIT -1 OFFSET 3;"
    );

    let mut select = Select::new("parent", Expr::from(true));
    select.offset = Some(3);

    let (sql, _) = postgresql(Query::from_select(&parent(), select));
    assert_eq!(sql, "SELECT \"id\", \"name\" FROM \"parent\" OFFSET 3;");
}

#[test]
fn case_insensitive_like_per_flavor() {
    let filter = Expr::ilike(Expr::column("name"), Value::from("A%"));

    let (sql, _) = sqlite(Query::from_select(
        &parent(),
        Select::new("parent", filter.clone()),
    ));
    assert!(
        sql.ends_with("WHERE lower(\"name\") LIKE lower(?1);"),
        "{sql}"
    );

    let (sql, _) = postgresql(Query::from_select(&parent(), Select::new("parent", filter)));
    assert!(sql.ends_with("WHERE \"name\" ILIKE $1;"), "{sql}");
}

#[test]
fn in_list_expands_one_placeholder_per_item() {
    let filter = Expr::in_list(
        Expr::column("id"),
        Value::from(vec![Value::I32(1), Value::I32(2)]),
    );
    let (sql, params) = postgresql(Query::from_select(&parent(), Select::new("parent", filter)));

    assert!(sql.ends_with("WHERE \"id\" IN ($1, $2);"), "{sql}");
    assert_eq!(params, vec![Value::I32(1), Value::I32(2)]);
}

#[test]
fn empty_in_list_matches_nothing() {
    let filter = Expr::in_list(Expr::column("id"), Value::from(Vec::<Value>::new()));
    let (sql, params) = sqlite(Query::from_select(&parent(), Select::new("parent", filter)));

    assert!(sql.ends_with("WHERE \"id\" IN (NULL);"), "{sql}");
    assert!(params.is_empty());
}

#[test]
fn null_comparisons_test_nullness() {
    let filter = Expr::and(
        Expr::eq(Expr::column("name"), Value::Null),
        Expr::ne(Expr::column("id"), Value::Null),
    );
    let (sql, params) = sqlite(Query::from_select(&parent(), Select::new("parent", filter)));

    assert!(
        sql.ends_with("WHERE \"name\" IS NULL AND \"id\" IS NOT NULL;"),
        "{sql}"
    );
    assert!(params.is_empty());
}

#[test]
fn update_sets_assignments() {
    let assignments: Record = [("name", Value::from("b"))].into_iter().collect();
    let filter = Expr::eq(Expr::column("id"), Value::I32(1));
    let (sql, params) = postgresql(Update::new(&parent(), assignments, filter));

    assert_eq!(
        sql,
        "UPDATE \"parent\" SET \"name\" = $1 WHERE \"id\" = $2 RETURNING \"id\", \"name\";"
    );
    assert_eq!(params, vec![Value::from("b"), Value::I32(1)]);
}

#[test]
fn delete_without_filter_targets_every_row() {
    let (sql, _) = sqlite(Delete::new(&parent(), Expr::from(true)));

    assert_eq!(sql, "DELETE FROM \"parent\" RETURNING \"id\", \"name\";");
}

#[test]
fn identifiers_are_escaped() {
    let model = Model::new("we\"ird", [Field::new("id", Type::I32).primary_key()]);
    let (sql, _) = sqlite(Delete::new(&model, Expr::from(true)));

    assert_eq!(sql, "DELETE FROM \"we\"\"ird\" RETURNING \"id\";");
}

#[test]
fn transactions() {
    let serializer = Serializer::sqlite();

    assert_eq!(serializer.serialize_transaction(&Transaction::Start), "BEGIN");
    assert_eq!(serializer.serialize_transaction(&Transaction::Commit), "COMMIT");
    assert_eq!(
        serializer.serialize_transaction(&Transaction::Rollback),
        "ROLLBACK"
    );
}

#[test]
fn transaction_operations_have_no_statement() {
    let op = Transaction::Start.into();
    assert!(Statement::from_operation(&parent(), op).is_none());
}
