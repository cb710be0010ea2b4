use axum::{http::StatusCode, Router};
use pretty_assertions::assert_eq;
use quickcrud::{CrudMethod, CrudRouter, Db};
use serde_json::{json, Value};
use tests::{models, query, setup, Client};

/// `/test` serves the default methods, `/test_2` upserts (its redirect route
/// collides and is skipped), `/test_3` creates with a redirect.
async fn client() -> (Db, Client) {
    let db = setup([models::single_unique_table()]).await;
    let table = "test_single_unique_table";

    let route_1 = CrudRouter::builder(db.clone(), table)
        .prefix("/test")
        .exclude_columns(["bytea_value"])
        .build()
        .unwrap();

    let route_2 = CrudRouter::builder(db.clone(), table)
        .prefix("/test_2")
        .methods([CrudMethod::UpsertOne, CrudMethod::PostRedirectGet])
        .exclude_columns(["bytea_value"])
        .build()
        .unwrap();

    let route_3 = CrudRouter::builder(db.clone(), table)
        .prefix("/test_3")
        .methods([CrudMethod::FindOne, CrudMethod::PostRedirectGet])
        .exclude_columns(["bytea_value"])
        .build()
        .unwrap();

    let app = Router::new().merge(route_1).merge(route_2).merge(route_3);
    (db, Client::new(app))
}

fn row(float4_value: f64) -> Value {
    json!({
        "bool_value": true,
        "char_value": "string",
        "date_value": "2021-07-24",
        "float4_value": float4_value,
        "float8_value": 0,
        "int2_value": 0,
        "int4_value": 0,
        "int8_value": 0,
        "interval_value": 0,
        "json_value": {},
        "jsonb_value": {},
        "numeric_value": 0,
        "text_value": "string",
        "timestamp_value": "2021-07-24T02:54:53.285",
        "timestamptz_value": "2021-07-24T02:54:53.285Z",
        "varchar_value": "string",
        "array_value": [0],
        "array_str__value": ["string"],
        "time_value": "18:18:18",
        "timetz_value": "18:18:18+00:00",
    })
}

type Filters = Vec<(&'static str, String)>;

/// Filters every row built by [`row`] satisfies.
fn row_filters() -> Filters {
    [
        ("bool_value____list", "True"),
        ("char_value____str", "string%"),
        ("char_value____str_____matching_pattern", "case_sensitive"),
        ("date_value____from", "2021-07-22"),
        ("date_value____to", "2021-07-25"),
        ("float4_value____from", "-1"),
        ("float4_value____to", "200"),
        ("float8_value____from", "-1"),
        ("float8_value____to", "2"),
        ("float8_value____list", "0"),
        ("int2_value____from", "-1"),
        ("int2_value____to", "9"),
        ("int2_value____list", "0"),
        ("int4_value____from", "-1"),
        ("int4_value____to", "9"),
        ("int4_value____list", "0"),
        ("int8_value____from", "-1"),
        ("int8_value____to", "9"),
        ("int8_value____list", "0"),
        ("interval_value____from", "-1"),
        ("interval_value____to", "9"),
        ("interval_value____list", "0"),
        ("numeric_value____from", "-1"),
        ("numeric_value____to", "9"),
        ("numeric_value____list", "0"),
        ("text_value____list", "string"),
        ("time_value____from", "18:18:18+00:00"),
        ("time_value____to", "18:18:18+00:00"),
        ("time_value____list", "18:18:18+00:00"),
        ("timestamp_value____from", "2021-07-24T02:54:53.285"),
        ("timestamp_value____to", "2021-07-24T02:54:53.285"),
        ("timestamp_value____list", "2021-07-24T02:54:53.285"),
        ("timestamptz_value____from", "2021-07-24T02:54:53.285Z"),
        ("timestamptz_value____to", "2021-07-24T02:54:53.285Z"),
        ("timestamptz_value____list", "2021-07-24T02:54:53.285Z"),
        ("varchar_value____str", "string"),
        ("varchar_value____str_____matching_pattern", "case_sensitive"),
        ("varchar_value____list", "string"),
    ]
    .into_iter()
    .map(|(key, value)| (key, value.to_string()))
    .collect()
}

/// Replaces the value of every `key` pair.
fn set(filters: &mut Filters, key: &str, value: &str) {
    for (k, v) in filters.iter_mut() {
        if *k == key {
            *v = value.to_string();
        }
    }
}

fn item_uri(id: &str, filters: &Filters) -> String {
    format!("/test/{id}?{}", query(filters.clone()))
}

/// A full update payload, as echoed back by the server.
fn update_payload() -> Value {
    json!({
        "bool_value": false,
        "char_value": "string_u  ",
        "date_value": "2022-07-24",
        "float8_value": 10.5,
        "int2_value": 10,
        "int4_value": 10,
        "int8_value": 10,
        "interval_value": 3600.0,
        "json_value": {"test": "hello"},
        "jsonb_value": {"test": "hello"},
        "numeric_value": 10,
        "text_value": "string_update",
        "timestamp_value": "2022-07-24T02:54:53.285000",
        "timestamptz_value": "2022-07-24T02:54:53.285000+00:00",
        "varchar_value": "string",
        "array_value": [1, 2, 3, 4, 5],
        "array_str__value": ["test"],
        "time_value": "18:19:18",
        "timetz_value": "18:19:18+00:00",
    })
}

fn assert_echoes(row: &Value, expected: &Value) {
    for (key, value) in expected.as_object().unwrap() {
        assert_eq!(&row[key], value, "{key}");
    }
}

fn ids(rows: &Value) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

async fn insert(client: &Client, rows: Vec<Value>) -> Vec<String> {
    let response = client.post("/test", json!({ "insert": rows })).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    ids(&response.body)
}

#[tokio::test]
async fn create_one_then_find_one() {
    let (_db, client) = client().await;

    let created = client.post("/test_2", json!({"float4_value": 0.443})).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let id = created.body["id"].as_str().unwrap().to_string();
    assert_eq!(created.body["bool_value"], json!(false));
    assert_eq!(created.body["float8_value"], json!(10.1));
    assert_eq!(created.body["int8_value"], json!(99));
    assert!(created.body.get("bytea_value").is_none());

    let found = client.get(&format!("/test/{id}")).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body, created.body);

    // Re-read through a filter built from the echoed scalar values
    let filters: Vec<(String, String)> = created
        .body
        .as_object()
        .unwrap()
        .iter()
        .filter(|(key, _)| *key != "id")
        .filter_map(|(key, value)| match value {
            Value::Bool(v) => Some((key.clone(), v.to_string())),
            Value::Number(v) => Some((key.clone(), v.to_string())),
            Value::String(v) => Some((key.clone(), v.clone())),
            _ => None,
        })
        .collect();

    let found = client
        .get(&format!("/test/{id}?{}", query(filters)))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body, created.body);
}

#[tokio::test]
async fn find_one_misses_with_404() {
    let (_db, client) = client().await;

    let response = client
        .get("/test/1b4e28ba-2fa1-11d2-883f-0016d3cca427")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], json!("not_found"));
}

#[tokio::test]
async fn create_many_echoes_every_field() {
    let (_db, client) = client().await;

    let mut rows = vec![row(0.12), row(1.2), row(9.3)];
    for row in &mut rows {
        row["char_value"] = json!("string    ");
        row["date_value"] = json!("2021-07-23");
        row["float8_value"] = json!(0.0);
        row["interval_value"] = json!(0.0);
        row["timestamp_value"] = json!("2021-07-23T02:38:24.963000");
        row["timestamptz_value"] = json!("2021-07-23T02:38:24.963000+00:00");
    }

    let response = client.post("/test", json!({ "insert": rows })).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = response.body.as_array().unwrap();
    assert_eq!(created.len(), 3);
    for (row, expected) in created.iter().zip(&rows) {
        assert_echoes(row, expected);
    }
}

#[tokio::test]
async fn update_one_echoes_every_field() {
    let (_db, client) = client().await;

    let created = client.post("/test_2", json!({"float4_value": 0.98})).await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let mut payload = update_payload();
    payload["float4_value"] = json!(12.7);

    let response = client.put(&format!("/test/{id}"), payload.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_echoes(&response.body, &payload);
}

#[tokio::test]
async fn update_many_on_a_unique_column_conflicts() {
    let (_db, client) = client().await;

    let ids = insert(&client, vec![row(3.5), row(3.6), row(3.7)]).await;

    let mut filters = row_filters();
    filters.extend(ids.iter().map(|id| ("id____list", id.clone())));
    filters.extend(["3.5", "3.6", "3.7"].map(|v| ("float4_value____list", v.to_string())));

    let mut payload = update_payload();
    payload["float4_value"] = json!(10.58);

    let response = client
        .put(&format!("/test?{}", query(filters)), payload)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], json!("conflict"));

    // Rolled back
    let response = client.get("/test?float4_value=10.58").await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn patch_one_with_progressive_filters() {
    let (_db, client) = client().await;

    let [id] = <[String; 1]>::try_from(insert(&client, vec![row(5.78)]).await).unwrap();

    let mut filters = row_filters();
    filters.push(("float4_value____list", "5.78".to_string()));

    let uri = |filters: &Filters| item_uri(&id, filters);

    let payload = json!({"bool_value": false});
    let response = client.patch(&uri(&filters), payload.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_echoes(&response.body, &payload);

    set(&mut filters, "bool_value____list", "False");
    let payload = json!({"char_value": "string_u  "});
    let response = client.patch(&uri(&filters), payload.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_echoes(&response.body, &payload);

    set(&mut filters, "char_value____str", "string_u  ");
    let payload = json!({"date_value": "2022-07-24"});
    let response = client.patch(&uri(&filters), payload.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_echoes(&response.body, &payload);

    set(&mut filters, "date_value____from", "2022-07-23");
    set(&mut filters, "date_value____to", "2022-07-25");
    let mut payload = update_payload();
    payload["float4_value"] = json!(1.7);
    let response = client.patch(&uri(&filters), payload.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_echoes(&response.body, &payload);

    // Stale filters no longer match
    set(&mut filters, "bool_value____list", "True");
    let response = client.patch(&uri(&filters), json!({"text_value": "x"})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_many_updates_every_matching_row() {
    let (_db, client) = client().await;

    let ids = insert(&client, vec![row(0.91), row(0.92), row(0.93)]).await;

    let mut filters = row_filters();
    filters.extend(ids.iter().map(|id| ("id____list", id.clone())));
    filters.extend(["0.91", "0.92", "0.93"].map(|v| ("float4_value____list", v.to_string())));

    let payload = update_payload();
    let response = client
        .patch(&format!("/test?{}", query(filters)), payload.clone())
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-total-count"), Some("3"));

    let rows = response.body.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    for row in rows {
        assert_echoes(row, &payload);
    }

    // Fields outside the payload are untouched
    let mut float4_values: Vec<f64> = rows
        .iter()
        .map(|row| row["float4_value"].as_f64().unwrap())
        .collect();
    float4_values.sort_by(f64::total_cmp);
    assert_eq!(float4_values, vec![0.91, 0.92, 0.93]);
}

#[tokio::test]
async fn delete_one_reports_one_row() {
    let (_db, client) = client().await;

    let mut data = row(2.54);
    data["timestamptz_value"] = json!("2021-07-24T02:54:53.285");
    let [id] = <[String; 1]>::try_from(insert(&client, vec![data]).await).unwrap();

    let response = client
        .delete(&format!("/test/{id}?{}", query(row_filters())))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-total-count"), Some("1"));
    assert_eq!(response.body, json!([{"id": id}]));

    let response = client.get(&format!("/test/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_many_reports_three_rows() {
    let (_db, client) = client().await;

    let ids = insert(&client, vec![row(0.875), row(0.876), row(0.877)]).await;
    insert(&client, vec![row(50.0)]).await;

    let mut filters = row_filters();
    filters.extend(ids.iter().map(|id| ("id____list", id.clone())));

    let response = client.delete(&format!("/test?{}", query(filters))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-total-count"), Some("3"));

    let remaining = client.get("/test").await;
    assert_eq!(remaining.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn post_redirect_get_lands_on_the_created_row() {
    let (_db, client) = client().await;

    let change = json!({
        "bool_value": false,
        "char_value": "test",
        "date_value": "2021-07-21",
        "float8_value": 0.1,
        "int2_value": 100,
        "int8_value": 100,
        "float4_value": 55.7,
        "int4_value": 4,
        "interval_value": 5400.0,
        "json_value": {"hello": "world"},
        "jsonb_value": {"hello": "world"},
        "numeric_value": 19,
        "text_value": "hello world",
        "time_value": "18:18:18",
        "timestamp_value": "2021-07-21T10:11:12.123456",
        "timestamptz_value": "2021-07-21T10:11:12.123456+00:00",
        "timetz_value": "18:18:18+00:00",
        "varchar_value": "hello world",
        "array_value": [1, 2, 3, 4],
        "array_str__value": ["1", "2", "3", "4"],
    });

    let response = client.post("/test_3", change.clone()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let location = response.header("location").unwrap().to_string();
    assert!(location.starts_with("/test_3/"), "{location}");

    let response = client.get(&location).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("id").is_some());

    let mut expected = change;
    expected["char_value"] = json!("test      ");
    assert_echoes(&response.body, &expected);
}

#[tokio::test]
async fn upsert_with_policy_updates_and_without_conflicts() {
    let (_db, client) = client().await;

    let created = client.post("/test_2", json!({"float4_value": 12.784})).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let mut existing = created.body.clone();
    existing["numeric_value"] = json!(100);

    let mut upsert = existing.clone();
    upsert["on_conflict"] = json!({"update_columns": ["numeric_value"]});

    let response = client.post("/test_2", upsert).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], created.body["id"]);
    assert_eq!(response.body["numeric_value"], json!(100));

    let response = client.post("/test_2", existing).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn find_many_pages_and_sorts() {
    let (_db, client) = client().await;

    insert(&client, vec![row(1.0), row(3.0), row(2.0)]).await;

    let response = client
        .get("/test?order_by_columns=float4_value:DESC&limit=2&offset=1")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let values: Vec<Value> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["float4_value"].clone())
        .collect();
    assert_eq!(values, vec![json!(2.0), json!(1.0)]);
}

#[tokio::test]
async fn inverted_ranges_match_nothing() {
    let (_db, client) = client().await;

    insert(&client, vec![row(1.0)]).await;

    let response = client
        .get("/test?date_value____from=2021-07-25&date_value____to=2021-07-22")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn bad_requests_map_to_stable_categories() {
    let (_db, client) = client().await;

    let cases = [
        ("/test?nope=1", StatusCode::BAD_REQUEST, "unknown_field"),
        ("/test?bytea_value=1", StatusCode::BAD_REQUEST, "unknown_field"),
        ("/test?bool_value____str=t", StatusCode::BAD_REQUEST, "unsupported_operator"),
        ("/test?int4_value=abc", StatusCode::UNPROCESSABLE_ENTITY, "type_coercion"),
        ("/test?limit=-1", StatusCode::BAD_REQUEST, "invalid_request"),
        ("/test?join_foreign_table=nope", StatusCode::BAD_REQUEST, "invalid_request"),
    ];

    for (uri, status, category) in cases {
        let response = client.get(uri).await;
        assert_eq!(response.status, status, "{uri}");
        assert_eq!(response.body["error"], json!(category), "{uri}");
    }

    let response = client.post("/test", json!({"insert": [{"bool_value": true}]})).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], json!("validation"));
}

#[tokio::test]
async fn put_without_a_required_field_is_rejected() {
    let (_db, client) = client().await;

    let created = client.post("/test_2", json!({"float4_value": 1.5})).await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let response = client
        .put(&format!("/test/{id}"), json!({"text_value": "x"}))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], json!("validation"));

    let found = client.get(&format!("/test/{id}")).await;
    assert_eq!(found.body["float4_value"], json!(1.5));
}

#[tokio::test]
async fn time_with_zone_ranges_compare_instants() {
    let (_db, client) = client().await;

    let mut east = row(1.0);
    east["timetz_value"] = json!("10:00:00+05:00");
    insert(&client, vec![east]).await;

    let response = client
        .get(&format!("/test?{}", query([("timetz_value____from", "06:00:00+00:00")])))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));

    let response = client
        .get(&format!("/test?{}", query([("timetz_value____to", "06:00:00+00:00")])))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["timetz_value"], json!("10:00:00+05:00"));
}

#[tokio::test]
async fn string_matching_honors_case_sensitivity() {
    let (_db, client) = client().await;

    let mut hello = row(1.0);
    hello["varchar_value"] = json!("Hello");
    insert(&client, vec![hello]).await;

    let matching = |pattern: &'static str| {
        query([
            ("varchar_value____str", "hello%"),
            ("varchar_value____str_____matching_pattern", pattern),
        ])
    };

    let response = client
        .get(&format!("/test?{}", matching("case_insensitive")))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let response = client
        .get(&format!("/test?{}", matching("case_sensitive")))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}
