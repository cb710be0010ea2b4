use super::{
    error::ApiError,
    payload::{self, Mode},
};
use crate::{
    filter::Params,
    schema::{HasMany, Model},
    stmt::{Expr, OrderBy, Record, Value},
    Db, Error, Page, ParsedFilter, Result,
};

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// State shared by every route of one table.
#[derive(Debug)]
pub(crate) struct Route {
    pub(crate) db: Db,

    /// The registered model
    pub(crate) model: Arc<Model>,

    /// The model minus excluded columns, as clients see it
    pub(crate) surface: Model,

    pub(crate) prefix: String,
}

type Shared = State<Arc<Route>>;

type Reply = std::result::Result<Response, ApiError>;

/// The querystring of a read, split into controls and filter.
struct Query {
    filter: Expr,
    joins: Vec<HasMany>,
    page: Page,
}

impl Route {
    fn query(&self, raw: Option<String>, paged: bool, joins: bool) -> Result<Query> {
        let mut params = Params::from_query(raw.as_deref().unwrap_or_default());

        let joins = if joins {
            params
                .take("join_foreign_table")
                .iter()
                .map(|child| {
                    self.db
                        .schema()
                        .relation(&self.model.name, child)
                        .ok_or_else(|| {
                            Error::invalid_request(format!(
                                "`{}` has no relation to `{child}`",
                                self.model.name
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![]
        };

        let mut page = Page::default();

        if paged {
            page.limit = last_number(params.take("limit"), "limit")?;
            page.offset = last_number(params.take("offset"), "offset")?;

            for raw in params.take("order_by_columns") {
                for entry in raw.split(',').filter(|entry| !entry.trim().is_empty()) {
                    let order_by = OrderBy::parse(entry)?;
                    self.surface.expect_field(&order_by.column)?;
                    page.order_by.push(order_by);
                }
            }
        }

        let filter = ParsedFilter::parse(&params, &self.surface)?.to_expr();

        Ok(Query {
            filter,
            joins,
            page,
        })
    }

    fn pk(&self, raw: &str) -> Result<Value> {
        let field = self.model.primary_key();
        let coercer = field.ty.coercer();
        coercer.from_param(raw)
    }

    fn pk_filter(&self, pk: Value, filter: Expr) -> Expr {
        Expr::and(Expr::eq(Expr::column(&self.model.primary_key().name), pk), filter)
    }

    /// Renders a row with excluded columns removed.
    fn render(&self, mut record: Record) -> JsonValue {
        record.retain(|column| self.surface.field(column).is_some());
        record.to_json()
    }

    fn render_all(&self, records: Vec<Record>) -> JsonValue {
        JsonValue::Array(records.into_iter().map(|record| self.render(record)).collect())
    }

    /// Renders rows with their joined children nested under each relation's
    /// output key.
    async fn render_joined(&self, records: Vec<Record>, joins: &[HasMany]) -> Result<Vec<JsonValue>> {
        let mut children = Vec::with_capacity(joins.len());
        for relation in joins {
            children.push(self.db.load_children(relation, &records).await?);
        }

        let mut rendered = vec![];

        for (index, record) in records.into_iter().enumerate() {
            let mut row = self.render(record);

            if let JsonValue::Object(object) = &mut row {
                for (relation, children) in joins.iter().zip(&children) {
                    let nested = children[index].iter().map(Record::to_json).collect();
                    object.insert(relation.output_key(), JsonValue::Array(nested));
                }
            }

            rendered.push(row);
        }

        Ok(rendered)
    }

    /// The `[{pk}]` body of delete responses.
    fn keys(&self, records: &[Record]) -> JsonValue {
        let pk = &self.model.primary_key().name;

        JsonValue::Array(
            records
                .iter()
                .map(|record| {
                    let mut key = serde_json::Map::new();
                    let value = record.get(pk).map(Value::to_json).unwrap_or_default();
                    key.insert(pk.clone(), value);
                    JsonValue::Object(key)
                })
                .collect(),
        )
    }
}

fn last_number(values: Vec<String>, name: &str) -> Result<Option<u64>> {
    match values.last() {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            Error::invalid_request(format!("`{name}` must be a non-negative integer; got {raw:?}"))
        }),
    }
}

fn counted(status: StatusCode, count: usize, body: JsonValue) -> Response {
    (status, [("x-total-count", count.to_string())], Json(body)).into_response()
}

fn one_row(route: &Route, records: Vec<Record>, pk: &str) -> Result<Record> {
    records.into_iter().next().ok_or_else(|| {
        Error::record_not_found(format!("table={} key={pk}", route.model.name))
    })
}

pub(crate) async fn find_one(
    State(route): Shared,
    Path(pk): Path<String>,
    RawQuery(query): RawQuery,
) -> Reply {
    tracing::debug!(table = %route.model.name, %pk, "GET one");

    let query = route.query(query, false, true)?;
    let key = route.pk(&pk)?;

    let record = route.db.find_one(&route.model, key, query.filter).await?;
    let mut rows = route.render_joined(vec![record], &query.joins).await?;

    Ok(Json(rows.swap_remove(0)).into_response())
}

pub(crate) async fn find_many(State(route): Shared, RawQuery(query): RawQuery) -> Reply {
    tracing::debug!(table = %route.model.name, ?query, "GET many");

    let query = route.query(query, true, true)?;

    let records = route
        .db
        .find_many(&route.model, query.filter, query.page)
        .await?;
    let rows = route.render_joined(records, &query.joins).await?;

    Ok(Json(JsonValue::Array(rows)).into_response())
}

async fn create(route: &Route, insert: payload::Insert) -> Result<Vec<Record>> {
    route
        .db
        .create(&route.model, insert.records, insert.policy.as_ref())
        .await
}

pub(crate) async fn create_one(State(route): Shared, body: Bytes) -> Reply {
    tracing::debug!(table = %route.model.name, "POST one");

    let insert = payload::insert_one(&route.surface, payload::parse(&body)?, false)?;
    let record = payload_row(create(&route, insert).await?)?;

    Ok((StatusCode::CREATED, Json(route.render(record))).into_response())
}

pub(crate) async fn create_many(State(route): Shared, body: Bytes) -> Reply {
    tracing::debug!(table = %route.model.name, "POST many");

    let insert = payload::insert_many(&route.surface, payload::parse(&body)?, false)?;
    let records = create(&route, insert).await?;

    Ok((StatusCode::CREATED, Json(route.render_all(records))).into_response())
}

pub(crate) async fn upsert_one(State(route): Shared, body: Bytes) -> Reply {
    tracing::debug!(table = %route.model.name, "POST upsert one");

    let insert = payload::insert_one(&route.surface, payload::parse(&body)?, true)?;
    if let Some(policy) = &insert.policy {
        policy.validate(&route.surface)?;
    }
    let record = payload_row(create(&route, insert).await?)?;

    Ok((StatusCode::CREATED, Json(route.render(record))).into_response())
}

pub(crate) async fn upsert_many(State(route): Shared, body: Bytes) -> Reply {
    tracing::debug!(table = %route.model.name, "POST upsert many");

    let insert = payload::insert_many(&route.surface, payload::parse(&body)?, true)?;
    if let Some(policy) = &insert.policy {
        policy.validate(&route.surface)?;
    }
    let records = create(&route, insert).await?;

    Ok((StatusCode::CREATED, Json(route.render_all(records))).into_response())
}

pub(crate) async fn post_redirect_get(State(route): Shared, body: Bytes) -> Reply {
    tracing::debug!(table = %route.model.name, "POST redirect");

    let insert = payload::insert_one(&route.surface, payload::parse(&body)?, false)?;
    let record = payload_row(create(&route, insert).await?)?;

    let pk = record
        .get(&route.model.primary_key().name)
        .map(path_segment)
        .unwrap_or_default();

    Ok(Redirect::to(&format!("{}/{pk}", route.prefix)).into_response())
}

fn payload_row(records: Vec<Record>) -> Result<Record> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| crate::err!("create returned no row"))
}

/// Renders a key the way the `/:pk` routes parse it back.
fn path_segment(value: &Value) -> String {
    match value.to_json() {
        JsonValue::String(text) => text,
        other => other.to_string(),
    }
}

async fn update_by_pk(route: &Route, pk: String, query: Option<String>, body: Bytes, mode: Mode) -> Reply {
    let query = route.query(query, false, false)?;
    let key = route.pk(&pk)?;
    let assignments = payload::record(&route.surface, payload::parse(&body)?, mode)?;

    let records = route
        .db
        .update(&route.model, route.pk_filter(key, query.filter), assignments)
        .await?;
    let record = one_row(route, records, &pk)?;

    Ok(Json(route.render(record)).into_response())
}

async fn update_all(route: &Route, query: Option<String>, body: Bytes, mode: Mode) -> Reply {
    let query = route.query(query, false, false)?;
    let assignments = payload::record(&route.surface, payload::parse(&body)?, mode)?;

    let records = route
        .db
        .update(&route.model, query.filter, assignments)
        .await?;

    Ok(counted(StatusCode::OK, records.len(), route.render_all(records)))
}

pub(crate) async fn update_one(
    State(route): Shared,
    Path(pk): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Reply {
    tracing::debug!(table = %route.model.name, %pk, "PUT one");
    update_by_pk(&route, pk, query, body, Mode::Put).await
}

pub(crate) async fn update_many(
    State(route): Shared,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Reply {
    tracing::debug!(table = %route.model.name, ?query, "PUT many");
    update_all(&route, query, body, Mode::Put).await
}

pub(crate) async fn patch_one(
    State(route): Shared,
    Path(pk): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Reply {
    tracing::debug!(table = %route.model.name, %pk, "PATCH one");
    update_by_pk(&route, pk, query, body, Mode::Patch).await
}

pub(crate) async fn patch_many(
    State(route): Shared,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Reply {
    tracing::debug!(table = %route.model.name, ?query, "PATCH many");
    update_all(&route, query, body, Mode::Patch).await
}

pub(crate) async fn delete_one(
    State(route): Shared,
    Path(pk): Path<String>,
    RawQuery(query): RawQuery,
) -> Reply {
    tracing::debug!(table = %route.model.name, %pk, "DELETE one");

    let query = route.query(query, false, false)?;
    let key = route.pk(&pk)?;

    let records = route
        .db
        .delete(&route.model, route.pk_filter(key, query.filter))
        .await?;
    if records.is_empty() {
        return Err(Error::record_not_found(format!("table={} key={pk}", route.model.name)).into());
    }

    Ok(counted(StatusCode::OK, records.len(), route.keys(&records)))
}

pub(crate) async fn delete_many(State(route): Shared, RawQuery(query): RawQuery) -> Reply {
    tracing::debug!(table = %route.model.name, ?query, "DELETE many");

    let query = route.query(query, false, false)?;
    let records = route.db.delete(&route.model, query.filter).await?;

    Ok(counted(StatusCode::OK, records.len(), route.keys(&records)))
}
