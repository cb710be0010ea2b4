//! Decoding JSON request bodies into records.

use crate::{ConflictPolicy, Error, Result};

use quickcrud_core::{schema::Model, stmt::Record, stmt::Value};
use serde_json::{Map, Value as Json};

/// How a body is checked against the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Required fields must be present.
    Create,

    /// Omitted fields are reset to their default, or `NULL`.
    Put,

    /// Omitted fields are left alone.
    Patch,
}

/// A create body: one or more records and an optional conflict policy.
#[derive(Debug)]
pub(crate) struct Insert {
    pub(crate) records: Vec<Record>,
    pub(crate) policy: Option<ConflictPolicy>,
}

pub(crate) fn parse(body: &[u8]) -> Result<Json> {
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("malformed JSON body: {err}")))
}

fn into_object(body: Json) -> Result<Map<String, Json>> {
    match body {
        Json::Object(object) => Ok(object),
        other => Err(Error::invalid_request(format!(
            "expected a JSON object body; got {other}"
        ))),
    }
}

/// Checks and coerces one object against `model`.
pub(crate) fn record(model: &Model, body: Json, mode: Mode) -> Result<Record> {
    let object = into_object(body)?;
    let mut record = Record::new();

    for (name, value) in object {
        let field = model.expect_field(&name)?;

        if field.primary_key && mode != Mode::Create {
            return Err(Error::validation_read_only(name));
        }

        let value = if value.is_null() {
            if !field.nullable {
                return Err(Error::validation_null(name));
            }
            Value::Null
        } else {
            let coercer = field.ty.coercer();
            coercer.from_json(&value)?
        };

        record.insert(name, value);
    }

    match mode {
        Mode::Create => {
            if let Some(field) = model
                .fields
                .iter()
                .find(|field| field.is_required() && !record.contains(&field.name))
            {
                return Err(Error::validation_required(&field.name));
            }
        }
        Mode::Put => {
            if let Some(field) = model.fields.iter().find(|field| {
                !field.primary_key && field.is_required() && !record.contains(&field.name)
            }) {
                return Err(Error::validation_required(&field.name));
            }

            for field in &model.fields {
                if !field.primary_key && !record.contains(&field.name) {
                    record.insert(field.name.clone(), field.default_value());
                }
            }
        }
        Mode::Patch => {}
    }

    Ok(record)
}

/// Decodes a single-object create body. With `upsert`, the object may carry
/// an `on_conflict` policy.
pub(crate) fn insert_one(model: &Model, body: Json, upsert: bool) -> Result<Insert> {
    let mut object = into_object(body)?;

    let policy = if upsert {
        policy(object.remove("on_conflict"))?
    } else {
        None
    };

    Ok(Insert {
        records: vec![record(model, Json::Object(object), Mode::Create)?],
        policy,
    })
}

/// Decodes `{"insert": [...]}`, plus `on_conflict` when `upsert` is set.
pub(crate) fn insert_many(model: &Model, body: Json, upsert: bool) -> Result<Insert> {
    let mut object = into_object(body)?;

    let policy = if upsert {
        policy(object.remove("on_conflict"))?
    } else {
        None
    };

    let Some(Json::Array(items)) = object.remove("insert") else {
        return Err(Error::invalid_request(
            "expected an `insert` array in the request body",
        ));
    };

    if let Some(key) = object.keys().next() {
        return Err(Error::invalid_request(format!(
            "unexpected key `{key}` in the request body"
        )));
    }

    let records = items
        .into_iter()
        .map(|item| record(model, item, Mode::Create))
        .collect::<Result<Vec<_>>>()?;

    Ok(Insert { records, policy })
}

fn policy(raw: Option<Json>) -> Result<Option<ConflictPolicy>> {
    match raw {
        None | Some(Json::Null) => Ok(None),
        Some(raw) => serde_json::from_value(raw)
            .map(Some)
            .map_err(|err| Error::invalid_request(format!("invalid `on_conflict`: {err}"))),
    }
}
