//! Rendering values as JSON response bodies.

use super::Value;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde_json::Number;
use std::str::FromStr;

impl Value {
    /// Renders the value for a JSON response.
    ///
    /// Temporal values are ISO-8601, with microseconds only when non-zero.
    /// Intervals are seconds. Decimals are numbers.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            // Go through the shortest decimal representation so 0.91f32
            // renders as 0.91 rather than 0.9100000262260437.
            Value::F32(v) => float(v.to_string().parse().unwrap_or(f64::from(*v))),
            Value::F64(v) => float(*v),
            Value::Decimal(v) => {
                let text = v.normalize().to_string();
                Number::from_str(&text)
                    .map(Json::Number)
                    .unwrap_or(Json::String(text))
            }
            Value::String(v) => Json::String(v.clone()),
            Value::Uuid(v) => Json::String(v.hyphenated().to_string()),
            Value::Date(v) => Json::String(v.format("%Y-%m-%d").to_string()),
            Value::Time(v) => Json::String(format_time(*v)),
            Value::TimeTz(v) => Json::String(v.to_string()),
            Value::Timestamp(v) => Json::String(format_timestamp(*v)),
            Value::TimestampTz(v) => {
                Json::String(format!("{}+00:00", format_timestamp(v.naive_utc())))
            }
            Value::Interval(v) => match v.num_microseconds() {
                Some(micros) => float(micros as f64 / 1_000_000.0),
                None => float(v.num_seconds() as f64),
            },
            Value::Json(v) => v.clone(),
            Value::Bytes(v) => Json::Array(v.iter().map(|b| Json::from(*b)).collect()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
        }
    }
}

fn float(v: f64) -> serde_json::Value {
    Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

pub(super) fn format_time(time: NaiveTime) -> String {
    if time.nanosecond() == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M:%S%.6f").to_string()
    }
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    format!("{}T{}", ts.date().format("%Y-%m-%d"), format_time(ts.time()))
}
