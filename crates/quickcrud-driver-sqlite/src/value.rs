use quickcrud_core::{err, schema::Type, stmt, Error, Result};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use chrono::{FixedOffset, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::str::FromStr;

const TIME: &str = "%H:%M:%S%.6f";
const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A value as stored in SQLite.
///
/// Temporal values are fixed-width text so that lexical order matches
/// chronological order. Floats are bound through their shortest decimal form,
/// so an `F32` filter value compares equal to the stored column.
#[derive(Debug)]
pub struct Value(stmt::Value);

impl From<stmt::Value> for Value {
    fn from(value: stmt::Value) -> Self {
        Self(value)
    }
}

impl Value {
    pub fn into_inner(self) -> stmt::Value {
        self.0
    }

    /// Reads column `index` of `row` as a value of type `ty`.
    pub fn from_sql(row: &Row<'_>, index: usize, ty: &Type) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver)?;

        let core_value = match (value, ty) {
            (SqlValue::Null, _) => stmt::Value::Null,
            (SqlValue::Integer(value), Type::Bool) => stmt::Value::Bool(value != 0),
            (SqlValue::Integer(value), Type::I16) => stmt::Value::I16(value as i16),
            (SqlValue::Integer(value), Type::I32) => stmt::Value::I32(value as i32),
            (SqlValue::Integer(value), Type::I64) => stmt::Value::I64(value),
            (SqlValue::Integer(value), Type::F32) => stmt::Value::F32(value as f32),
            (SqlValue::Integer(value), Type::F64) => stmt::Value::F64(value as f64),
            (SqlValue::Real(value), Type::F32) => stmt::Value::F32(value as f32),
            (SqlValue::Real(value), Type::F64) => stmt::Value::F64(value),
            (SqlValue::Integer(value), Type::Decimal) => stmt::Value::Decimal(value.into()),
            (SqlValue::Real(value), Type::Decimal) => {
                let decimal = Decimal::from_str(&value.to_string()).map_err(Error::driver)?;
                stmt::Value::Decimal(decimal)
            }
            (SqlValue::Integer(value), Type::Interval) => interval(value as f64),
            (SqlValue::Real(value), Type::Interval) => interval(value),
            (SqlValue::Blob(value), Type::Bytes) => stmt::Value::Bytes(value),
            (SqlValue::Text(value), Type::Json) => stmt::Value::Json(serde_json::from_str(&value)?),
            (SqlValue::Text(value), Type::Array(_)) => {
                let json: serde_json::Value = serde_json::from_str(&value)?;
                let coercer = ty.coercer();
                coercer.from_json(&json)?
            }
            (SqlValue::Text(value), Type::TimeTz) => time_tz(&value)?,
            (SqlValue::Text(value), ty) => {
                let coercer = ty.coercer();
                coercer.from_param(&value)?
            }
            (value, ty) => return Err(err!("cannot read {value:?} as {ty}")),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        Ok(match &self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::F32(v) => {
                let v = v.to_string().parse::<f64>().unwrap_or(f64::from(*v));
                ToSqlOutput::Owned(SqlValue::Real(v))
            }
            Value::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Decimal(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Value::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Uuid(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Value::Date(v) => ToSqlOutput::Owned(SqlValue::Text(v.format("%Y-%m-%d").to_string())),
            Value::Time(v) => ToSqlOutput::Owned(SqlValue::Text(v.format(TIME).to_string())),
            Value::TimeTz(v) => ToSqlOutput::Owned(SqlValue::Text(format!(
                "{}{}",
                time_tz_utc(v).format(TIME),
                v.offset
            ))),
            Value::Timestamp(v) => {
                ToSqlOutput::Owned(SqlValue::Text(v.format(TIMESTAMP).to_string()))
            }
            Value::TimestampTz(v) => ToSqlOutput::Owned(SqlValue::Text(format!(
                "{}+00:00",
                v.naive_utc().format(TIMESTAMP)
            ))),
            Value::Interval(v) => {
                let secs = match v.num_microseconds() {
                    Some(micros) => micros as f64 / 1_000_000.0,
                    None => v.num_seconds() as f64,
                };
                ToSqlOutput::Owned(SqlValue::Real(secs))
            }
            Value::Json(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            Value::List(_) => ToSqlOutput::Owned(SqlValue::Text(self.0.to_json().to_string())),
        })
    }
}

/// UTC time of day for `value`. Stored time-with-zone text leads with this so
/// that lexical order is instant order regardless of offset.
fn time_tz_utc(value: &stmt::TimeTz) -> NaiveTime {
    let shift = TimeDelta::seconds(value.offset.local_minus_utc().into());
    value.time.overflowing_sub_signed(shift).0
}

/// Reads `HH:MM:SS.ffffff±HH:MM` text where the time part is UTC.
fn time_tz(text: &str) -> Result<stmt::Value> {
    let split = text
        .rfind(['+', '-'])
        .ok_or_else(|| err!("invalid stored time with zone: {text}"))?;
    let (time, offset) = text.split_at(split);

    let utc = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .map_err(|_| err!("invalid stored time with zone: {text}"))?;
    let offset = FixedOffset::from_str(offset)
        .map_err(|_| err!("invalid stored time with zone: {text}"))?;

    let shift = TimeDelta::seconds(offset.local_minus_utc().into());
    let local = utc.overflowing_add_signed(shift).0;

    Ok(stmt::Value::TimeTz(stmt::TimeTz::new(local, offset)))
}

fn interval(secs: f64) -> stmt::Value {
    stmt::Value::Interval(TimeDelta::microseconds(
        (secs * 1_000_000.0).round() as i64,
    ))
}
