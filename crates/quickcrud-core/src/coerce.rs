//! Conversion of querystring text and JSON payload values into typed
//! [`Value`]s, one [`TypeCoercer`] per declared type.

mod array;
mod boolean;
mod bytes;
mod ident;
mod json;
mod numeric;
mod temporal;
mod text;

use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::{Error, Result};

/// Converts raw input into values of one declared type.
pub trait TypeCoercer: Send + Sync {
    /// The declared type this coercer produces, as shown in errors.
    fn ty(&self) -> &Type;

    /// Whether filters may apply `op` to fields of this type.
    fn supports(&self, op: Operator) -> bool;

    /// Coerces querystring text.
    fn from_param(&self, raw: &str) -> Result<Value>;

    /// Coerces a non-null JSON payload value.
    fn from_json(&self, value: &serde_json::Value) -> Result<Value>;
}

impl Type {
    /// Returns the coercer for this declared type.
    pub fn coercer(&self) -> Box<dyn TypeCoercer + '_> {
        match self {
            Type::Bool => Box::new(boolean::BoolCoercer),
            Type::I16 | Type::I32 | Type::I64 => Box::new(numeric::IntCoercer::new(self)),
            Type::F32 | Type::F64 => Box::new(numeric::FloatCoercer::new(self)),
            Type::Decimal => Box::new(numeric::DecimalCoercer),
            Type::Text => Box::new(text::TextCoercer),
            Type::Char(len) => Box::new(text::CharCoercer::new(self, *len)),
            Type::Uuid => Box::new(ident::UuidCoercer),
            Type::Date
            | Type::Time
            | Type::TimeTz
            | Type::Timestamp
            | Type::TimestampTz
            | Type::Interval => Box::new(temporal::TemporalCoercer::new(self)),
            Type::Json => Box::new(json::JsonCoercer),
            Type::Bytes => Box::new(bytes::BytesCoercer),
            Type::Array(item) => Box::new(array::ArrayCoercer::new(self, item)),
        }
    }
}

fn coercion_error(ty: &Type, raw: impl Into<String>) -> Error {
    Error::type_coercion(raw, ty.to_string())
}

/// The raw text of a JSON value for error messages: strings without quotes,
/// everything else as JSON.
fn json_raw(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
