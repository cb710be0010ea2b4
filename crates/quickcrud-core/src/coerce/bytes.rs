use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;

/// Binary values. Never filterable; payloads carry either a string (its
/// UTF-8 bytes) or an array of byte values.
pub(super) struct BytesCoercer;

impl TypeCoercer for BytesCoercer {
    fn ty(&self) -> &Type {
        &Type::Bytes
    }

    fn supports(&self, _op: Operator) -> bool {
        false
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        Ok(Value::Bytes(raw.as_bytes().to_vec()))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::String(s) => self.from_param(s),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| coercion_error(self.ty(), json_raw(item)))
                })
                .collect::<Result<Vec<u8>>>()
                .map(Value::Bytes),
            other => Err(coercion_error(self.ty(), json_raw(other))),
        }
    }
}
