use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;

pub(super) struct UuidCoercer;

impl TypeCoercer for UuidCoercer {
    fn ty(&self) -> &Type {
        &Type::Uuid
    }

    fn supports(&self, op: Operator) -> bool {
        matches!(op, Operator::Eq | Operator::List)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        uuid::Uuid::parse_str(raw.trim())
            .map(Value::Uuid)
            .map_err(|_| coercion_error(self.ty(), raw))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::String(s) => self.from_param(s),
            other => Err(coercion_error(self.ty(), json_raw(other))),
        }
    }
}
