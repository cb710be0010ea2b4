use super::{coercion_error, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;

pub(super) struct JsonCoercer;

impl TypeCoercer for JsonCoercer {
    fn ty(&self) -> &Type {
        &Type::Json
    }

    fn supports(&self, op: Operator) -> bool {
        op == Operator::Eq
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        serde_json::from_str(raw)
            .map(Value::Json)
            .map_err(|_| coercion_error(self.ty(), raw))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        Ok(Value::Json(value.clone()))
    }
}
