use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;

pub(super) struct BoolCoercer;

impl TypeCoercer for BoolCoercer {
    fn ty(&self) -> &Type {
        &Type::Bool
    }

    fn supports(&self, op: Operator) -> bool {
        matches!(op, Operator::Eq | Operator::List)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        const TRUE: &[&str] = &["true", "1", "t", "yes", "y", "on"];
        const FALSE: &[&str] = &["false", "0", "f", "no", "n", "off"];

        let word = raw.trim();
        if TRUE.iter().any(|w| word.eq_ignore_ascii_case(w)) {
            Ok(Value::Bool(true))
        } else if FALSE.iter().any(|w| word.eq_ignore_ascii_case(w)) {
            Ok(Value::Bool(false))
        } else {
            Err(coercion_error(self.ty(), raw))
        }
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::Bool(v) => Ok(Value::Bool(*v)),
            serde_json::Value::String(s) => self.from_param(s),
            serde_json::Value::Number(n) if n.as_i64() == Some(0) => Ok(Value::Bool(false)),
            serde_json::Value::Number(n) if n.as_i64() == Some(1) => Ok(Value::Bool(true)),
            other => Err(coercion_error(self.ty(), json_raw(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn words_are_case_insensitive() {
        for raw in ["true", "TRUE", "t", "Yes", "on", "1"] {
            assert_eq!(BoolCoercer.from_param(raw).unwrap(), Value::Bool(true));
        }
        for raw in ["false", "False", "f", "no", "OFF", "0"] {
            assert_eq!(BoolCoercer.from_param(raw).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn garbage_fails() {
        let err = BoolCoercer.from_param("maybe").unwrap_err();
        assert!(err.is_type_coercion());
        assert_eq!(err.to_string(), "cannot coerce \"maybe\" to Bool");
    }

    #[test]
    fn json_bools() {
        assert_eq!(BoolCoercer.from_json(&json!(true)).unwrap(), Value::Bool(true));
        assert!(BoolCoercer.from_json(&json!([true])).is_err());
    }
}
