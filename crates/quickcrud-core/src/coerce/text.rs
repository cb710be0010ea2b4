use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::{Error, Result};

fn supports_text(op: Operator) -> bool {
    matches!(
        op,
        Operator::Eq | Operator::List | Operator::Str | Operator::StrMatchMode
    )
}

pub(super) struct TextCoercer;

impl TypeCoercer for TextCoercer {
    fn ty(&self) -> &Type {
        &Type::Text
    }

    fn supports(&self, op: Operator) -> bool {
        supports_text(op)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        Ok(Value::String(raw.to_string()))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            other => Err(coercion_error(self.ty(), json_raw(other))),
        }
    }
}

/// Fixed-length text, blank-padded.
pub(super) struct CharCoercer<'a> {
    ty: &'a Type,
    len: usize,
}

impl<'a> CharCoercer<'a> {
    pub(super) fn new(ty: &'a Type, len: u32) -> CharCoercer<'a> {
        CharCoercer {
            ty,
            len: len as usize,
        }
    }

    fn pad(&self, s: &str) -> String {
        let count = s.chars().count();
        let mut padded = s.to_string();
        padded.extend(std::iter::repeat(' ').take(self.len.saturating_sub(count)));
        padded
    }
}

impl TypeCoercer for CharCoercer<'_> {
    fn ty(&self) -> &Type {
        self.ty
    }

    fn supports(&self, op: Operator) -> bool {
        supports_text(op)
    }

    /// Over-long filter values are kept as-is; they match nothing.
    fn from_param(&self, raw: &str) -> Result<Value> {
        Ok(Value::String(self.pad(raw)))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::String(s) => {
                let count = s.chars().count();
                if count > self.len {
                    return Err(Error::validation_length(count, None, Some(self.len)));
                }
                Ok(Value::String(self.pad(s)))
            }
            other => Err(coercion_error(self.ty, json_raw(other))),
        }
    }
}
