use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;

/// Arrays whose items coerce as the item type. Querystring values are JSON
/// array text.
pub(super) struct ArrayCoercer<'a> {
    ty: &'a Type,
    item: Box<dyn TypeCoercer + 'a>,
}

impl<'a> ArrayCoercer<'a> {
    pub(super) fn new(ty: &'a Type, item: &'a Type) -> ArrayCoercer<'a> {
        ArrayCoercer {
            ty,
            item: item.coercer(),
        }
    }
}

impl TypeCoercer for ArrayCoercer<'_> {
    fn ty(&self) -> &Type {
        self.ty
    }

    fn supports(&self, op: Operator) -> bool {
        op == Operator::Eq
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        let json: serde_json::Value =
            serde_json::from_str(raw).map_err(|_| coercion_error(self.ty, raw))?;
        self.from_json(&json)
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        let serde_json::Value::Array(items) = value else {
            return Err(coercion_error(self.ty, json_raw(value)));
        };

        items
            .iter()
            .map(|item| match item {
                serde_json::Value::Null => Ok(Value::Null),
                item => self.item.from_json(item),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::List)
    }
}
