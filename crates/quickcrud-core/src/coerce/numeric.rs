use super::{coercion_error, json_raw, TypeCoercer};
use crate::filter::Operator;
use crate::schema::Type;
use crate::stmt::Value;
use crate::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

fn supports_range(op: Operator) -> bool {
    matches!(
        op,
        Operator::Eq | Operator::From | Operator::To | Operator::List
    )
}

/// `I16`, `I32` and `I64`.
pub(super) struct IntCoercer<'a> {
    ty: &'a Type,
}

impl<'a> IntCoercer<'a> {
    pub(super) fn new(ty: &'a Type) -> IntCoercer<'a> {
        IntCoercer { ty }
    }

    fn narrow(&self, v: i64, raw: impl Into<String>) -> Result<Value> {
        let value = match self.ty {
            Type::I16 => i16::try_from(v).ok().map(Value::I16),
            Type::I32 => i32::try_from(v).ok().map(Value::I32),
            _ => Some(Value::I64(v)),
        };
        value.ok_or_else(|| coercion_error(self.ty, raw))
    }
}

impl TypeCoercer for IntCoercer<'_> {
    fn ty(&self) -> &Type {
        self.ty
    }

    fn supports(&self, op: Operator) -> bool {
        supports_range(op)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        let v = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| coercion_error(self.ty, raw))?;
        self.narrow(v, raw)
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return self.narrow(v, n.to_string());
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        self.narrow(f as i64, n.to_string())
                    }
                    _ => Err(coercion_error(self.ty, n.to_string())),
                }
            }
            serde_json::Value::String(s) => self.from_param(s),
            other => Err(coercion_error(self.ty, json_raw(other))),
        }
    }
}

/// `F32` and `F64`.
pub(super) struct FloatCoercer<'a> {
    ty: &'a Type,
}

impl<'a> FloatCoercer<'a> {
    pub(super) fn new(ty: &'a Type) -> FloatCoercer<'a> {
        FloatCoercer { ty }
    }

    fn from_f64(&self, v: f64) -> Value {
        match self.ty {
            Type::F32 => Value::F32(v as f32),
            _ => Value::F64(v),
        }
    }
}

impl TypeCoercer for FloatCoercer<'_> {
    fn ty(&self) -> &Type {
        self.ty
    }

    fn supports(&self, op: Operator) -> bool {
        supports_range(op)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();
        // f32 parses directly so "0.91" is the nearest f32, not a rounded f64
        let value = match self.ty {
            Type::F32 => trimmed.parse::<f32>().map(Value::F32).ok(),
            _ => trimmed.parse::<f64>().map(Value::F64).ok(),
        };

        value
            .filter(|value| match value {
                Value::F32(v) => v.is_finite(),
                Value::F64(v) => v.is_finite(),
                _ => false,
            })
            .ok_or_else(|| coercion_error(self.ty, raw))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::Number(n) => match self.ty {
                Type::F32 => self.from_param(&n.to_string()),
                _ => n
                    .as_f64()
                    .map(|v| self.from_f64(v))
                    .ok_or_else(|| coercion_error(self.ty, n.to_string())),
            },
            serde_json::Value::String(s) => self.from_param(s),
            other => Err(coercion_error(self.ty, json_raw(other))),
        }
    }
}

pub(super) struct DecimalCoercer;

impl TypeCoercer for DecimalCoercer {
    fn ty(&self) -> &Type {
        &Type::Decimal
    }

    fn supports(&self, op: Operator) -> bool {
        supports_range(op)
    }

    fn from_param(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Value::Decimal)
            .map_err(|_| coercion_error(self.ty(), raw))
    }

    fn from_json(&self, value: &serde_json::Value) -> Result<Value> {
        match value {
            serde_json::Value::Number(n) => self.from_param(&n.to_string()),
            serde_json::Value::String(s) => self.from_param(s),
            other => Err(coercion_error(self.ty(), json_raw(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_respect_width() {
        let i16 = Type::I16;
        let coercer = IntCoercer::new(&i16);
        assert_eq!(coercer.from_param("123").unwrap(), Value::I16(123));

        let err = coercer.from_param("70000").unwrap_err();
        assert!(err.is_type_coercion());
        assert_eq!(err.to_string(), "cannot coerce \"70000\" to I16");
    }

    #[test]
    fn integers_from_whole_floats() {
        let i64 = Type::I64;
        let coercer = IntCoercer::new(&i64);
        assert_eq!(coercer.from_json(&json!(99.0)).unwrap(), Value::I64(99));
        assert!(coercer.from_json(&json!(99.5)).is_err());
    }

    #[test]
    fn f32_parses_to_nearest_single() {
        let f32 = Type::F32;
        let coercer = FloatCoercer::new(&f32);
        assert_eq!(coercer.from_param("0.91").unwrap(), Value::F32(0.91));
        assert_eq!(coercer.from_json(&json!(0.92)).unwrap(), Value::F32(0.92));
        assert!(coercer.from_param("NaN").is_err());
        assert!(coercer.from_param("abc").is_err());
    }

    #[test]
    fn decimals_accept_scientific_notation() {
        assert_eq!(
            DecimalCoercer.from_param("1.5e2").unwrap(),
            Value::Decimal(Decimal::from(150))
        );
        assert_eq!(
            DecimalCoercer.from_json(&json!(100.25)).unwrap(),
            Value::Decimal(Decimal::from_str("100.25").unwrap())
        );
    }
}
