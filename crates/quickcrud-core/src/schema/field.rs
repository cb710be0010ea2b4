use super::Type;
use crate::stmt::{TimeTz, Value};
use chrono::{SubsecRound, Utc};

#[derive(Debug, Clone)]
pub struct Field {
    /// Column name, as used in querystrings and payloads.
    pub name: String,

    /// Declared type
    pub ty: Type,

    /// True if the column accepts `NULL`.
    pub nullable: bool,

    /// True if the column carries a unique constraint.
    pub unique: bool,

    /// True if the field is the model's primary key.
    pub primary_key: bool,

    /// Value applied when a create payload omits the field.
    pub default: Option<FieldDefault>,

    /// Foreign key to another model's field.
    pub references: Option<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// A constant value
    Value(Value),

    /// The current date, time or timestamp, depending on the declared type
    Now,

    /// A freshly generated v4 UUID
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

impl Field {
    /// Creates a nullable, non-unique field.
    pub fn new(name: impl Into<String>, ty: Type) -> Field {
        Field {
            name: name.into(),
            ty,
            nullable: true,
            unique: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    /// Marks the field as the primary key. Primary keys are never nullable
    /// and always unique.
    pub fn primary_key(mut self) -> Field {
        self.primary_key = true;
        self.nullable = false;
        self.unique = true;
        self
    }

    pub fn not_null(mut self) -> Field {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Field {
        self.unique = true;
        self
    }

    pub fn default(mut self, default: FieldDefault) -> Field {
        self.default = Some(default);
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Field {
        self.references = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// True if a full payload (create, PUT) must provide the field.
    pub fn is_required(&self) -> bool {
        !self.nullable && self.default.is_none()
    }

    /// Value used when a full payload omits the field: the default if one is
    /// declared, `NULL` otherwise.
    pub fn default_value(&self) -> Value {
        match &self.default {
            Some(default) => default.generate(&self.ty),
            None => Value::Null,
        }
    }
}

impl FieldDefault {
    /// Produces the default for a field of type `ty`.
    pub fn generate(&self, ty: &Type) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Uuid => Value::Uuid(uuid::Uuid::new_v4()),
            FieldDefault::Now => {
                let now = Utc::now().trunc_subsecs(6);

                match ty {
                    Type::Date => Value::Date(now.date_naive()),
                    Type::Time => Value::Time(now.time()),
                    Type::TimeTz => Value::TimeTz(TimeTz::utc(now.time())),
                    Type::Timestamp => Value::Timestamp(now.naive_utc()),
                    Type::TimestampTz => Value::TimestampTz(now),
                    _ => Value::Null,
                }
            }
        }
    }
}
