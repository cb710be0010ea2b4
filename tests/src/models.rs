use quickcrud::{
    schema::{Field, FieldDefault, Model, Type},
    stmt::Value,
};

/// Every supported column type, with a UUID key and one unique column.
pub fn single_unique_table() -> Model {
    Model::new(
        "test_single_unique_table",
        [
            Field::new("id", Type::Uuid)
                .primary_key()
                .default(FieldDefault::Uuid),
            Field::new("bool_value", Type::Bool)
                .not_null()
                .default(FieldDefault::Value(Value::Bool(false))),
            Field::new("bytea_value", Type::Bytes),
            Field::new("char_value", Type::Char(10)),
            Field::new("date_value", Type::Date).default(FieldDefault::Now),
            Field::new("float4_value", Type::F32).not_null().unique(),
            Field::new("float8_value", Type::F64)
                .not_null()
                .default(FieldDefault::Value(Value::F64(10.1))),
            Field::new("int2_value", Type::I16),
            Field::new("int4_value", Type::I32),
            Field::new("int8_value", Type::I64).default(FieldDefault::Value(Value::I64(99))),
            Field::new("interval_value", Type::Interval),
            Field::new("json_value", Type::Json),
            Field::new("jsonb_value", Type::Json),
            Field::new("numeric_value", Type::Decimal),
            Field::new("text_value", Type::Text),
            Field::new("time_value", Type::Time),
            Field::new("timestamp_value", Type::Timestamp),
            Field::new("timestamptz_value", Type::TimestampTz),
            Field::new("timetz_value", Type::TimeTz),
            Field::new("varchar_value", Type::Text),
            Field::new("array_value", Type::Array(Box::new(Type::I32))),
            Field::new("array_str__value", Type::Array(Box::new(Type::Text))),
        ],
    )
}

pub fn parent() -> Model {
    Model::new("parent", [Field::new("id", Type::I32).primary_key()])
}

/// References `parent.id`, giving parents a `child` relation.
pub fn child() -> Model {
    Model::new(
        "child",
        [
            Field::new("id", Type::I32).primary_key(),
            Field::new("parent_id", Type::I32).references("parent", "id"),
        ],
    )
}
