use super::{Flavor, Params, ToSql};

use quickcrud_core::schema::Type;

impl ToSql for &Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        match f.serializer.flavor {
            Flavor::Sqlite => fmt!(f, sqlite_affinity(self)),
            Flavor::Postgresql => match self {
                Type::Char(len) => {
                    let len = *len;
                    fmt!(f, "CHAR(" len ")")
                }
                Type::Array(item) => {
                    let item: &Type = item;
                    fmt!(f, item "[]")
                }
                ty => fmt!(f, postgresql_name(ty)),
            },
        }
    }
}

/// SQLite stores by affinity. Temporal values are fixed-width text so they
/// order correctly; floats and intervals are REAL.
fn sqlite_affinity(ty: &Type) -> &'static str {
    match ty {
        Type::Bool | Type::I16 | Type::I32 | Type::I64 => "INTEGER",
        Type::F32 | Type::F64 | Type::Interval => "REAL",
        Type::Decimal => "NUMERIC",
        Type::Bytes => "BLOB",
        Type::Text
        | Type::Char(_)
        | Type::Uuid
        | Type::Date
        | Type::Time
        | Type::TimeTz
        | Type::Timestamp
        | Type::TimestampTz
        | Type::Json
        | Type::Array(_) => "TEXT",
    }
}

fn postgresql_name(ty: &Type) -> &'static str {
    match ty {
        Type::Bool => "BOOLEAN",
        Type::I16 => "SMALLINT",
        Type::I32 => "INTEGER",
        Type::I64 => "BIGINT",
        Type::F32 => "REAL",
        Type::F64 => "DOUBLE PRECISION",
        Type::Decimal => "NUMERIC",
        Type::Text => "TEXT",
        Type::Uuid => "UUID",
        Type::Date => "DATE",
        Type::Time => "TIME",
        Type::TimeTz => "TIME WITH TIME ZONE",
        Type::Timestamp => "TIMESTAMP",
        Type::TimestampTz => "TIMESTAMP WITH TIME ZONE",
        Type::Interval => "INTERVAL",
        Type::Json => "JSONB",
        Type::Bytes => "BYTEA",
        Type::Char(_) | Type::Array(_) => unreachable!("rendered with parameters"),
    }
}
