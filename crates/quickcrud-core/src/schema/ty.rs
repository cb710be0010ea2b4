use std::fmt;

/// Declared column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,

    /// Unbounded text
    Text,

    /// Fixed-length text, blank-padded to `n` characters
    Char(u32),

    Uuid,
    Date,
    Time,

    /// Time of day with a UTC offset
    TimeTz,

    /// Timestamp without time zone
    Timestamp,

    /// Timestamp with time zone, normalized to UTC
    TimestampTz,

    /// Elapsed time, exchanged as seconds
    Interval,

    Json,
    Bytes,

    /// Array of the inner type
    Array(Box<Type>),
}

impl Type {
    pub fn is_text_like(&self) -> bool {
        matches!(self, Type::Text | Type::Char(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::I16 | Type::I32 | Type::I64 | Type::F32 | Type::F64 | Type::Decimal
        )
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Type::Date
                | Type::Time
                | Type::TimeTz
                | Type::Timestamp
                | Type::TimestampTz
                | Type::Interval
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Char(n) => write!(f, "Char({n})"),
            Type::Array(item) => write!(f, "Array({item})"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}
