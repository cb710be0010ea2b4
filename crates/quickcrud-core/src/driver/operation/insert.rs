use super::Operation;
use crate::stmt::Record;

#[derive(Debug)]
pub struct Insert {
    /// Table to insert into
    pub table: String,

    /// Column values; columns absent from the record take the storage
    /// default
    pub record: Record,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
