use super::{all_columns, Record, Statement, Value};
use quickcrud_core::schema::Model;

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
    pub returning: Vec<String>,
}

impl Insert {
    pub fn new(model: &Model, record: Record) -> Insert {
        let (columns, values) = record.into_iter().unzip();

        Insert {
            table: model.name.clone(),
            columns,
            values,
            returning: all_columns(model),
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
