use super::{all_columns, Expr, Statement};
use quickcrud_core::schema::Model;

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,
    pub filter: Expr,
    pub returning: Vec<String>,
}

impl Delete {
    pub fn new(model: &Model, filter: Expr) -> Delete {
        Delete {
            table: model.name.clone(),
            filter,
            returning: all_columns(model),
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
