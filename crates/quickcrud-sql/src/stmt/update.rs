use super::{all_columns, Expr, Record, Statement, Value};
use quickcrud_core::schema::Model;

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,
    pub assignments: Vec<(String, Value)>,
    pub filter: Expr,
    pub returning: Vec<String>,
}

impl Update {
    pub fn new(model: &Model, assignments: Record, filter: Expr) -> Update {
        Update {
            table: model.name.clone(),
            assignments: assignments.into_iter().collect(),
            filter,
            returning: all_columns(model),
        }
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
