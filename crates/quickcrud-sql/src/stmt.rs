mod column_def;
pub use column_def::ColumnDef;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod query;
pub use query::Query;

mod update;
pub use update::Update;

pub use quickcrud_core::stmt::*;

use quickcrud_core::{driver::Operation, schema::Model};

#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Query(Query),
    Update(Update),
}

impl Statement {
    /// Lowers a storage operation on `model` to SQL. Transaction control has
    /// no statement form; see [`Serializer::serialize_transaction`].
    ///
    /// [`Serializer::serialize_transaction`]: crate::Serializer::serialize_transaction
    pub fn from_operation(model: &Model, op: Operation) -> Option<Statement> {
        Some(match op {
            Operation::Insert(op) => Insert::new(model, op.record).into(),
            Operation::Select(op) => Query::from_select(model, op).into(),
            Operation::Update(op) => Update::new(model, op.assignments, op.filter).into(),
            Operation::Delete(op) => Delete::new(model, op.filter).into(),
            Operation::Transaction(_) => return None,
        })
    }

    /// The columns each returned row carries, in order.
    pub fn returning(&self) -> &[String] {
        match self {
            Statement::CreateTable(_) => &[],
            Statement::Delete(stmt) => &stmt.returning,
            Statement::Insert(stmt) => &stmt.returning,
            Statement::Query(stmt) => &stmt.columns,
            Statement::Update(stmt) => &stmt.returning,
        }
    }
}

/// Every column of `model`, in declaration order.
fn all_columns(model: &Model) -> Vec<String> {
    model.fields.iter().map(|field| field.name.clone()).collect()
}
