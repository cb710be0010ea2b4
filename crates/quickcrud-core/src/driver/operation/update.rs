use super::Operation;
use crate::stmt::{Expr, Record};

#[derive(Debug)]
pub struct Update {
    /// Table to update
    pub table: String,

    /// Column values to set
    pub assignments: Record,

    /// Which rows to update
    pub filter: Expr,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
