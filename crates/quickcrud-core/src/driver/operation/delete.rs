use super::Operation;
use crate::stmt::Expr;

#[derive(Debug)]
pub struct Delete {
    /// Table to delete from
    pub table: String,

    /// Which rows to delete
    pub filter: Expr,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
