use super::Operation;
use crate::stmt::{Expr, OrderBy};

#[derive(Debug)]
pub struct Select {
    /// Table to query
    pub table: String,

    /// Which rows to return
    pub filter: Expr,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Select {
    /// Selects every row matching `filter`, unordered.
    pub fn new(table: impl Into<String>, filter: Expr) -> Select {
        Select {
            table: table.into(),
            filter,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }
}

impl From<Select> for Operation {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
