use super::{all_columns, Expr, OrderBy, Statement};
use quickcrud_core::{driver::operation::Select, schema::Model};

#[derive(Debug, Clone)]
pub struct Query {
    pub table: String,
    pub columns: Vec<String>,
    pub filter: Expr,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    pub fn from_select(model: &Model, select: Select) -> Query {
        Query {
            table: model.name.clone(),
            columns: all_columns(model),
            filter: select.filter,
            order_by: select.order_by,
            limit: select.limit,
            offset: select.offset,
        }
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Statement::Query(value)
    }
}
