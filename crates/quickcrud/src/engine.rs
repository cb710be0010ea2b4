//! CRUD operations over registered models. Every mutating operation runs in
//! its own transaction and rolls back on error.

mod create;
mod delete;
mod find;
mod relation;
mod transaction;
mod update;

use crate::{err, Result};
use quickcrud_core::{schema::Model, stmt::OrderBy, stmt::Record};

/// Ordering and paging for [`Db::find_many`](crate::Db::find_many).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    /// Sort keys, applied in order. Empty sorts by primary key.
    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

fn first_row(model: &Model, rows: Vec<Record>) -> Result<Record> {
    rows.into_iter()
        .next()
        .ok_or_else(|| err!("write to `{}` returned no row", model.name))
}
