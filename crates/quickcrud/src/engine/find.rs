use super::Page;
use crate::{Db, Error, Result};

use quickcrud_core::{
    driver::operation::Select,
    schema::Model,
    stmt::{Expr, OrderBy, Record, Value},
};

impl Db {
    /// Returns the row of `model` whose primary key is `pk`, provided it also
    /// matches `filter`.
    pub async fn find_one(&self, model: &Model, pk: Value, filter: Expr) -> Result<Record> {
        let pk_column = &model.primary_key().name;

        tracing::debug!(table = %model.name, ?pk, "find_one");

        let mut select = Select::new(
            &model.name,
            Expr::and(Expr::eq(Expr::column(pk_column), pk.clone()), filter),
        );
        select.limit = Some(1);

        let mut connection = self.connection().await?;
        let rows = connection
            .exec(self.schema(), select.into())
            .await?
            .rows
            .into_values();

        rows.into_iter().next().ok_or_else(|| {
            Error::record_not_found(format!("table={} key={}", model.name, pk.to_json()))
        })
    }

    /// Returns every row of `model` matching `filter`.
    pub async fn find_many(&self, model: &Model, filter: Expr, page: Page) -> Result<Vec<Record>> {
        tracing::debug!(table = %model.name, ?page, "find_many");

        let mut select = Select::new(&model.name, filter);
        select.order_by = if page.order_by.is_empty() {
            vec![OrderBy::asc(&model.primary_key().name)]
        } else {
            page.order_by
        };
        select.limit = page.limit;
        select.offset = page.offset;

        let mut connection = self.connection().await?;
        let response = connection.exec(self.schema(), select.into()).await?;
        Ok(response.rows.into_values())
    }
}
