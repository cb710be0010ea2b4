use super::transaction::Tx;
use crate::{Db, Result};

use quickcrud_core::{
    driver::operation::Delete,
    schema::Model,
    stmt::{Expr, Record},
};

impl Db {
    /// Deletes every row of `model` matching `filter`, returning the deleted
    /// rows.
    pub async fn delete(&self, model: &Model, filter: Expr) -> Result<Vec<Record>> {
        tracing::debug!(table = %model.name, "delete");

        let mut tx = Tx::begin(self).await?;
        let result = tx
            .exec(Delete {
                table: model.name.clone(),
                filter,
            })
            .await;
        tx.finish(result).await
    }
}
