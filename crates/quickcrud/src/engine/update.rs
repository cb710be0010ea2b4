use super::{transaction::Tx, Page};
use crate::{Db, Error, Result};

use quickcrud_core::{
    conflict::{self, Action},
    driver::operation::Update,
    schema::Model,
    stmt::{Expr, Record},
};

impl Db {
    /// Sets `assignments` on every row of `model` matching `filter`,
    /// returning the updated rows.
    ///
    /// Updates carry no conflict policy, so a uniqueness violation always
    /// fails the call. Empty assignments only read the matching rows.
    pub async fn update(
        &self,
        model: &Model,
        filter: Expr,
        assignments: Record,
    ) -> Result<Vec<Record>> {
        if assignments.is_empty() {
            return self.find_many(model, filter, Page::default()).await;
        }

        tracing::debug!(table = %model.name, columns = assignments.len(), "update");

        let mut tx = Tx::begin(self).await?;
        let result = tx
            .exec(Update {
                table: model.name.clone(),
                assignments: assignments.clone(),
                filter,
            })
            .await
            .map_err(|err| reject(model, &assignments, err));
        tx.finish(result).await
    }
}

fn reject(model: &Model, assignments: &Record, err: Error) -> Error {
    if let Some(violation) = err.violation() {
        let action = conflict::resolve(assignments, None, violation);
        debug_assert_eq!(action, Action::Reject);
        tracing::debug!(table = %model.name, %violation, "update rejected");
    }

    err
}
