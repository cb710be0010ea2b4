use crate::{Db, Result};

use quickcrud_core::{
    driver::{
        operation::{Operation, Transaction},
        Connection,
    },
    stmt::Record,
    Schema,
};

use std::sync::Arc;

/// A connection with an open transaction.
pub(super) struct Tx {
    connection: Box<dyn Connection>,
    schema: Arc<Schema>,
}

impl Tx {
    pub(super) async fn begin(db: &Db) -> Result<Tx> {
        let mut connection = db.connection().await?;
        connection
            .exec(db.schema(), Transaction::Start.into())
            .await?;

        Ok(Tx {
            connection,
            schema: db.schema().clone(),
        })
    }

    /// Executes `op`, returning the affected rows.
    pub(super) async fn exec(&mut self, op: impl Into<Operation>) -> Result<Vec<Record>> {
        let response = self.connection.exec(&self.schema, op.into()).await?;
        Ok(response.rows.into_values())
    }

    /// Commits if `result` is `Ok`, rolls back otherwise.
    pub(super) async fn finish<T>(mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => match self.control(Transaction::Commit).await {
                Ok(()) => Ok(value),
                Err(err) => {
                    self.rollback().await;
                    Err(err)
                }
            },
            Err(err) => {
                self.rollback().await;
                Err(err)
            }
        }
    }

    async fn rollback(&mut self) {
        if let Err(err) = self.control(Transaction::Rollback).await {
            tracing::warn!(%err, "rollback failed");
        }
    }

    async fn control(&mut self, op: Transaction) -> Result<()> {
        self.connection.exec(&self.schema, op.into()).await?;
        Ok(())
    }
}
