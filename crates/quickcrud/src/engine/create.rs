use super::{first_row, transaction::Tx};
use crate::{Db, Result};

use quickcrud_core::{
    conflict::{self, Action, ConflictPolicy},
    driver::operation::{Insert, Select, Update},
    schema::Model,
    stmt::{Expr, Record},
};

impl Db {
    /// Inserts `records` into `model` in one transaction, returning the
    /// stored rows in order.
    ///
    /// Fields a record omits take their declared default. A record that
    /// collides with a unique constraint is resolved through `policy`:
    /// without one the whole call fails with a conflict.
    pub async fn create(
        &self,
        model: &Model,
        records: Vec<Record>,
        policy: Option<&ConflictPolicy>,
    ) -> Result<Vec<Record>> {
        if let Some(policy) = policy {
            policy.validate(model)?;
        }

        tracing::debug!(table = %model.name, records = records.len(), upsert = policy.is_some(), "create");

        let mut tx = Tx::begin(self).await?;
        let result = insert_all(&mut tx, model, records, policy).await;
        tx.finish(result).await
    }
}

async fn insert_all(
    tx: &mut Tx,
    model: &Model,
    records: Vec<Record>,
    policy: Option<&ConflictPolicy>,
) -> Result<Vec<Record>> {
    let mut created = Vec::with_capacity(records.len());

    for record in records {
        let record = with_defaults(model, record);
        created.push(insert_one(tx, model, record, policy).await?);
    }

    Ok(created)
}

fn with_defaults(model: &Model, mut record: Record) -> Record {
    for field in &model.fields {
        if record.contains(&field.name) {
            continue;
        }

        if let Some(default) = &field.default {
            record.insert(field.name.clone(), default.generate(&field.ty));
        }
    }

    record
}

async fn insert_one(
    tx: &mut Tx,
    model: &Model,
    record: Record,
    policy: Option<&ConflictPolicy>,
) -> Result<Record> {
    let insert = Insert {
        table: model.name.clone(),
        record: record.clone(),
    };

    let err = match tx.exec(insert).await {
        Ok(rows) => return first_row(model, rows),
        Err(err) => err,
    };

    let Some(violation) = err.violation() else {
        return Err(err);
    };

    let columns = match conflict::resolve(&record, policy, violation) {
        Action::Reject => {
            tracing::debug!(table = %model.name, %violation, "conflict rejected");
            return Err(err);
        }
        Action::UpdateColumns(columns) => columns,
    };

    tracing::debug!(table = %model.name, %violation, ?columns, "conflict resolved by update");

    // The existing row holds the same values in the violated columns
    let filter = Expr::and_from_vec(
        violation
            .columns
            .iter()
            .map(|column| {
                Expr::eq(
                    Expr::column(column),
                    record.get(column).cloned().unwrap_or_default(),
                )
            })
            .collect(),
    );

    let assignments: Record = record
        .iter()
        .filter(|(column, _)| columns.contains(*column))
        .map(|(column, value)| (column, value.clone()))
        .collect();

    let rows = if assignments.is_empty() {
        tx.exec(Select::new(&model.name, filter)).await?
    } else {
        tx.exec(Update {
            table: model.name.clone(),
            assignments,
            filter,
        })
        .await?
    };

    first_row(model, rows)
}
