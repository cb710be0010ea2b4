//! Deciding what to do when a write collides with a unique constraint.

use crate::schema::Model;
use crate::stmt::Record;
use crate::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied instruction for resolving a uniqueness violation by
/// updating columns of the existing row instead of rejecting the write.
///
/// Sent as the `on_conflict` key of an upsert body:
///
/// ```json
/// {"on_conflict": {"update_columns": ["numeric_value"]}}
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConflictPolicy {
    #[serde(default)]
    pub update_columns: IndexSet<String>,
}

impl ConflictPolicy {
    pub fn new<I>(update_columns: I) -> ConflictPolicy
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ConflictPolicy {
            update_columns: update_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks the named columns exist on `model` and are not its primary key.
    pub fn validate(&self, model: &Model) -> Result<()> {
        for column in &self.update_columns {
            let field = model.expect_field(column)?;

            if field.primary_key {
                return Err(Error::validation_read_only(column));
            }
        }

        Ok(())
    }
}

/// The unique columns a write collided on, as reported by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub table: String,
    pub columns: Vec<String>,
}

impl Violation {
    pub fn new<I>(table: impl Into<String>, columns: I) -> Violation
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Violation {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.table, self.columns.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Surface the violation as a conflict
    Reject,

    /// Update these columns of the row holding the violated key. Empty keeps
    /// the existing row unchanged.
    UpdateColumns(IndexSet<String>),
}

/// Decides how to handle `violation`, raised while applying `write`.
///
/// Without a policy the write is rejected. With one, the policy's columns
/// that `write` actually carries are updated. Locating the existing row is
/// left to storage, using the violated columns.
pub fn resolve(write: &Record, policy: Option<&ConflictPolicy>, violation: &Violation) -> Action {
    debug_assert!(!violation.columns.is_empty(), "{violation:?}");

    match policy {
        None => Action::Reject,
        Some(policy) => Action::UpdateColumns(
            policy
                .update_columns
                .iter()
                .filter(|column| write.contains(column))
                .cloned()
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Type};
    use crate::stmt::Value;

    fn write() -> Record {
        [
            ("float4_value", Value::F32(0.91)),
            ("numeric_value", Value::I32(10)),
            ("text_value", Value::from("string")),
        ]
        .into_iter()
        .collect()
    }

    fn violation() -> Violation {
        Violation::new("test", ["float4_value"])
    }

    #[test]
    fn no_policy_rejects() {
        assert_eq!(resolve(&write(), None, &violation()), Action::Reject);
    }

    #[test]
    fn policy_limits_update_to_named_columns() {
        let policy = ConflictPolicy::new(["numeric_value"]);
        assert_eq!(
            resolve(&write(), Some(&policy), &violation()),
            Action::UpdateColumns(IndexSet::from(["numeric_value".to_string()]))
        );
    }

    #[test]
    fn columns_absent_from_the_write_are_dropped() {
        let policy = ConflictPolicy::new(["numeric_value", "int2_value"]);
        assert_eq!(
            resolve(&write(), Some(&policy), &violation()),
            Action::UpdateColumns(IndexSet::from(["numeric_value".to_string()]))
        );
    }

    #[test]
    fn empty_policy_keeps_the_existing_row() {
        let policy = ConflictPolicy::default();
        assert_eq!(
            resolve(&write(), Some(&policy), &violation()),
            Action::UpdateColumns(IndexSet::new())
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let policy = ConflictPolicy::new(["text_value"]);
        let write = write();
        let violation = violation();
        assert_eq!(
            resolve(&write, Some(&policy), &violation),
            resolve(&write, Some(&policy), &violation)
        );
    }

    #[test]
    fn policy_deserializes_from_json() {
        let policy: ConflictPolicy =
            serde_json::from_str(r#"{"update_columns": ["numeric_value"]}"#).unwrap();
        assert_eq!(policy, ConflictPolicy::new(["numeric_value"]));

        assert!(serde_json::from_str::<ConflictPolicy>(r#"{"columns": []}"#).is_err());
    }

    #[test]
    fn validate_checks_columns() {
        let model = Model::new(
            "test",
            [
                Field::new("id", Type::I32).primary_key(),
                Field::new("numeric_value", Type::Decimal),
            ],
        );

        ConflictPolicy::new(["numeric_value"]).validate(&model).unwrap();

        let err = ConflictPolicy::new(["nope"]).validate(&model).unwrap_err();
        assert!(err.is_unknown_field());

        let err = ConflictPolicy::new(["id"]).validate(&model).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn violation_display() {
        let violation = Violation::new("test", ["a", "b"]);
        assert_eq!(violation.to_string(), "test(a, b)");
    }
}
