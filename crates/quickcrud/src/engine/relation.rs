use super::Page;
use crate::{Db, Result};

use quickcrud_core::{
    schema::HasMany,
    stmt::{Expr, OrderBy, Record, Value, ValueSet},
};

impl Db {
    /// Loads the children of each parent through a one-to-many relation.
    /// The result lines up with `parents`; children are in primary key
    /// order.
    pub async fn load_children(
        &self,
        relation: &HasMany,
        parents: &[Record],
    ) -> Result<Vec<Vec<Record>>> {
        let keys: ValueSet = parents
            .iter()
            .filter_map(|parent| parent.get(&relation.parent_column))
            .filter(|key| !key.is_null())
            .cloned()
            .collect();

        if keys.is_empty() {
            return Ok(vec![vec![]; parents.len()]);
        }

        tracing::debug!(relation = %relation.name, keys = keys.len(), "load_children");

        let filter = Expr::in_list(Expr::column(&relation.child_column), Value::from(keys));
        let page = Page {
            order_by: vec![OrderBy::asc(&relation.child.primary_key().name)],
            ..Page::default()
        };

        let children = self.find_many(&relation.child, filter, page).await?;

        Ok(parents
            .iter()
            .map(|parent| match parent.get(&relation.parent_column) {
                Some(key) if !key.is_null() => children
                    .iter()
                    .filter(|child| child.get(&relation.child_column) == Some(key))
                    .cloned()
                    .collect(),
                _ => vec![],
            })
            .collect())
    }
}
