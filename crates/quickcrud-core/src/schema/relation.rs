use super::Model;
use std::sync::Arc;

/// A one-to-many relation from a parent model to a child model whose field
/// references one of the parent's fields.
#[derive(Debug, Clone)]
pub struct HasMany {
    /// Relation name; the child table name.
    pub name: String,

    pub child: Arc<Model>,

    /// Field on the child holding the foreign key.
    pub child_column: String,

    /// Field on the parent the foreign key references.
    pub parent_column: String,
}

impl HasMany {
    /// Key under which joined children are nested in a parent row.
    pub fn output_key(&self) -> String {
        format!("{}_foreign", self.parent_column)
    }
}
