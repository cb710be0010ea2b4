mod builder;
pub use builder::Builder;

mod field;
pub use field::{Field, FieldDefault, ForeignKey};

mod model;
pub use model::Model;

mod relation;
pub use relation::HasMany;

mod ty;
pub use ty::Type;

mod verify;

use crate::{Error, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// The set of registered models, verified and immutable once built.
#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<String, Arc<Model>>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Arc<Model>> {
        self.models.values()
    }

    pub fn model(&self, name: &str) -> Result<&Arc<Model>> {
        self.models
            .get(name)
            .ok_or_else(|| Error::invalid_schema(format!("no model named `{name}`")))
    }

    /// One-to-many relations of `parent`, derived from foreign keys on other
    /// models that reference one of its fields.
    pub fn has_many(&self, parent: &str) -> Vec<HasMany> {
        let mut relations = vec![];

        for child in self.models.values() {
            for field in &child.fields {
                let Some(fk) = &field.references else {
                    continue;
                };

                if fk.table == parent {
                    relations.push(HasMany {
                        name: child.name.clone(),
                        child: child.clone(),
                        child_column: field.name.clone(),
                        parent_column: fk.column.clone(),
                    });
                }
            }
        }

        relations
    }

    /// Finds the one-to-many relation from `parent` to the model named `child`.
    pub fn relation(&self, parent: &str, child: &str) -> Option<HasMany> {
        self.has_many(parent).into_iter().find(|rel| rel.name == child)
    }
}
