use super::{Model, Schema};
use crate::Result;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,
}

impl Builder {
    pub fn model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn models(&mut self, models: impl IntoIterator<Item = Model>) -> &mut Self {
        self.models.extend(models);
        self
    }

    /// Verifies the registered models and freezes them into a [`Schema`].
    pub fn build(&mut self) -> Result<Schema> {
        let mut schema = Schema::default();

        for mut model in self.models.drain(..) {
            model.index_primary_key()?;

            let name = model.name.clone();
            if schema.models.insert(name.clone(), Arc::new(model)).is_some() {
                return Err(crate::Error::invalid_schema(format!(
                    "duplicate model `{name}`"
                )));
            }
        }

        schema.verify()?;
        Ok(schema)
    }
}
