use super::{Connect, Db, Shared};
use crate::Result;

use quickcrud_core::{
    driver::Driver,
    schema::{self, Model},
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Schema builder
    core: schema::Builder,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.core.model(model);
        self
    }

    /// Connects to the database at `url`, picking the driver by URL scheme.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = self.core.build()?;

        tracing::debug!(
            url = %driver.url(),
            models = schema.models().len(),
            "database handle ready"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                schema: Arc::new(schema),
                driver: Box::new(driver),
            }),
        })
    }
}
