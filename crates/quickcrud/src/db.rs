mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

use crate::Result;

use quickcrud_core::{
    driver::{Connection, Driver},
    schema::Model,
    Schema,
};

use std::sync::Arc;

/// A database handle. Clones share the schema and driver.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    schema: Arc<Schema>,
    driver: Box<dyn Driver>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    /// Looks up a registered model by table name.
    pub fn model(&self, name: &str) -> Result<&Arc<Model>> {
        self.shared.schema.model(name)
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Creates a table for every registered model.
    pub async fn push_schema(&self) -> Result<()> {
        let mut connection = self.connection().await?;
        connection.push_schema(&self.shared.schema).await
    }

    pub(crate) async fn connection(&self) -> Result<Box<dyn Connection>> {
        self.shared.driver.connect().await
    }
}
