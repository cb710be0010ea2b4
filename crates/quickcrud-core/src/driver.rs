mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::Schema, Result};

use std::{borrow::Cow, fmt::Debug, sync::Arc};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The connection URL this driver was created from.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a connection. Drivers backed by a single storage handle may
    /// hand out one connection at a time, waiting until the previous one is
    /// dropped.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, schema: &Arc<Schema>, op: Operation) -> Result<Response>;

    /// Creates a table for every model in the schema.
    async fn push_schema(&mut self, schema: &Schema) -> Result<()>;
}
