pub mod coerce;
pub use coerce::TypeCoercer;

pub mod conflict;
pub use conflict::{Action, ConflictPolicy, Violation};

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod filter;
pub use filter::ParsedFilter;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses quickcrud's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
