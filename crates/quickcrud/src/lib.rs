pub mod db;
pub use db::Db;

mod engine;
pub use engine::Page;

pub mod router;
pub use router::{CrudMethod, CrudRouter};

pub use quickcrud_core::{
    bail, conflict, driver, err, filter, schema, stmt, ConflictPolicy, Error, ParsedFilter,
    Result, Schema,
};
