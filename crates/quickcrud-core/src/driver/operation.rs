mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod transaction;
pub use transaction::Transaction;

mod update;
pub use update::Update;

/// A storage operation against one model's table. Every operation except
/// transaction control returns the affected rows.
#[derive(Debug)]
pub enum Operation {
    /// Create a new record
    Insert(Insert),

    /// Query the table
    Select(Select),

    /// Update every record matching a filter
    Update(Update),

    /// Delete every record matching a filter
    Delete(Delete),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

impl Operation {
    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}
