mod value;
pub(crate) use value::Value;

use quickcrud_core::{
    async_trait,
    conflict::Violation,
    driver::{
        operation::{Operation, Transaction},
        Driver, Response,
    },
    schema::{Model, Schema},
    stmt::Record,
    Error, Result,
};
use quickcrud_sql::{self as sql, stmt::CreateTable};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::{Mutex, OnceCell, OwnedMutexGuard};
use url::Url;

/// SQLite storage. Every connection shares one underlying database handle,
/// so an in-memory database lives as long as the driver.
#[derive(Debug)]
pub struct Sqlite {
    location: Location,
    handle: OnceCell<Arc<Mutex<RusqliteConnection>>>,
}

#[derive(Debug)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_request(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::in_memory())
        } else {
            Ok(Self::open(url.path()))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::with_location(Location::InMemory)
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::with_location(Location::File(path.as_ref().to_path_buf()))
    }

    fn with_location(location: Location) -> Self {
        Sqlite {
            location,
            handle: OnceCell::new(),
        }
    }

    async fn handle(&self) -> Result<Arc<Mutex<RusqliteConnection>>> {
        let handle = self
            .handle
            .get_or_try_init(|| async {
                let connection = match &self.location {
                    Location::File(path) => RusqliteConnection::open(path),
                    Location::InMemory => RusqliteConnection::open_in_memory(),
                }
                .map_err(Error::driver)?;

                // `LIKE` is case-insensitive by default; `ILIKE` is spelled
                // with `lower()` instead
                connection
                    .execute_batch("PRAGMA case_sensitive_like = ON; PRAGMA foreign_keys = ON;")
                    .map_err(Error::driver)?;

                Ok::<_, Error>(Arc::new(Mutex::new(connection)))
            })
            .await?;

        Ok(handle.clone())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match &self.location {
            Location::InMemory => Cow::Borrowed("sqlite::memory:"),
            Location::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn quickcrud_core::Connection>> {
        let connection = self.handle().await?.lock_owned().await;

        // A previous holder dropped mid-transaction
        if !connection.is_autocommit() {
            tracing::warn!("rolling back abandoned transaction");
            connection.execute_batch("ROLLBACK").map_err(Error::driver)?;
        }

        Ok(Box::new(Connection { connection }))
    }
}

/// Exclusive access to the database until dropped.
#[derive(Debug)]
pub struct Connection {
    connection: OwnedMutexGuard<RusqliteConnection>,
}

#[async_trait]
impl quickcrud_core::driver::Connection for Connection {
    async fn exec(&mut self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        let op = match op {
            Operation::Transaction(op) => {
                self.transaction(&op)?;
                return Ok(Response::count(0));
            }
            op => op,
        };

        let model = schema.model(table_of(&op))?.clone();

        let Some(stmt) = sql::Statement::from_operation(&model, op) else {
            return Ok(Response::count(0));
        };

        let mut params: Vec<quickcrud_core::stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite().serialize(&stmt, &mut params);

        tracing::trace!(sql = %sql_str, params = params.len(), "exec");

        let mut prepared = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(|err| into_error(&model, err))?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let columns = stmt.returning();

        if columns.is_empty() {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(|err| into_error(&model, err))?;

            return Ok(Response::count(count as _));
        }

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(|err| into_error(&model, err))?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Record::new();

                    for (index, column) in columns.iter().enumerate() {
                        let field = model.expect_field(column)?;
                        let value = Value::from_sql(row, index, &field.ty)?;
                        record.insert(column.clone(), value.into_inner());
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => return Err(into_error(&model, err)),
            }
        }

        Ok(Response::values(ret))
    }

    async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        let serializer = sql::Serializer::sqlite();

        for model in schema.models() {
            let mut params: Vec<quickcrud_core::stmt::Value> = vec![];
            let stmt = serializer.serialize(&CreateTable::from_model(model).into(), &mut params);
            debug_assert!(params.is_empty());

            tracing::trace!(sql = %stmt, "push_schema");

            self.connection.execute(&stmt, []).map_err(Error::driver)?;
        }

        Ok(())
    }
}

impl Connection {
    fn transaction(&mut self, op: &Transaction) -> Result<()> {
        let sql_str = sql::Serializer::sqlite().serialize_transaction(op);

        tracing::trace!(sql = %sql_str, "transaction");

        self.connection
            .execute(&sql_str, [])
            .map_err(Error::driver)?;
        Ok(())
    }
}

fn table_of(op: &Operation) -> &str {
    match op {
        Operation::Insert(op) => &op.table,
        Operation::Select(op) => &op.table,
        Operation::Update(op) => &op.table,
        Operation::Delete(op) => &op.table,
        Operation::Transaction(_) => "",
    }
}

/// Maps uniqueness violations to [`Error::conflict`]; anything else is a
/// driver error.
fn into_error(model: &Model, err: rusqlite::Error) -> Error {
    use rusqlite::ffi;

    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
            || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        {
            let violation = parse_violation(message).unwrap_or_else(|| {
                Violation::new(model.name.clone(), [model.primary_key().name.clone()])
            });
            return Error::conflict(violation);
        }
    }

    Error::driver(err)
}

/// Parses `UNIQUE constraint failed: t.a, t.b`.
fn parse_violation(message: &str) -> Option<Violation> {
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;

    let mut table = None;
    let mut names = vec![];

    for column in columns.split(", ") {
        let (t, name) = column.trim().split_once('.')?;
        table.get_or_insert(t);
        names.push(name.to_string());
    }

    Some(Violation::new(table?, names))
}
