//! Shared fixtures for the end-to-end suites: models, a database set up in
//! memory, and a client that drives a router in-process.

mod client;
pub use client::{Client, TestResponse};

pub mod models;

use quickcrud::{schema::Model, Db};

/// Installs a fmt subscriber writing through the test harness, filtered by
/// `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Connects to a fresh in-memory database holding `models`.
pub async fn setup(models: impl IntoIterator<Item = Model>) -> Db {
    init_tracing();

    let mut builder = Db::builder();
    for model in models {
        builder.register(model);
    }

    let db = builder.connect("sqlite::memory:").await.unwrap();
    db.push_schema().await.unwrap();
    db
}

/// Encodes `pairs` as a querystring, keeping repeated keys.
pub fn query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}
