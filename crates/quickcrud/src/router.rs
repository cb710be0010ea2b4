//! HTTP routes exposing CRUD over one registered table.
//!
//! ```no_run
//! # async fn run(db: quickcrud::Db) -> quickcrud::Result<()> {
//! use quickcrud::{CrudMethod, CrudRouter};
//!
//! let app = CrudRouter::builder(db, "test")
//!     .prefix("/test")
//!     .methods([CrudMethod::FindMany, CrudMethod::CreateOne])
//!     .exclude_columns(["bytea_value"])
//!     .build()?;
//! # let _: axum::Router = app;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod method;
mod payload;

pub use method::CrudMethod;

use crate::{Db, Error, Result};
use handler::Route;

use axum::{http::Method, routing::MethodRouter, Router};
use std::{collections::HashSet, sync::Arc};

/// Entry point for building CRUD routes.
#[derive(Debug)]
pub struct CrudRouter;

impl CrudRouter {
    pub fn builder(db: Db, table: impl Into<String>) -> Builder {
        Builder {
            db,
            table: table.into(),
            prefix: None,
            methods: None,
            excluded: vec![],
        }
    }
}

#[derive(Debug)]
pub struct Builder {
    db: Db,
    table: String,

    /// Defaults to `/{table}`
    prefix: Option<String>,

    /// Defaults to [`CrudMethod::DEFAULT`]
    methods: Option<Vec<CrudMethod>>,

    excluded: Vec<String>,
}

impl Builder {
    /// Path the collection routes are mounted on. Item routes live at
    /// `{prefix}/:pk`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = CrudMethod>) -> Self {
        self.methods = Some(methods.into_iter().collect());
        self
    }

    /// Hides columns from payloads, responses and filters. Each must be
    /// nullable or have a default, and cannot be the primary key.
    pub fn exclude_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.excluded.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Router> {
        let model = self.db.model(&self.table)?.clone();

        for column in &self.excluded {
            let field = model.expect_field(column)?;

            if field.primary_key {
                return Err(Error::invalid_schema(format!(
                    "cannot exclude primary key `{column}` of `{}`",
                    model.name
                )));
            }

            if field.is_required() {
                return Err(Error::invalid_schema(format!(
                    "cannot exclude `{column}` of `{}`; it is not nullable and has no default",
                    model.name
                )));
            }
        }

        let prefix = match self.prefix {
            Some(prefix) => normalize_prefix(&prefix)?,
            None => format!("/{}", model.name),
        };

        let methods = self
            .methods
            .unwrap_or_else(|| CrudMethod::DEFAULT.to_vec());

        let route = Arc::new(Route {
            surface: model.without_columns(self.excluded.iter().map(String::as_str)),
            model,
            db: self.db,
            prefix: prefix.clone(),
        });

        let mut claimed: HashSet<(Method, bool)> = HashSet::new();
        let mut collection = MethodRouter::new();
        let mut item = MethodRouter::new();
        let (mut has_collection, mut has_item) = (false, false);

        for method in methods {
            if !claimed.insert((method.http_method(), method.is_item())) {
                tracing::warn!(
                    ?method,
                    table = %route.model.name,
                    "skipping route; another method already serves this verb and path"
                );
                continue;
            }

            if method.is_item() {
                item = attach(item, method);
                has_item = true;
            } else {
                collection = attach(collection, method);
                has_collection = true;
            }
        }

        let mut router = Router::new();

        if has_collection {
            router = router.route(&prefix, collection);
        }

        if has_item {
            router = router.route(&format!("{prefix}/:pk"), item);
        }

        tracing::debug!(table = %route.model.name, %prefix, "routes built");

        Ok(router.with_state(route))
    }
}

fn attach(router: MethodRouter<Arc<Route>>, method: CrudMethod) -> MethodRouter<Arc<Route>> {
    use CrudMethod::*;

    match method {
        FindOne => router.get(handler::find_one),
        FindMany => router.get(handler::find_many),
        CreateOne => router.post(handler::create_one),
        CreateMany => router.post(handler::create_many),
        UpsertOne => router.post(handler::upsert_one),
        UpsertMany => router.post(handler::upsert_many),
        PostRedirectGet => router.post(handler::post_redirect_get),
        UpdateOne => router.put(handler::update_one),
        UpdateMany => router.put(handler::update_many),
        PatchOne => router.patch(handler::patch_one),
        PatchMany => router.patch(handler::patch_many),
        DeleteOne => router.delete(handler::delete_one),
        DeleteMany => router.delete(handler::delete_many),
    }
}

fn normalize_prefix(prefix: &str) -> Result<String> {
    let trimmed = prefix.trim_end_matches('/');

    if !trimmed.starts_with('/') {
        return Err(Error::invalid_request(format!(
            "route prefix must start with `/`; got {prefix:?}"
        )));
    }

    Ok(trimmed.to_string())
}
