use axum::http::Method;

/// An endpoint the router can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudMethod {
    /// `GET {prefix}/:pk`
    FindOne,

    /// `GET {prefix}`
    FindMany,

    /// `POST {prefix}` with one object
    CreateOne,

    /// `POST {prefix}` with `{"insert": [...]}`
    CreateMany,

    /// `POST {prefix}` with one object and an optional `on_conflict` policy
    UpsertOne,

    /// `POST {prefix}` with `{"insert": [...]}` and an optional `on_conflict`
    /// policy
    UpsertMany,

    /// `PUT {prefix}/:pk`
    UpdateOne,

    /// `PUT {prefix}`
    UpdateMany,

    /// `PATCH {prefix}/:pk`
    PatchOne,

    /// `PATCH {prefix}`
    PatchMany,

    /// `DELETE {prefix}/:pk`
    DeleteOne,

    /// `DELETE {prefix}`
    DeleteMany,

    /// `POST {prefix}`, answered with `303 See Other` to the created row
    PostRedirectGet,
}

impl CrudMethod {
    /// Methods exposed when none are chosen explicitly.
    pub const DEFAULT: [CrudMethod; 9] = [
        CrudMethod::FindOne,
        CrudMethod::FindMany,
        CrudMethod::UpsertMany,
        CrudMethod::UpdateOne,
        CrudMethod::UpdateMany,
        CrudMethod::PatchOne,
        CrudMethod::PatchMany,
        CrudMethod::DeleteOne,
        CrudMethod::DeleteMany,
    ];

    pub fn http_method(self) -> Method {
        use CrudMethod::*;

        match self {
            FindOne | FindMany => Method::GET,
            CreateOne | CreateMany | UpsertOne | UpsertMany | PostRedirectGet => Method::POST,
            UpdateOne | UpdateMany => Method::PUT,
            PatchOne | PatchMany => Method::PATCH,
            DeleteOne | DeleteMany => Method::DELETE,
        }
    }

    /// True if the route addresses a single row by primary key.
    pub fn is_item(self) -> bool {
        matches!(
            self,
            CrudMethod::FindOne | CrudMethod::UpdateOne | CrudMethod::PatchOne | CrudMethod::DeleteOne
        )
    }
}
