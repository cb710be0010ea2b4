use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - Two models share a table name
/// - A model declares zero or several primary keys
/// - A foreign key references a missing model or field
/// - A route excludes a column it cannot omit
#[derive(Debug)]
pub(super) struct InvalidSchema {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
