use super::Error;

/// Error when text or JSON input cannot be coerced to a field's declared type.
#[derive(Debug)]
pub(super) struct TypeCoercionError {
    pub(super) value: Box<str>,
    pub(super) to_type: Box<str>,
}

impl std::error::Error for TypeCoercionError {}

impl core::fmt::Display for TypeCoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot coerce {:?} to {}", self.value, self.to_type)
    }
}

impl Error {
    /// Creates a type coercion error.
    ///
    /// `value` is the raw input as received; `to_type` names the declared type.
    pub fn type_coercion(value: impl Into<String>, to_type: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TypeCoercion(TypeCoercionError {
            value: value.into().into(),
            to_type: to_type.into().into(),
        }))
    }

    /// Returns `true` if this error is a type coercion error.
    pub fn is_type_coercion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeCoercion(_))
    }
}
