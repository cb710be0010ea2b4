use super::Error;

/// Error when a filter operator cannot be applied to a field's declared type,
/// e.g. `____str` on a boolean.
#[derive(Debug)]
pub(super) struct UnsupportedOperatorError {
    pub(super) field: Box<str>,
    pub(super) operator: &'static str,
    pub(super) ty: Box<str>,
}

impl std::error::Error for UnsupportedOperatorError {}

impl core::fmt::Display for UnsupportedOperatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "operator `{}` is not supported on `{}` ({})",
            self.operator, self.field, self.ty
        )
    }
}

impl Error {
    /// Creates an unsupported operator error.
    pub fn unsupported_operator(
        field: impl Into<String>,
        operator: &'static str,
        ty: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperator(
            UnsupportedOperatorError {
                field: field.into().into(),
                operator,
                ty: ty.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported operator error.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperator(_))
    }
}
