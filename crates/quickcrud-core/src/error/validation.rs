use super::Error;

/// Error when a value fails validation constraints.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// String length constraint violation
    Length {
        value_len: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    /// A field without a default is missing from a full payload
    Required { field: Box<str> },

    /// `null` sent for a non-nullable field
    Null { field: Box<str> },

    /// The field cannot be written through this operation
    ReadOnly { field: Box<str> },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::Length {
                value_len,
                min,
                max,
            } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min == max {
                        return write!(
                            f,
                            "value length {} does not match required length {}",
                            value_len, min
                        );
                    }
                }

                match (min, max) {
                    (Some(min), _) if value_len < min => write!(
                        f,
                        "value length {} is too short (minimum: {})",
                        value_len, min
                    ),
                    (_, Some(max)) if value_len > max => write!(
                        f,
                        "value length {} is too long (maximum: {})",
                        value_len, max
                    ),
                    _ => f.write_str("length constraint violation"),
                }
            }
            ValidationErrorKind::Required { field } => {
                write!(f, "field `{}` is required", field)
            }
            ValidationErrorKind::Null { field } => {
                write!(f, "field `{}` cannot be null", field)
            }
            ValidationErrorKind::ReadOnly { field } => {
                write!(f, "field `{}` cannot be modified", field)
            }
        }
    }
}

impl Error {
    /// Creates a length validation error.
    pub fn validation_length(value_len: usize, min: Option<usize>, max: Option<usize>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Length {
                value_len,
                min,
                max,
            },
        }))
    }

    /// Creates an error for a required field missing from a payload.
    pub fn validation_required(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Required {
                field: field.into().into(),
            },
        }))
    }

    /// Creates an error for `null` sent to a non-nullable field.
    pub fn validation_null(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Null {
                field: field.into().into(),
            },
        }))
    }

    /// Creates an error for a write to a field the operation may not touch,
    /// such as the primary key in an update body.
    pub fn validation_read_only(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::ReadOnly {
                field: field.into().into(),
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
