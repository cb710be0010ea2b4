use super::Error;
use crate::conflict::Violation;

/// Error when a write collides with a unique constraint and no conflict
/// policy resolves it.
#[derive(Debug)]
pub(super) struct ConflictError {
    pub(super) violation: Violation,
}

impl std::error::Error for ConflictError {}

impl core::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "conflict: unique constraint violated on {}", self.violation)
    }
}

impl Error {
    /// Creates a conflict error for the given uniqueness violation.
    pub fn conflict(violation: Violation) -> Error {
        Error::from(super::ErrorKind::Conflict(ConflictError { violation }))
    }

    /// Returns `true` if this error is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Conflict(_))
    }

    /// Returns the violation carried by a conflict error.
    pub fn violation(&self) -> Option<&Violation> {
        match self.kind() {
            super::ErrorKind::Conflict(err) => Some(&err.violation),
            _ => None,
        }
    }
}
