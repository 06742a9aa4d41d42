use super::Error;

/// Error when the cursor visibly breaks the ordering the materializer relies
/// on, e.g. a composite key smaller than the one before it in the same unit.
///
/// Only violations that can be seen locally are reported. Rows that are
/// mis-ordered in ways that keep keys increasing still group incorrectly.
#[derive(Debug)]
pub(super) struct PreconditionError {
    message: Box<str>,
}

impl std::error::Error for PreconditionError {}

impl core::fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "precondition violated: {}", self.message)
    }
}

impl Error {
    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Precondition(PreconditionError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a precondition error.
    pub fn is_precondition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Precondition(_))
    }
}
