use super::Error;

/// Error when an attribute of a domain object cannot be read or written.
///
/// Raised while materializing (a decoded value does not fit the attribute,
/// e.g. `NULL` into a non-optional field) and while assembling writes (an
/// accessor returns a value of another kind than the one bound).
#[derive(Debug)]
pub(super) struct AccessError {
    message: Box<str>,
}

impl std::error::Error for AccessError {}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "attribute access failed: {}", self.message)
    }
}

impl Error {
    /// Creates an attribute access error.
    pub fn access(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Access(AccessError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an attribute access error.
    pub fn is_access(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Access(_))
    }
}
