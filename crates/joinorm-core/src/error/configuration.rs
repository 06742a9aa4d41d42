use super::Error;

/// Error when a table tree is configured in a way that cannot be queried,
/// written, or deleted.
///
/// This occurs when:
/// - A node is queried before its id columns are declared
/// - Two nodes of the same tree qualify their columns with the same alias
/// - A nested child has no join registered on its parent
/// - A join or a delete id does not match the arity of the id columns
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
