use super::Error;

/// Error when a write or delete batch fails inside its transaction.
///
/// The batch has been rolled back when this error is returned. The store
/// error that caused it is kept as the cause.
#[derive(Debug)]
pub(super) struct TransactionError;

impl std::error::Error for TransactionError {}

impl core::fmt::Display for TransactionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("transaction failed and was rolled back")
    }
}

impl Error {
    /// Wraps the error that aborted a transactional batch.
    pub fn transaction(cause: Error) -> Error {
        cause.context(Error::from(super::ErrorKind::Transaction(TransactionError)))
    }

    /// Returns `true` if this error is a failed transactional batch.
    pub fn is_transaction(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Transaction(_))
    }
}
