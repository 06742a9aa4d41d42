use super::Error;
use crate::stmt::{Kind, Value};

/// Where a column failed to decode.
#[derive(Debug, Clone)]
pub struct DecodeContext {
    /// Physical table name of the node
    pub table: String,

    /// Name qualifying the node in SQL (the alias, or the table name)
    pub alias: String,

    /// Column name as declared on the node
    pub column: String,

    /// Ordinal of the cursor row being decoded
    pub row: usize,

    /// Kind the column was declared with
    pub expected: Kind,

    /// Value the cursor actually returned
    pub found: Value,
}

/// Error when a cursor value does not match the declared kind of its column.
#[derive(Debug)]
pub(super) struct DecodeError {
    cx: Box<DecodeContext>,
}

impl std::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let cx = &self.cx;
        write!(
            f,
            "cannot decode column `{}.{}` (table `{}`) at row {}: expected {:?}, found {}",
            cx.alias,
            cx.column,
            cx.table,
            cx.row,
            cx.expected,
            cx.found.type_name()
        )
    }
}

impl Error {
    /// Creates a decode error.
    pub fn decode(cx: DecodeContext) -> Error {
        Error::from(super::ErrorKind::Decode(DecodeError { cx: Box::new(cx) }))
    }

    /// Returns `true` if this error is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Decode(_))
    }
}
