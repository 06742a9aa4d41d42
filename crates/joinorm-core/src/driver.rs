mod cursor;
pub use cursor::Cursor;

mod rows;
pub use rows::Rows;

use crate::{
    stmt::{DeleteRecord, Query, WriteRecord},
    Result,
};

use std::fmt::Debug;

/// The relational store, as seen by the mapping layer.
///
/// Every call blocks until the store answers. Implementations do not need to
/// be thread-safe: one executor serves one sequential caller.
pub trait Executor: Debug {
    /// Cursor type returned by [`Executor::query`].
    type Cursor: Cursor;

    /// Runs a flattened-join query and returns a cursor positioned before the
    /// first row.
    fn query(&mut self, query: &Query) -> Result<Self::Cursor>;

    /// Inserts one row. Returns the number of affected rows.
    fn insert(&mut self, record: &WriteRecord) -> Result<u64>;

    /// Deletes the rows matched by the record's filter. Returns the number of
    /// affected rows.
    fn delete(&mut self, record: &DeleteRecord) -> Result<u64>;

    fn begin_transaction(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Releases the underlying connection. The executor must not be used
    /// afterwards.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}
