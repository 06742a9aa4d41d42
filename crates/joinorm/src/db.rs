mod transaction;
use transaction::Transaction;

use crate::{assemble_deletes, assemble_writes, Model, Session, Table};

use joinorm_core::{driver::Executor, Error, Result};
use tracing::debug;

/// A store handle running queries and transactional batches for any number
/// of table trees.
#[derive(Debug)]
pub struct Db<E> {
    executor: E,
}

impl<E: Executor> Db<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Runs the query built from `table` and opens a session over its rows.
    pub fn query<'t, M: Model>(&mut self, table: &'t mut Table<M>) -> Result<Session<'t, M, E::Cursor>> {
        let query = table.build_query()?;
        let cursor = self.executor.query(&query)?;
        Session::open(table, cursor)
    }

    /// Runs the query built from `table` and materializes every unit.
    pub fn fetch_all<M: Model>(&mut self, table: &mut Table<M>) -> Result<Vec<M>> {
        self.query(table)?.fetch_all()
    }

    /// Writes every object staged on `table` in one transaction. Returns the
    /// number of rows written.
    ///
    /// The staged objects are cleared once the transaction commits. On error
    /// nothing is written and the objects stay staged.
    pub fn write_all<M: Model>(&mut self, table: &mut Table<M>) -> Result<u64> {
        let records = assemble_writes(table)?;
        let count = self.batch(&records, E::insert)?;

        table.clear_pending();
        Ok(count)
    }

    /// Deletes every id registered on `table` and its nested children in one
    /// transaction. Returns the number of rows deleted.
    pub fn delete_all<M: Model>(&mut self, table: &mut Table<M>) -> Result<u64> {
        let records = assemble_deletes(table)?;
        let count = self.batch(&records, E::delete)?;

        table.clear_delete_ids();
        Ok(count)
    }

    pub fn executor(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Releases the underlying connection.
    pub fn close(mut self) -> Result<()> {
        self.executor.release()
    }

    fn batch<R: core::fmt::Debug>(
        &mut self,
        records: &[R],
        exec: impl Fn(&mut E, &R) -> Result<u64>,
    ) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let run = |executor: &mut E| -> Result<u64> {
            let mut tx = Transaction::begin(executor)?;
            let mut count = 0;

            for record in records {
                debug!(?record, "executing");
                count += exec(tx.executor(), record)?;
            }

            tx.commit()?;
            Ok(count)
        };

        run(&mut self.executor).map_err(Error::transaction)
    }
}
