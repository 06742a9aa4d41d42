//! Caller-owned query sessions.

use crate::{materialize::next_units, query, Model, Table};

use joinorm_core::{driver::Cursor, err, Result};
use tracing::debug;

/// One pass of a query over a cursor, materializing root units on demand.
///
/// A session borrows its table for as long as it is open: the table carries
/// the parse state between pages. Closing or dropping the session resets
/// that state, so the table can be queried again.
pub struct Session<'t, M: Model, C: Cursor> {
    table: &'t mut Table<M>,

    /// `None` once closed or after a failed page
    cursor: Option<C>,
}

impl<'t, M: Model, C: Cursor> Session<'t, M, C> {
    /// Opens a session over `cursor`, which must hold the rows of the query
    /// built from `table`.
    pub fn open(table: &'t mut Table<M>, cursor: C) -> Result<Self> {
        query::validate(&*table)?;
        table.reset();

        Ok(Self {
            table,
            cursor: Some(cursor),
        })
    }

    /// Returns at most `limit` more units.
    pub fn next_page(&mut self, limit: usize) -> Result<Vec<M>> {
        self.next(Some(limit))
    }

    /// Returns every remaining unit and closes the session.
    pub fn fetch_all(mut self) -> Result<Vec<M>> {
        self.next(None)
    }

    /// Returns `false` once every unit has been returned. A session that has
    /// not read its first page yet reports `true`.
    pub fn has_more(&self) -> bool {
        match &self.cursor {
            Some(cursor) => !cursor.is_after_last() || !self.table.state.results.is_empty(),
            None => false,
        }
    }

    /// Rewinds the cursor and forgets everything materialized so far.
    pub fn reset(&mut self) -> Result<()> {
        let Some(cursor) = &mut self.cursor else {
            return Err(err!("session is closed"));
        };

        self.table.reset();
        cursor.move_to_first()?;
        Ok(())
    }

    /// Releases the cursor and resets the table's parse state.
    pub fn close(self) {}

    fn next(&mut self, limit: Option<usize>) -> Result<Vec<M>> {
        let Some(cursor) = &mut self.cursor else {
            return Err(err!("session is closed"));
        };

        match next_units(self.table, cursor, limit) {
            Ok(units) => {
                debug!(
                    table = self.table.table_name(),
                    units = units.len(),
                    "materialized page"
                );
                Ok(units)
            }
            Err(err) => {
                self.cursor = None;
                self.table.reset();
                Err(err)
            }
        }
    }
}

impl<M: Model, C: Cursor> Drop for Session<'_, M, C> {
    fn drop(&mut self) {
        self.table.reset();
    }
}

/// Materializes every unit of `cursor` against `table`.
pub fn materialize<M: Model>(table: &mut Table<M>, cursor: impl Cursor) -> Result<Vec<M>> {
    Session::open(table, cursor)?.fetch_all()
}
