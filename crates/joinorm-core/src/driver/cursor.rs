use crate::{stmt::Value, Result};

/// A forward-only view over the rows of a query result.
///
/// A fresh cursor is positioned before the first row. Row ordinals start at
/// zero; moving past the last row leaves the cursor after last.
pub trait Cursor {
    /// Moves to the first row. Returns `false` if there is none.
    fn move_to_first(&mut self) -> Result<bool>;

    /// Moves to the next row. Returns `false` once the cursor is after last.
    fn move_to_next(&mut self) -> Result<bool>;

    fn is_before_first(&self) -> bool;

    fn is_after_last(&self) -> bool;

    /// Ordinal of the current row.
    fn row_ordinal(&self) -> usize;

    /// Value of a column of the current row.
    fn column_value(&self, index: usize) -> Result<Value>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn move_to_first(&mut self) -> Result<bool> {
        (**self).move_to_first()
    }

    fn move_to_next(&mut self) -> Result<bool> {
        (**self).move_to_next()
    }

    fn is_before_first(&self) -> bool {
        (**self).is_before_first()
    }

    fn is_after_last(&self) -> bool {
        (**self).is_after_last()
    }

    fn row_ordinal(&self) -> usize {
        (**self).row_ordinal()
    }

    fn column_value(&self, index: usize) -> Result<Value> {
        (**self).column_value(index)
    }
}
