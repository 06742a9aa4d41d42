use super::Cursor;
use crate::{stmt::Value, Result};

/// A cursor over rows that are already in memory.
///
/// Drivers whose statement handles cannot outlive the call buffer the result
/// into `Rows`; tests build them by hand.
#[derive(Debug, Default, Clone)]
pub struct Rows {
    rows: Vec<Vec<Value>>,

    /// `None` before the first row, `rows.len()` after the last
    position: Option<usize>,
}

impl Rows {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            position: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn current(&self) -> Result<&[Value]> {
        match self.position {
            Some(position) if position < self.rows.len() => Ok(&self.rows[position]),
            Some(_) => bail!("cursor is after the last row"),
            None => bail!("cursor is before the first row"),
        }
    }
}

impl Cursor for Rows {
    fn move_to_first(&mut self) -> Result<bool> {
        self.position = Some(0);
        Ok(!self.rows.is_empty())
    }

    fn move_to_next(&mut self) -> Result<bool> {
        let next = match self.position {
            None => 0,
            Some(position) => (position + 1).min(self.rows.len()),
        };
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn is_before_first(&self) -> bool {
        self.position.is_none()
    }

    fn is_after_last(&self) -> bool {
        matches!(self.position, Some(position) if position >= self.rows.len())
    }

    fn row_ordinal(&self) -> usize {
        self.position.unwrap_or(0)
    }

    fn column_value(&self, index: usize) -> Result<Value> {
        let row = self.current()?;
        match row.get(index) {
            Some(value) => Ok(value.clone()),
            None => bail!(
                "column index {index} out of range; row {} has {} columns",
                self.row_ordinal(),
                row.len()
            ),
        }
    }
}

impl From<Vec<Vec<Value>>> for Rows {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::new(rows)
    }
}
