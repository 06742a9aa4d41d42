use super::Value;
use crate::{driver::Cursor, Result};

use std::cmp::Ordering;

/// Ordered id-column values of one row, used to detect group boundaries.
///
/// Equality is positional and all-or-nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompositeKey {
    values: Vec<Value>,
}

impl CompositeKey {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Reads `len` consecutive columns starting at `offset` from the current
    /// cursor row.
    pub fn read(cursor: &(impl Cursor + ?Sized), offset: usize, len: usize) -> Result<Self> {
        let values = (offset..offset + len)
            .map(|index| cursor.column_value(index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { values })
    }

    /// Returns `true` when the cursor row holds this key at `offset`.
    pub fn matches(&self, cursor: &(impl Cursor + ?Sized), offset: usize) -> Result<bool> {
        for (index, value) in self.values.iter().enumerate() {
            if cursor.column_value(offset + index)? != *value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns `true` when every component is `NULL`, which is how an
    /// unmatched `LEFT JOIN` shows up in a row.
    pub fn is_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialOrd for CompositeKey {
    /// Lexicographic order. Unordered as soon as one pair of components is.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.values.len() != other.values.len() {
            return None;
        }

        for (a, b) in self.values.iter().zip(&other.values) {
            match a.partial_cmp(b)? {
                Ordering::Equal => continue,
                ordering => return Some(ordering),
            }
        }

        Some(Ordering::Equal)
    }
}

impl From<Vec<Value>> for CompositeKey {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl<const N: usize, T: Into<Value>> From<[T; N]> for CompositeKey {
    fn from(values: [T; N]) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Rows;

    #[test]
    fn equality_is_positional() {
        let a = CompositeKey::from([1, 2]);
        assert_eq!(a, CompositeKey::from([1, 2]));
        assert_ne!(a, CompositeKey::from([2, 1]));
    }

    #[test]
    fn order_is_lexicographic() {
        assert!(CompositeKey::from([1, 9]) < CompositeKey::from([2, 0]));
        assert!(CompositeKey::from([2, 1]) > CompositeKey::from([2, 0]));
        let with_null = CompositeKey::new(vec![Value::I64(1), Value::Null]);
        assert_eq!(None, with_null.partial_cmp(&CompositeKey::from([1, 2])));
    }

    #[test]
    fn reads_key_from_cursor_offset() {
        let mut rows = Rows::new(vec![vec![Value::from("x"), Value::I64(4), Value::I64(5)]]);
        rows.move_to_first().unwrap();

        let key = CompositeKey::read(&rows, 1, 2).unwrap();
        assert_eq!(CompositeKey::from([4, 5]), key);
        assert!(key.matches(&rows, 1).unwrap());
        assert!(!key.matches(&rows, 0).unwrap());
    }
}
