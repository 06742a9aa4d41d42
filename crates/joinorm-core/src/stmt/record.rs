use super::Value;

use indexmap::IndexMap;

/// Column name to value, in binding order.
pub type ColumnMap = IndexMap<String, Value>;

/// One row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord {
    /// Physical table name
    pub table: String,

    pub values: ColumnMap,
}

impl WriteRecord {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            values: ColumnMap::new(),
        }
    }

    /// Sets `column`, replacing an earlier value for it in place.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

/// Rows to delete from one table, identified by a parameterized filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRecord {
    /// Physical table name
    pub table: String,

    /// Filter text with `?` placeholders, e.g. `a = ? AND b = ?`
    pub filter: String,

    /// Placeholder arguments, in order
    pub args: Vec<Value>,
}
