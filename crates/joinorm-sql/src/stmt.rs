mod column_ref;
pub use column_ref::ColumnRef;

mod join;
pub use join::Join;

mod select;
pub use select::{FilterGroup, Select};

mod table_ref;
pub use table_ref::{TableRef, TableWithJoins};

use joinorm_core::stmt::{DeleteRecord, Query, WriteRecord};

/// A complete statement, as sent to the store.
#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Query(&'a Query),
    Insert(&'a WriteRecord),
    Delete(&'a DeleteRecord),
}

impl<'a> From<&'a Query> for Statement<'a> {
    fn from(value: &'a Query) -> Self {
        Statement::Query(value)
    }
}

impl<'a> From<&'a WriteRecord> for Statement<'a> {
    fn from(value: &'a WriteRecord) -> Self {
        Statement::Insert(value)
    }
}

impl<'a> From<&'a DeleteRecord> for Statement<'a> {
    fn from(value: &'a DeleteRecord) -> Self {
        Statement::Delete(value)
    }
}
