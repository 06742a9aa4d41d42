use super::{ColumnRef, TableRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Join {
    /// `[LEFT ]JOIN table [AS alias] ON l1 = r1 AND l2 = r2 ...`
    On {
        left: bool,
        table: TableRef,
        on: Vec<(ColumnRef, ColumnRef)>,
    },

    /// A join fragment written by hand, emitted verbatim.
    Raw(String),
}
