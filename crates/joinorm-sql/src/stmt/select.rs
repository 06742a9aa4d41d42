use super::{ColumnRef, TableWithJoins};

use joinorm_core::stmt::Where;

/// Predicates of one node, qualified with the node's alias.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    pub qualifier: String,
    pub predicates: Vec<Where>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Vec<ColumnRef>,
    pub from: TableWithJoins,

    /// Groups are `AND`ed together; empty groups are skipped
    pub filter: Vec<FilterGroup>,

    pub order_by: Vec<ColumnRef>,
}
