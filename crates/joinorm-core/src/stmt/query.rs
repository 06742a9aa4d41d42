/// Text of a flattened-join query, split the way statement executors take it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Qualified columns, in decode order
    pub projection: Vec<String>,

    /// Root table followed by every join
    pub from: String,

    /// `WHERE` body without the keyword; empty when no node has predicates
    pub filter: String,

    /// `ORDER BY` body without the keyword
    pub order_by: String,
}

impl Query {
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }
}
