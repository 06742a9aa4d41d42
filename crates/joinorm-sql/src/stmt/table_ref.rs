use super::Join;

/// One occurrence of a table; `alias` equals `name` when not aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }

    pub fn is_aliased(&self) -> bool {
        self.name != self.alias
    }
}

/// The `FROM` clause: a root table followed by its joins in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWithJoins {
    pub relation: TableRef,
    pub joins: Vec<Join>,
}
