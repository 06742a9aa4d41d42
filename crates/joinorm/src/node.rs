use crate::{
    table::{Join, Relation},
    Model, Table,
};

use joinorm_core::{
    driver::Cursor,
    stmt::{CompositeKey, Where},
    Result,
};

/// A node of a table tree, with the model type erased.
///
/// Query building, delete assembly and the row walk of the materializer all
/// go through this trait, so they can descend into children of any model.
pub(crate) trait TableNode {
    fn table_name(&self) -> &str;

    fn data_name(&self) -> &str;

    fn id_columns(&self) -> Vec<&str>;

    fn id_count(&self) -> usize;

    /// Own primitive columns in decode order, ids first.
    fn columns(&self) -> Vec<&str>;

    fn filters(&self) -> &[Where];

    fn join_for(&self, data_name: &str) -> Option<&Join>;

    fn children(&self) -> Vec<&dyn TableNode>;

    fn delete_ids(&self) -> &[CompositeKey];

    /// Forgets the delete ids of this node and its descendants.
    fn clear_delete_ids(&mut self);

    /// Columns this node and its descendants occupy in a row.
    fn span(&self) -> usize;

    fn key(&self) -> Option<&CompositeKey>;

    fn set_key(&mut self, key: CompositeKey);

    fn is_frozen(&self) -> bool;

    /// Feeds the current row to this node, whose columns start at `offset`.
    /// Returns `true` if a unit boundary was crossed anywhere below it.
    fn ingest(&mut self, cursor: &dyn Cursor, offset: usize) -> Result<bool>;

    fn close_unit(&mut self);

    fn restart_unit(&mut self);

    fn freeze(&mut self, row: usize);

    fn skip_count(&self) -> usize;

    fn reset(&mut self);
}

impl<M: Model> TableNode for Table<M> {
    fn table_name(&self) -> &str {
        Table::table_name(self)
    }

    fn data_name(&self) -> &str {
        Table::data_name(self)
    }

    fn id_columns(&self) -> Vec<&str> {
        self.ids.iter().map(|field| field.column()).collect()
    }

    fn id_count(&self) -> usize {
        self.ids.len()
    }

    fn columns(&self) -> Vec<&str> {
        self.ids
            .iter()
            .chain(&self.fields)
            .map(|field| field.column())
            .collect()
    }

    fn filters(&self) -> &[Where] {
        &self.filters
    }

    fn join_for(&self, data_name: &str) -> Option<&Join> {
        self.joins.get(data_name)
    }

    fn children(&self) -> Vec<&dyn TableNode> {
        self.children.iter().map(|child| child.node()).collect()
    }

    fn delete_ids(&self) -> &[CompositeKey] {
        Table::delete_ids(self)
    }

    fn clear_delete_ids(&mut self) {
        Table::clear_delete_ids(self)
    }

    fn span(&self) -> usize {
        Table::span(self)
    }

    fn key(&self) -> Option<&CompositeKey> {
        self.state.key.as_ref()
    }

    fn set_key(&mut self, key: CompositeKey) {
        self.state.key = Some(key);
    }

    fn is_frozen(&self) -> bool {
        Table::is_frozen(self)
    }

    fn ingest(&mut self, cursor: &dyn Cursor, offset: usize) -> Result<bool> {
        Table::ingest(self, cursor, offset)
    }

    fn close_unit(&mut self) {
        Table::close_unit(self)
    }

    fn restart_unit(&mut self) {
        Table::restart_unit(self)
    }

    fn freeze(&mut self, row: usize) {
        Table::freeze(self, row)
    }

    fn skip_count(&self) -> usize {
        Table::skip_count(self)
    }

    fn reset(&mut self) {
        Table::reset(self)
    }
}

/// A nested child, as held by its parent.
pub(crate) trait Child<P> {
    fn node(&self) -> &dyn TableNode;

    fn node_mut(&mut self) -> &mut dyn TableNode;

    /// Moves the values collected for the parent's closing unit onto it.
    fn assign(&mut self, parent: &mut P);
}

pub(crate) struct Nested<P, C> {
    pub(crate) table: Table<C>,
    pub(crate) relation: Relation<P, C>,
}

impl<P, C: Model> Child<P> for Nested<P, C> {
    fn node(&self) -> &dyn TableNode {
        &self.table
    }

    fn node_mut(&mut self) -> &mut dyn TableNode {
        &mut self.table
    }

    fn assign(&mut self, parent: &mut P) {
        let values = std::mem::take(&mut self.table.state.results);
        self.relation.store(parent, values);
    }
}
