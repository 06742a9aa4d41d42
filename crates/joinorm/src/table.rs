mod field;
pub use field::Field;
pub(crate) use field::Location;

mod join;
pub use join::{Join, JoinSite};

mod relation;
pub use relation::Relation;

pub(crate) mod state;
use state::State;

pub(crate) mod write;
use write::{ChildWrite, WriteBinding};

use crate::{
    node::{Child, Nested},
    Model,
};

use indexmap::IndexMap;
use joinorm_core::{
    stmt::{CompositeKey, Kind, Primitive, Query, Value, Where},
    Result,
};
use std::cell::Cell;

/// One table occurrence of a query tree, with everything configured on it.
///
/// A table is configured once and then used for any number of queries,
/// writes and deletes. It also carries the parse state of the query in
/// progress, which is why queries borrow it mutably.
pub struct Table<M> {
    alias: Option<String>,

    pub(crate) ids: Vec<Field<M>>,
    pub(crate) fields: Vec<Field<M>>,
    pub(crate) children: Vec<Box<dyn Child<M>>>,

    /// Join conditions for nested children, by child data name
    pub(crate) joins: IndexMap<String, Join>,

    pub(crate) filters: Vec<Where>,

    pub(crate) writes: Vec<WriteBinding<M>>,
    delete_ids: Vec<CompositeKey>,
    pending: Vec<M>,

    pub(crate) state: State<M>,

    /// Memoized column span; cleared whenever fields or children change
    span: Cell<Option<usize>>,
}

impl<M: Model> Table<M> {
    pub fn new() -> Self {
        Self {
            alias: None,
            ids: Vec::new(),
            fields: Vec::new(),
            children: Vec::new(),
            joins: IndexMap::new(),
            filters: Vec::new(),
            writes: Vec::new(),
            delete_ids: Vec::new(),
            pending: Vec::new(),
            state: State::default(),
            span: Cell::new(None),
        }
    }

    pub fn table_name(&self) -> &str {
        M::TABLE_NAME
    }

    /// The name qualifying this node's columns: its alias, or the table name.
    pub fn data_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(M::TABLE_NAME)
    }

    /// Qualifies this node with `name` instead of its table name. Needed when
    /// the same table occurs more than once in a tree.
    pub fn alias(&mut self, name: impl Into<String>) -> &mut Self {
        self.alias = Some(name.into());
        self
    }

    /// Sets the id columns. They take the lowest offsets of the node's
    /// columns, in the given order. Declaring again replaces the previous
    /// id.
    pub fn declare_id(&mut self, ids: impl IntoIterator<Item = Field<M>>) -> &mut Self {
        self.ids = ids.into_iter().collect();
        self.span.set(None);
        self
    }

    pub fn has_id(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Selects a column, stored on the model by `setter`.
    pub fn select<T, F>(&mut self, column: impl Into<String>, setter: F) -> &mut Self
    where
        T: Primitive,
        F: Fn(&mut M, T) + 'static,
    {
        self.select_field(Field::new(column, setter))
    }

    /// Selects a column of an explicit kind.
    pub fn select_primitive<F>(&mut self, kind: Kind, column: impl Into<String>, setter: F) -> &mut Self
    where
        F: Fn(&mut M, Value) -> Result<()> + 'static,
    {
        self.select_field(Field::untyped(kind, column, setter))
    }

    /// Selects a column. Selecting the same column again replaces it in place.
    pub fn select_field(&mut self, field: Field<M>) -> &mut Self {
        match self
            .fields
            .iter()
            .position(|existing| existing.column() == field.column())
        {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self.span.set(None);
        self
    }

    /// Nests `child` under this node. Selecting a child with the same data
    /// name again replaces it in place.
    ///
    /// Declares this node's id through [`Model::declare_id`] if it has none
    /// yet.
    pub fn select_nested<C: Model>(&mut self, child: Table<C>, relation: Relation<M, C>) -> &mut Self {
        self.ensure_id();

        let data_name = child.data_name().to_string();
        let child: Box<dyn Child<M>> = Box::new(Nested {
            table: child,
            relation,
        });

        match self
            .children
            .iter()
            .position(|existing| existing.node().data_name() == data_name)
        {
            Some(index) => self.children[index] = child,
            None => self.children.push(child),
        }
        self.span.set(None);
        self
    }

    /// Nests `child` under this node, qualified with `alias`.
    pub fn select_nested_as<C: Model>(
        &mut self,
        mut child: Table<C>,
        alias: impl Into<String>,
        relation: Relation<M, C>,
    ) -> &mut Self {
        child.alias(alias);
        self.select_nested(child, relation)
    }

    fn ensure_id(&mut self) {
        if self.ids.is_empty() {
            M::declare_id(self);
        }
    }

    /// Registers how the nested child named `data_name` joins this node.
    pub fn join(&mut self, data_name: impl Into<String>, join: Join) -> &mut Self {
        self.joins.insert(data_name.into(), join);
        self
    }

    pub fn add_where(&mut self, clause: Where) -> &mut Self {
        self.filters.push(clause);
        self
    }

    /// Writes the value returned by `get` into `column`.
    pub fn bind_write<T, F>(&mut self, column: impl Into<String>, get: F) -> &mut Self
    where
        T: Primitive,
        F: Fn(&M) -> T + 'static,
    {
        self.bind_write_primitive(T::KIND, column, move |obj| get(obj).into_value())
    }

    /// Writes the value returned by `get` into `column`, checked against
    /// `kind` when the record is assembled.
    pub fn bind_write_primitive<F>(&mut self, kind: Kind, column: impl Into<String>, get: F) -> &mut Self
    where
        F: Fn(&M) -> Value + 'static,
    {
        self.bind(WriteBinding::Primitive {
            kind,
            column: column.into(),
            get: Box::new(get),
        })
    }

    /// Always writes `NULL` into `column`.
    pub fn bind_write_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.bind_write_primitive(Kind::Null, column, |_| Value::Null)
    }

    /// Writes the child returned by `accessor` through `child` first, then
    /// stores `child_value` of it (usually its id) in `fk_column`. A missing
    /// child writes `NULL`.
    pub fn bind_write_nested<C, V, A>(
        &mut self,
        child: Table<C>,
        fk_column: impl Into<String>,
        child_value: V,
        accessor: A,
    ) -> &mut Self
    where
        C: Model,
        V: Fn(&C) -> Value + 'static,
        A: Fn(&M) -> Option<&C> + 'static,
    {
        self.bind(WriteBinding::Nested(Box::new(ChildWrite {
            table: child,
            column: fk_column.into(),
            child_value: Box::new(child_value),
            accessor: Box::new(accessor),
        })))
    }

    fn bind(&mut self, binding: WriteBinding<M>) -> &mut Self {
        match self
            .writes
            .iter()
            .position(|existing| existing.column() == binding.column())
        {
            Some(index) => self.writes[index] = binding,
            None => self.writes.push(binding),
        }
        self
    }

    /// Marks the row with this id for deletion by the next delete batch.
    pub fn register_delete_id(&mut self, id: impl Into<CompositeKey>) -> &mut Self {
        self.delete_ids.push(id.into());
        self
    }

    pub fn delete_ids(&self) -> &[CompositeKey] {
        &self.delete_ids
    }

    pub(crate) fn clear_delete_ids(&mut self) {
        self.delete_ids.clear();
        for child in &mut self.children {
            child.node_mut().clear_delete_ids();
        }
    }

    /// Stages `obj` for the next write batch.
    pub fn write(&mut self, obj: M) -> &mut Self {
        self.pending.push(obj);
        self
    }

    pub fn pending(&self) -> &[M] {
        &self.pending
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Columns this node and its descendants occupy in a row.
    pub fn span(&self) -> usize {
        if let Some(span) = self.span.get() {
            return span;
        }

        let span = self.ids.len()
            + self.fields.len()
            + self
                .children
                .iter()
                .map(|child| child.node().span())
                .sum::<usize>();
        self.span.set(Some(span));
        span
    }

    /// Query text for this tree.
    pub fn build_query(&self) -> Result<Query> {
        crate::query::build_query(self)
    }

    pub fn is_frozen(&self) -> bool {
        self.state.frozen
    }

    /// Rows the node took to resolve within its parent's current unit, or 0
    /// when it is not frozen.
    pub fn frozen_rows(&self) -> usize {
        self.state.frozen_rows
    }

    /// Clears the parse state of this node and all of its descendants.
    pub fn reset(&mut self) {
        self.state = State::default();
        for child in &mut self.children {
            child.node_mut().reset();
        }
    }

    pub(crate) fn location(&self) -> Location<'_> {
        Location {
            table: self.table_name(),
            alias: self.data_name(),
        }
    }
}

impl<M: Model> Default for Table<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> core::fmt::Debug for Table<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("table", &self.table_name())
            .field("alias", &self.data_name())
            .field("ids", &self.ids)
            .field("fields", &self.fields)
            .field(
                "children",
                &self
                    .children
                    .iter()
                    .map(|child| child.node().data_name())
                    .collect::<Vec<_>>(),
            )
            .field("joins", &self.joins)
            .field("filters", &self.filters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TableNode;

    #[derive(Debug, Default)]
    struct User {
        id: i64,
        name: String,
        team: Option<Box<Team>>,
    }

    #[derive(Debug, Default)]
    struct Team {
        id: i64,
        title: String,
    }

    impl Model for User {
        const TABLE_NAME: &'static str = "users";

        fn declare_id(table: &mut Table<Self>) {
            table.declare_id([Field::new("id", |user: &mut User, id: i64| user.id = id)]);
        }
    }

    impl Model for Team {
        const TABLE_NAME: &'static str = "teams";

        fn declare_id(table: &mut Table<Self>) {
            table.declare_id([Field::new("id", |team: &mut Team, id: i64| team.id = id)]);
        }
    }

    fn teams() -> Table<Team> {
        let mut teams = Table::new();
        Team::declare_id(&mut teams);
        teams.select("title", |team: &mut Team, title: String| team.title = title);
        teams
    }

    fn team_relation() -> Relation<User, Team> {
        Relation::one(|user: &mut User, team: Option<Team>| user.team = team.map(Box::new))
    }

    fn ignored() -> Relation<User, Team> {
        Relation::one(|_, _| {})
    }

    #[test]
    fn data_name_defaults_to_table_name() {
        let mut users = Table::<User>::new();
        assert_eq!("users", users.data_name());
        users.alias("author");
        assert_eq!("author", users.data_name());
        assert_eq!("users", users.table_name());
    }

    #[test]
    fn reselecting_a_column_keeps_its_position() {
        let mut users = Table::<User>::new();
        users
            .select("name", |user: &mut User, name: String| user.name = name)
            .select("email", |_: &mut User, _: Option<String>| {})
            .select("name", |user: &mut User, name: String| user.name = name);

        assert_eq!(vec!["name", "email"], TableNode::columns(&users));
    }

    #[test]
    fn nesting_declares_the_parent_id() {
        let mut users = Table::<User>::new();
        assert!(!users.has_id());

        users.select_nested(teams(), team_relation());
        assert!(users.has_id());
        assert_eq!(vec!["id"], TableNode::id_columns(&users));
    }

    #[test]
    fn span_covers_ids_fields_and_children() {
        let mut users = Table::<User>::new();
        users.select("name", |user: &mut User, name: String| user.name = name);
        assert_eq!(1, users.span());

        users.select_nested(teams(), team_relation());
        assert_eq!(4, users.span());

        users.select_nested_as(teams(), "backup", ignored());
        assert_eq!(6, users.span());

        // Same data name again replaces the child
        users.select_nested_as(teams(), "backup", ignored());
        assert_eq!(6, users.span());
    }

    #[test]
    fn rebinding_a_write_column_replaces_it() {
        let mut users = Table::<User>::new();
        users
            .bind_write("id", |user: &User| user.id)
            .bind_write("name", |user: &User| user.name.clone())
            .bind_write_null("name");

        let columns: Vec<_> = users.writes.iter().map(|binding| binding.column()).collect();
        assert_eq!(vec!["id", "name"], columns);
    }
}
