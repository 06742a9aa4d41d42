use crate::Table;

/// A domain type that maps onto one table.
///
/// This is the whole contract a model has to meet: a physical table name and
/// a way to declare its id columns. Everything else is configured on the
/// [`Table`] it is queried through.
///
/// ```
/// use joinorm::{Field, Model, Table};
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for User {
///     const TABLE_NAME: &'static str = "users";
///
///     fn declare_id(table: &mut Table<Self>) {
///         table.declare_id([Field::new("id", |user: &mut User, id: i64| user.id = id)]);
///     }
/// }
/// ```
pub trait Model: Default + 'static {
    /// Physical table name.
    const TABLE_NAME: &'static str;

    /// Declares the id columns of `table`.
    ///
    /// Called by [`Table::select_nested`] when a parent is given children
    /// before its id is declared.
    fn declare_id(table: &mut Table<Self>);
}
