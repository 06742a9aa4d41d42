//! Rebuilds model trees from the rows of a flattened join.
//!
//! Rows arrive sorted by every node's id, in tree preorder. A node's unit
//! ends when its own key changes; the change closes the unit in progress and
//! the row starts the next one. Keys of one-to-many children change many
//! times within one parent unit, and siblings multiply each other's rows, so
//! every node keeps its own parse state (see [`State`]).
//!
//! Once an earlier sibling changes key, a later sibling has cycled through
//! all of its rows for the parent's unit. It is frozen: its values are kept
//! and it is skipped until the parent unit closes. The number of rows it took
//! is the period with which the rest of the parent unit repeats, which lets
//! the top-level loop step over whole periods at once.
//!
//! [`State`]: crate::table::state::State

use crate::{node::TableNode, Model, Table};

use joinorm_core::{
    driver::Cursor,
    stmt::CompositeKey,
    Error, Result,
};
use std::cmp::Ordering;
use tracing::trace;

/// Materializes up to `limit` more root units from `cursor`.
///
/// Parse state stays on `root` between calls, so a caller can page through
/// one cursor. The row that begins the next unit is left unconsumed.
pub(crate) fn next_units<M: Model>(
    root: &mut Table<M>,
    cursor: &mut dyn Cursor,
    limit: Option<usize>,
) -> Result<Vec<M>> {
    if cursor.is_before_first() {
        cursor.move_to_first()?;
    }

    let width = root.ids.len();

    loop {
        if limit.is_some_and(|limit| root.state.results.len() >= limit) {
            break;
        }

        if cursor.is_after_last() {
            root.close_unit();
            break;
        }

        let row = cursor.row_ordinal();
        let same = match &root.state.key {
            Some(previous) => previous.matches(&*cursor, 0)?,
            None => false,
        };

        if !same {
            let key = CompositeKey::read(&*cursor, 0, width)?;

            if let Some(previous) = &root.state.key {
                check_order(&*root, previous, &key, row)?;
                root.close_unit();
                root.restart_unit();
                continue;
            }

            root.state.key = Some(key);
        }

        root.ingest(&*cursor, 0)?;

        let skip = root.skip_count();
        if skip > 1 {
            trace!(row, skip, "skipping rows of resolved subtrees");
        }

        for _ in 0..skip {
            if !cursor.move_to_next()? {
                break;
            }
        }
    }

    let count = limit
        .unwrap_or(usize::MAX)
        .min(root.state.results.len());
    Ok(root.state.results.drain(..count).collect())
}

impl<M: Model> Table<M> {
    pub(crate) fn ingest(&mut self, cursor: &dyn Cursor, offset: usize) -> Result<bool> {
        if self.state.frozen {
            return Ok(false);
        }

        let row = cursor.row_ordinal();
        self.state.first_row.get_or_insert(row);

        // Primitives repeat on every row of the unit
        if self.state.current.is_none() {
            let mut obj = M::default();
            let location = self.location();

            for (index, field) in self.ids.iter().chain(&self.fields).enumerate() {
                field.decode(cursor, offset + index, &mut obj, location)?;
            }

            self.state.current = Some(obj);
        }

        let mut changed = false;
        let mut child_offset = offset + self.ids.len() + self.fields.len();

        for child in &mut self.children {
            let node = child.node_mut();
            let span = node.span();

            if !node.is_frozen() {
                if changed && node.key().is_some() {
                    node.freeze(row);
                } else {
                    changed |= ingest_child(node, cursor, child_offset, row)?;
                }
            }

            child_offset += span;
        }

        Ok(changed)
    }

    /// Closes the unit in progress, if any, into the node's results.
    pub(crate) fn close_unit(&mut self) {
        let Some(mut obj) = self.state.current.take() else {
            return;
        };

        for child in &mut self.children {
            if !child.node().is_frozen() {
                child.node_mut().close_unit();
            }

            child.assign(&mut obj);
            child.node_mut().reset();
        }

        trace!(
            table = self.table_name(),
            alias = self.data_name(),
            "unit closed"
        );
        self.state.results.push(obj);
    }

    /// Forgets the unit in progress so the next row starts a new one.
    pub(crate) fn restart_unit(&mut self) {
        self.state.restart();
        for child in &mut self.children {
            child.node_mut().reset();
        }
    }

    pub(crate) fn freeze(&mut self, row: usize) {
        self.close_unit();
        self.state.frozen = true;
        self.state.frozen_rows = row.saturating_sub(self.state.first_row.unwrap_or(row));

        trace!(
            table = self.table_name(),
            alias = self.data_name(),
            frozen_rows = self.state.frozen_rows,
            "subtree frozen"
        );
    }

    /// Rows the top-level loop may advance after the current one.
    pub(crate) fn skip_count(&self) -> usize {
        if self.state.frozen {
            return self.state.frozen_rows.max(1);
        }

        self.children
            .iter()
            .map(|child| child.node().skip_count())
            .fold(1, usize::max)
    }
}

/// Compares a child's key with the current row and feeds the row to it.
fn ingest_child(
    node: &mut dyn TableNode,
    cursor: &dyn Cursor,
    offset: usize,
    row: usize,
) -> Result<bool> {
    let same = match node.key() {
        Some(previous) => previous.matches(cursor, offset)?,
        None => false,
    };

    let mut boundary = false;
    if !same {
        let key = CompositeKey::read(cursor, offset, node.id_count())?;

        // No joined row
        if key.is_null() {
            return Ok(false);
        }

        if let Some(previous) = node.key() {
            check_order(&*node, previous, &key, row)?;
            node.close_unit();
            node.restart_unit();
            boundary = true;
        }

        node.set_key(key);
    }

    Ok(node.ingest(cursor, offset)? || boundary)
}

fn check_order(
    node: &dyn TableNode,
    previous: &CompositeKey,
    next: &CompositeKey,
    row: usize,
) -> Result<()> {
    if next.partial_cmp(previous) != Some(Ordering::Less) {
        return Ok(());
    }

    Err(Error::precondition(format!(
        "key of `{}` (table `{}`) went backward at row {row}: {:?} after {:?}; \
         rows must be ordered by every id column in tree order",
        node.data_name(),
        node.table_name(),
        next.values(),
        previous.values()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Join, Relation};
    use joinorm_core::{driver::Rows, stmt::Value};

    #[derive(Debug, Default)]
    struct Post {
        id: i64,
        comments: Vec<Node>,
        tags: Vec<Node>,
        author: Option<Node>,
    }

    #[derive(Debug, Default)]
    struct Node {
        id: i64,
        child: Option<Box<Node>>,
    }

    impl Model for Post {
        const TABLE_NAME: &'static str = "posts";

        fn declare_id(table: &mut Table<Self>) {
            table.declare_id([Field::new("id", |post: &mut Post, id: i64| post.id = id)]);
        }
    }

    impl Model for Node {
        const TABLE_NAME: &'static str = "nodes";

        fn declare_id(table: &mut Table<Self>) {
            table.declare_id([Field::new("id", |node: &mut Node, id: i64| node.id = id)]);
        }
    }

    fn nodes(alias: &str) -> Table<Node> {
        let mut table = Table::new();
        Node::declare_id(&mut table);
        table.alias(alias);
        table
    }

    fn rows(rows: &[&[i64]]) -> Rows {
        let rows = rows
            .iter()
            .map(|row| row.iter().copied().map(Value::from).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut rows = Rows::new(rows);
        rows.move_to_first().unwrap();
        rows
    }

    fn feed(root: &mut Table<Post>, rows: &mut Rows, count: usize) {
        root.state.key = Some(CompositeKey::read(&*rows, 0, 1).unwrap());

        for _ in 0..count {
            root.ingest(&*rows, 0).unwrap();
            rows.move_to_next().unwrap();
        }
    }

    #[test]
    fn later_sibling_freezes_when_earlier_sibling_moves() {
        let mut posts = Table::<Post>::new();
        posts
            .select_nested(
                nodes("comments"),
                Relation::many(|post: &mut Post, comments: Vec<Node>| post.comments = comments),
            )
            .select_nested(
                nodes("tags"),
                Relation::many(|post: &mut Post, tags: Vec<Node>| post.tags = tags),
            )
            .join("comments", Join::on_id(["post_id"]))
            .join("tags", Join::on_id(["post_id"]));

        // Two comments times three tags
        let mut cursor = rows(&[
            &[1, 10, 100],
            &[1, 10, 101],
            &[1, 10, 102],
            &[1, 11, 100],
            &[1, 11, 101],
            &[1, 11, 102],
        ]);

        feed(&mut posts, &mut cursor, 3);
        assert!(!posts.children[1].node().is_frozen());
        assert_eq!(1, posts.skip_count());

        feed(&mut posts, &mut cursor, 1);
        let tags = posts.children[1].node();
        assert!(tags.is_frozen());
        assert_eq!(3, tags.skip_count());
        assert_eq!(3, posts.skip_count());

        posts.close_unit();
        let post = posts.state.results.pop().unwrap();
        let ids = |nodes: &[Node]| nodes.iter().map(|node| node.id).collect::<Vec<_>>();
        assert_eq!(vec![10, 11], ids(&post.comments));
        assert_eq!(vec![100, 101, 102], ids(&post.tags));

        // Closing the parent unit unfreezes the child
        assert!(!posts.children[1].node().is_frozen());
    }

    #[test]
    fn one_to_one_chain_never_freezes() {
        let mut author = nodes("author");
        author
            .select_nested(
                nodes("team"),
                Relation::one(|node: &mut Node, team: Option<Node>| node.child = team.map(Box::new)),
            )
            .join("team", Join::on_ref(["team_id"]));

        let mut posts = Table::<Post>::new();
        posts
            .select_nested(
                author,
                Relation::one(|post: &mut Post, author: Option<Node>| post.author = author),
            )
            .join("author", Join::on_ref(["author_id"]));

        let mut cursor = rows(&[&[1, 5, 9]]);
        feed(&mut posts, &mut cursor, 1);

        let team = posts.children[0].node().children()[0];
        assert!(!team.is_frozen());
        assert_eq!(1, team.skip_count());
        assert_eq!(1, posts.skip_count());

        posts.close_unit();
        let post = posts.state.results.pop().unwrap();
        let author = post.author.unwrap();
        assert_eq!(5, author.id);
        assert_eq!(9, author.child.unwrap().id);
    }
}
