use crate::{node::TableNode, Model, Table};

use joinorm_core::{stmt::Query, Error, Result};
use joinorm_sql::{
    stmt::{ColumnRef, FilterGroup, Select, TableRef, TableWithJoins},
    Serializer,
};
use std::collections::HashSet;
use tracing::debug;

/// Derives the flattened-join query text for a configured tree.
///
/// The projection lists every node's columns in preorder, own columns first,
/// which is the order rows are decoded in. `ORDER BY` lists every node's id
/// columns in the same order; materializing a cursor that is not sorted
/// that way groups rows incorrectly.
pub fn build_query<M: Model>(table: &Table<M>) -> Result<Query> {
    let select = build_select(table)?;
    let query = Serializer::sqlite().query(&select);

    debug!(
        table = table.table_name(),
        columns = query.projection.len(),
        from = %query.from,
        filter = %query.filter,
        "built query"
    );

    Ok(query)
}

pub(crate) fn build_select(root: &dyn TableNode) -> Result<Select> {
    validate(root)?;

    let mut select = Select {
        projection: vec![],
        from: TableWithJoins {
            relation: TableRef::new(root.table_name(), root.data_name()),
            joins: vec![],
        },
        filter: vec![],
        order_by: vec![],
    };

    collect(root, &mut select)?;
    Ok(select)
}

/// Checks that a tree can be queried: every node has an id, no two nodes
/// share a data name, and every child has a join registered on its parent.
pub(crate) fn validate(root: &dyn TableNode) -> Result<()> {
    let mut seen = HashSet::new();
    validate_node(root, &mut seen)
}

fn validate_node<'a>(node: &'a dyn TableNode, seen: &mut HashSet<&'a str>) -> Result<()> {
    if node.id_count() == 0 {
        return Err(Error::configuration(format!(
            "`{}` (table `{}`) has no id columns declared",
            node.data_name(),
            node.table_name()
        )));
    }

    if !seen.insert(node.data_name()) {
        return Err(Error::configuration(format!(
            "`{}` qualifies more than one table occurrence; alias one of them",
            node.data_name()
        )));
    }

    for child in node.children() {
        if node.join_for(child.data_name()).is_none() {
            return Err(Error::configuration(format!(
                "no join registered on `{}` for nested `{}`",
                node.data_name(),
                child.data_name()
            )));
        }

        validate_node(child, seen)?;
    }

    Ok(())
}

fn collect(node: &dyn TableNode, select: &mut Select) -> Result<()> {
    let qualifier = node.data_name();

    select.projection.extend(
        node.columns()
            .into_iter()
            .map(|column| ColumnRef::new(qualifier, column)),
    );

    select.order_by.extend(
        node.id_columns()
            .into_iter()
            .map(|column| ColumnRef::new(qualifier, column)),
    );

    select.filter.push(FilterGroup {
        qualifier: qualifier.to_string(),
        predicates: node.filters().to_vec(),
    });

    for child in node.children() {
        // Checked by `validate`
        let Some(join) = node.join_for(child.data_name()) else {
            continue;
        };

        select.from.joins.push(join.resolve(node, child)?);
        collect(child, select)?;
    }

    Ok(())
}
