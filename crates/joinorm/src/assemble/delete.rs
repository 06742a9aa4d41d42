use crate::{node::TableNode, Model, Table};

use joinorm_core::{stmt::DeleteRecord, Error, Result};
use tracing::debug;

/// Builds one record per id registered for deletion on `table` and its
/// nested children, in tree preorder.
///
/// Filters use the physical id column names, unqualified: `a = ? AND b = ?`.
pub fn assemble_deletes<M: Model>(table: &Table<M>) -> Result<Vec<DeleteRecord>> {
    let mut records = vec![];
    collect(table, &mut records)?;

    debug!(
        table = table.table_name(),
        records = records.len(),
        "assembled deletes"
    );

    Ok(records)
}

fn collect(node: &dyn TableNode, records: &mut Vec<DeleteRecord>) -> Result<()> {
    let ids = node.id_columns();
    let filter = ids
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(" AND ");

    for id in node.delete_ids() {
        if id.len() != ids.len() || ids.is_empty() {
            return Err(Error::configuration(format!(
                "delete id for `{}` has {} value(s) but the table has {} id column(s)",
                node.data_name(),
                id.len(),
                ids.len()
            )));
        }

        records.push(DeleteRecord {
            table: node.table_name().to_string(),
            filter: filter.clone(),
            args: id.values().to_vec(),
        });
    }

    for child in node.children() {
        collect(child, records)?;
    }

    Ok(())
}
