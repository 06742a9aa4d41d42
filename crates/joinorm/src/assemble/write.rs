use crate::{Model, Table};

use joinorm_core::{stmt::WriteRecord, Result};
use tracing::debug;

/// Builds the records writing every object staged on `table`.
///
/// Each object contributes one record per node it touches. A nested child's
/// record comes before its parent's, so executing the list in order
/// satisfies foreign keys.
pub fn assemble_writes<M: Model>(table: &Table<M>) -> Result<Vec<WriteRecord>> {
    let mut records = vec![];

    for obj in table.pending() {
        table.assemble_record(obj, &mut records)?;
    }

    debug!(
        table = table.table_name(),
        objects = table.pending().len(),
        records = records.len(),
        "assembled writes"
    );

    Ok(records)
}
