use super::Table;
use crate::Model;

use joinorm_core::{
    stmt::{Kind, Value, WriteRecord},
    Error, Result,
};

/// One column a node contributes to its write record.
pub(crate) enum WriteBinding<M> {
    Primitive {
        kind: Kind,
        column: String,
        get: Box<dyn Fn(&M) -> Value>,
    },

    Nested(Box<dyn NestedWrite<M>>),
}

impl<M> WriteBinding<M> {
    pub(crate) fn column(&self) -> &str {
        match self {
            WriteBinding::Primitive { column, .. } => column,
            WriteBinding::Nested(nested) => nested.column(),
        }
    }
}

/// A child object written before its parent, whose value ends up in one of
/// the parent's columns.
pub(crate) trait NestedWrite<P> {
    /// The parent's foreign-key column.
    fn column(&self) -> &str;

    /// Appends the child's records to `out` and returns the foreign-key value.
    fn assemble(&self, parent: &P, out: &mut Vec<WriteRecord>) -> Result<Value>;
}

pub(crate) struct ChildWrite<P, C: Model> {
    pub(crate) table: Table<C>,
    pub(crate) column: String,
    pub(crate) child_value: Box<dyn Fn(&C) -> Value>,
    pub(crate) accessor: Box<dyn Fn(&P) -> Option<&C>>,
}

impl<P, C: Model> NestedWrite<P> for ChildWrite<P, C> {
    fn column(&self) -> &str {
        &self.column
    }

    fn assemble(&self, parent: &P, out: &mut Vec<WriteRecord>) -> Result<Value> {
        let Some(child) = (self.accessor)(parent) else {
            return Ok(Value::Null);
        };

        self.table.assemble_record(child, out)?;
        Ok((self.child_value)(child))
    }
}

impl<M: Model> Table<M> {
    /// Builds the record for `obj`, preceded by the records of its nested
    /// children.
    pub(crate) fn assemble_record(&self, obj: &M, out: &mut Vec<WriteRecord>) -> Result<()> {
        let mut record = WriteRecord::new(self.table_name());

        for binding in &self.writes {
            match binding {
                WriteBinding::Primitive { kind, column, get } => {
                    let value = kind.coerce(get(obj)).map_err(|found| {
                        Error::access(format!(
                            "`{}.{column}` is bound as {kind:?} but the accessor produced {}",
                            self.data_name(),
                            found.type_name()
                        ))
                    })?;
                    record.set(column.as_str(), value);
                }
                WriteBinding::Nested(nested) => {
                    let value = nested.assemble(obj, out)?;
                    record.set(nested.column(), value);
                }
            }
        }

        out.push(record);
        Ok(())
    }
}
