use crate::node::TableNode;

use joinorm_core::{Error, Result};
use joinorm_sql::stmt::{self as sql, ColumnRef, TableRef};

use std::fmt;

/// The join condition connecting a nested child to its parent.
///
/// Registered on the parent with [`Table::join`](crate::Table::join), keyed by
/// the child's data name.
pub struct Join {
    kind: JoinKind,
    left: bool,
}

enum JoinKind {
    /// The child's columns reference the parent's id columns
    OnId(Vec<String>),

    /// The parent's columns reference the child's id columns
    OnRef(Vec<String>),

    Custom(Box<dyn Fn(&JoinSite<'_>) -> String>),
}

/// What a custom join fragment is asked to connect.
#[derive(Debug, Clone, Copy)]
pub struct JoinSite<'a> {
    /// Name qualifying the parent's columns
    pub parent: &'a str,

    /// Physical table name of the child
    pub table: &'a str,

    /// Name qualifying the child's columns
    pub alias: &'a str,
}

impl Join {
    /// `JOIN child ON parent.id_1 = child.ref_1 AND ...`
    pub fn on_id<I>(references: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            kind: JoinKind::OnId(references.into_iter().map(Into::into).collect()),
            left: false,
        }
    }

    /// `JOIN child ON parent.ref_1 = child.id_1 AND ...`
    pub fn on_ref<I>(references: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            kind: JoinKind::OnRef(references.into_iter().map(Into::into).collect()),
            left: false,
        }
    }

    /// A hand-written join fragment, emitted verbatim.
    pub fn custom(fragment: impl Fn(&JoinSite<'_>) -> String + 'static) -> Self {
        Self {
            kind: JoinKind::Custom(Box::new(fragment)),
            left: false,
        }
    }

    /// Keeps parent rows that have no matching child. Ignored by custom
    /// fragments.
    pub fn left(mut self) -> Self {
        self.left = true;
        self
    }

    pub fn is_left(&self) -> bool {
        self.left
    }

    pub(crate) fn resolve(&self, parent: &dyn TableNode, child: &dyn TableNode) -> Result<sql::Join> {
        let (parent_columns, child_columns) = match &self.kind {
            JoinKind::OnId(references) => {
                check_arity(parent, child, &parent.id_columns(), references)?;
                (parent.id_columns(), references.iter().map(String::as_str).collect())
            }
            JoinKind::OnRef(references) => {
                check_arity(parent, child, &child.id_columns(), references)?;
                (references.iter().map(String::as_str).collect(), child.id_columns())
            }
            JoinKind::Custom(fragment) => {
                return Ok(sql::Join::Raw(fragment(&JoinSite {
                    parent: parent.data_name(),
                    table: child.table_name(),
                    alias: child.data_name(),
                })));
            }
        };

        let on = parent_columns
            .into_iter()
            .zip(child_columns)
            .map(|(lhs, rhs)| {
                (
                    ColumnRef::new(parent.data_name(), lhs),
                    ColumnRef::new(child.data_name(), rhs),
                )
            })
            .collect();

        Ok(sql::Join::On {
            left: self.left,
            table: TableRef::new(child.table_name(), child.data_name()),
            on,
        })
    }
}

fn check_arity(
    parent: &dyn TableNode,
    child: &dyn TableNode,
    ids: &[&str],
    references: &[String],
) -> Result<()> {
    if ids.len() == references.len() {
        return Ok(());
    }

    Err(Error::configuration(format!(
        "join from `{}` to `{}` references {} column(s) but the id has {}",
        parent.data_name(),
        child.data_name(),
        references.len(),
        ids.len()
    )))
}

impl fmt::Debug for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Join");
        match &self.kind {
            JoinKind::OnId(references) => s.field("on_id", references),
            JoinKind::OnRef(references) => s.field("on_ref", references),
            JoinKind::Custom(_) => s.field("custom", &".."),
        };
        s.field("left", &self.left).finish()
    }
}
