use joinorm_core::{
    driver::Cursor,
    err,
    stmt::{Kind, Primitive, Value},
    DecodeContext, Error, Result,
};

type Setter<M> = Box<dyn Fn(&mut M, Value) -> Result<()>>;

/// One primitive column of a node and how to store it on the model.
pub struct Field<M> {
    kind: Kind,
    column: String,
    setter: Setter<M>,
}

impl<M> Field<M> {
    /// A column whose kind is taken from the Rust type the setter accepts.
    pub fn new<T, F>(column: impl Into<String>, setter: F) -> Self
    where
        T: Primitive,
        F: Fn(&mut M, T) + 'static,
    {
        Self {
            kind: T::KIND,
            column: column.into(),
            setter: Box::new(move |target, value| {
                setter(target, T::load(value)?);
                Ok(())
            }),
        }
    }

    /// A column of an explicit kind, handed to the setter as a raw value.
    pub fn untyped<F>(kind: Kind, column: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut M, Value) -> Result<()> + 'static,
    {
        Self {
            kind,
            column: column.into(),
            setter: Box::new(setter),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Reads column `index` of the current row into `target`.
    pub(crate) fn decode(
        &self,
        cursor: &dyn Cursor,
        index: usize,
        target: &mut M,
        location: Location<'_>,
    ) -> Result<()> {
        let row = cursor.row_ordinal();
        let value = self.kind.coerce(cursor.column_value(index)?).map_err(|found| {
            Error::decode(DecodeContext {
                table: location.table.to_string(),
                alias: location.alias.to_string(),
                column: self.column.clone(),
                row,
                expected: self.kind,
                found,
            })
        })?;

        (self.setter)(target, value).map_err(|cause| {
            cause.context(err!(
                "setting `{}.{}` from row {row}",
                location.alias,
                self.column
            ))
        })
    }
}

impl<M> core::fmt::Debug for Field<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("column", &self.column)
            .finish()
    }
}

/// Names a node in error messages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location<'a> {
    pub(crate) table: &'a str,
    pub(crate) alias: &'a str,
}
