use super::{Kind, Value};
use crate::{Error, Result};

/// A Rust type that maps onto one primitive column.
///
/// [`Primitive::load`] receives a value already normalized with
/// [`Kind::coerce`], so implementations only have to reject `NULL` (unless
/// they are nullable) and pick the payload out.
pub trait Primitive: Sized {
    /// The column kind this type is read and written as.
    const KIND: Kind;

    /// Converts a coerced column value into `Self`.
    fn load(value: Value) -> Result<Self>;

    /// Converts `self` into a column value for writing.
    fn into_value(self) -> Value;
}

fn mismatch(value: &Value, to_type: &str) -> Error {
    Error::access(format!("cannot assign {} to {to_type}", value.type_name()))
}

impl Primitive for bool {
    const KIND: Kind = Kind::Bool;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            value => Err(mismatch(&value, "bool")),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Primitive for i64 {
    const KIND: Kind = Kind::Int;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            value => Err(mismatch(&value, "i64")),
        }
    }

    fn into_value(self) -> Value {
        Value::I64(self)
    }
}

impl Primitive for i32 {
    const KIND: Kind = Kind::Int;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => i32::try_from(v)
                .map_err(|_| Error::access(format!("integer {v} does not fit in i32"))),
            value => Err(mismatch(&value, "i32")),
        }
    }

    fn into_value(self) -> Value {
        Value::I64(self as i64)
    }
}

impl Primitive for f64 {
    const KIND: Kind = Kind::Double;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            value => Err(mismatch(&value, "f64")),
        }
    }

    fn into_value(self) -> Value {
        Value::F64(self)
    }
}

impl Primitive for String {
    const KIND: Kind = Kind::String;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            value => Err(mismatch(&value, "String")),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const KIND: Kind = T::KIND;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}
