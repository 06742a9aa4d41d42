use super::Value;

/// The declared kind of a primitive column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Double,
    String,
    Null,
}

impl Kind {
    /// Normalizes a cursor value to this kind.
    ///
    /// `NULL` is accepted by every kind. Stores without a boolean type hand
    /// booleans back as `0`/`1` integers and may hand whole doubles back as
    /// integers, so both are widened here. Returns the value unchanged in
    /// `Err` when it does not fit.
    pub fn coerce(self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (Kind::Null, _) => Ok(Value::Null),
            (Kind::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (Kind::Bool, Value::I64(v @ (0 | 1))) => Ok(Value::Bool(v == 1)),
            (Kind::Int, Value::I64(v)) => Ok(Value::I64(v)),
            (Kind::Double, Value::F64(v)) => Ok(Value::F64(v)),
            (Kind::Double, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (Kind::String, Value::String(v)) => Ok(Value::String(v)),
            (_, value) => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_to_bool_and_double() {
        assert_eq!(Ok(Value::Bool(true)), Kind::Bool.coerce(Value::I64(1)));
        assert_eq!(Ok(Value::F64(3.0)), Kind::Double.coerce(Value::I64(3)));
    }

    #[test]
    fn mismatches_are_returned() {
        assert_eq!(Err(Value::I64(2)), Kind::Bool.coerce(Value::I64(2)));
        assert_eq!(Err(Value::from("x")), Kind::Int.coerce(Value::from("x")));
    }

    #[test]
    fn null_fits_every_kind() {
        for kind in [Kind::Bool, Kind::Int, Kind::Double, Kind::String, Kind::Null] {
            assert_eq!(Ok(Value::Null), kind.coerce(Value::Null));
        }
    }

    #[test]
    fn null_kind_discards_the_value() {
        assert_eq!(Ok(Value::Null), Kind::Null.coerce(Value::I64(9)));
    }
}
