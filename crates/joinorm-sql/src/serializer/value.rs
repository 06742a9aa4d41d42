use super::{Formatter, Params, ToSql};

use joinorm_core::stmt::Value;

/// A value rendered inline as a SQL literal.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        match self.0 {
            Value::Bool(true) => f.dst.push('1'),
            Value::Bool(false) => f.dst.push('0'),
            Value::I64(v) => write!(f.dst, "{v}").unwrap(),
            // SQLite stores NaN as NULL and reads 9e999 as infinity
            Value::F64(v) if v.is_nan() => f.dst.push_str("NULL"),
            Value::F64(v) if v.is_infinite() => {
                f.dst.push_str(if v.is_sign_positive() { "9e999" } else { "-9e999" })
            }
            Value::F64(v) => write!(f.dst, "{v}").unwrap(),
            Value::String(v) => {
                f.dst.push('\'');
                for c in v.chars() {
                    if c == '\'' {
                        f.dst.push('\'');
                    }
                    f.dst.push(c);
                }
                f.dst.push('\'');
            }
            Value::Null => f.dst.push_str("NULL"),
        }
    }
}
