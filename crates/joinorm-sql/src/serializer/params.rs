use super::{Formatter, ToSql};

use joinorm_core::stmt::Value;

pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// One-based position of a bound parameter.
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        write!(&mut f.dst, "?{}", self.0).unwrap();
    }
}
