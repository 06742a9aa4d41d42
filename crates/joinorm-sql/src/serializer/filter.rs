use super::{value::Literal, Comma, Formatter, Params, Period, ToSql};

use joinorm_core::stmt::{Operand, Where};

/// A predicate qualified with the alias of its node.
pub(super) struct Qualified<'a> {
    pub(super) qualifier: &'a str,
    pub(super) predicate: &'a Where,
}

impl ToSql for Qualified<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = Period([self.qualifier, self.predicate.column.as_str()]);
        let op = self.predicate.op.as_str();

        if self.predicate.op.is_unary() {
            fmt!(f, column " " op);
            return;
        }

        match &self.predicate.operand {
            Operand::None => fmt!(f, column " " op),
            Operand::Value(value) => fmt!(f, column " " op " " Literal(value)),
            Operand::List(values) => {
                fmt!(f, column " " op " (" Comma(values.iter().map(Literal)) ")")
            }
            Operand::Range(low, high) => {
                fmt!(f, column " " op " " Literal(low) " AND " Literal(high))
            }
        }
    }
}
