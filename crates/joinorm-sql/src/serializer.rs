#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod filter;
mod select;
mod statement;
mod value;

use crate::stmt::{Select, Statement};

use joinorm_core::stmt::{Query, Value};

/// Serializes statements and statement fragments to SQLite-flavored SQL.
///
/// Identifiers are emitted as configured, unquoted. Predicate operands are
/// rendered inline as literals; row values of inserts and deletes go through
/// [`Params`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer { _priv: () }
    }

    /// Splits a select into the four text parts a statement executor takes.
    pub fn query(&self, select: &Select) -> Query {
        Query {
            projection: select
                .projection
                .iter()
                .map(|column| self.fragment(column))
                .collect(),
            from: self.fragment(&select.from),
            filter: self.fragment(select::Filter(&select.filter)),
            order_by: self.fragment(Comma(&select.order_by)),
        }
    }

    /// Serializes a complete statement, pushing bound values into `params`.
    pub fn serialize<'s>(&self, stmt: impl Into<Statement<'s>>, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.into().to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn fragment(&self, fragment: impl ToSql) -> String {
        let mut ret = String::new();
        let mut params = Vec::<Value>::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params: &mut params,
        };

        fragment.to_sql(&mut fmt);

        debug_assert!(params.is_empty(), "fragments do not bind parameters");
        ret
    }
}
