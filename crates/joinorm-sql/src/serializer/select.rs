use super::{filter::Qualified, Delimited, Formatter, Params, Period, ToSql};

use crate::stmt::{ColumnRef, FilterGroup, Join, TableRef, TableWithJoins};

/// The `WHERE` body of a select.
pub(super) struct Filter<'a>(pub(super) &'a [FilterGroup]);

impl ToSql for &ColumnRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        Period([&self.qualifier, &self.name]).to_sql(f);
    }
}

impl ToSql for &TableRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.name);

        if self.is_aliased() {
            fmt!(f, " AS " self.alias.as_str());
        }
    }
}

struct JoinCondition<'a>(&'a (ColumnRef, ColumnRef));

impl ToSql for JoinCondition<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (lhs, rhs) = self.0;
        fmt!(f, lhs " = " rhs);
    }
}

impl ToSql for &Join {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Join::On { left, table, on } => {
                let kind = if *left { "LEFT JOIN " } else { "JOIN " };
                let on = Delimited(on.iter().map(JoinCondition), " AND ");
                fmt!(f, kind table " ON " on);
            }
            Join::Raw(fragment) => fmt!(f, fragment),
        }
    }
}

impl ToSql for &TableWithJoins {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.relation);

        for join in &self.joins {
            fmt!(f, " " join);
        }
    }
}

struct Group<'a>(&'a FilterGroup);

impl ToSql for Group<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "(");

        for (index, predicate) in self.0.predicates.iter().enumerate() {
            if index > 0 {
                fmt!(f, " " predicate.combinator.as_str() " ");
            }

            let predicate = Qualified {
                qualifier: &self.0.qualifier,
                predicate,
            };
            fmt!(f, predicate);
        }

        fmt!(f, ")");
    }
}

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let groups = self
            .0
            .iter()
            .filter(|group| !group.predicates.is_empty())
            .map(Group);

        Delimited(groups, " AND ").to_sql(f);
    }
}
