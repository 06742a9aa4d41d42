use super::{Comma, Formatter, Params, ToSql};

use crate::stmt::Statement;

use joinorm_core::stmt::{DeleteRecord, Query, WriteRecord};

impl ToSql for &Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT " Comma(&self.projection) " FROM " self.from.as_str());

        if self.has_filter() {
            fmt!(f, " WHERE " self.filter.as_str());
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " self.order_by.as_str());
        }
    }
}

impl ToSql for &WriteRecord {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "INSERT INTO " self.table.as_str());

        if self.values.is_empty() {
            fmt!(f, " DEFAULT VALUES");
            return;
        }

        let columns = Comma(self.values.keys());
        fmt!(f, " (" columns ") VALUES (");

        let mut s = "";
        for value in self.values.values() {
            let placeholder = f.params.push(value);
            fmt!(f, s placeholder);
            s = ", ";
        }

        fmt!(f, ")");
    }
}

impl ToSql for &DeleteRecord {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM " self.table.as_str() " WHERE " self.filter.as_str());

        // The filter carries anonymous `?` placeholders, bound in order.
        for arg in &self.args {
            f.params.push(arg);
        }
    }
}

impl ToSql for Statement<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}
