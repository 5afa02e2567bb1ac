use super::{
    expr::{OrderBy, Placeholder, Where},
    comma, Flavor, Formatter, Ident, ToSql,
};

use crate::stmt::{Delete, Insert, Projection, Select, Statement, TableRef, Update};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &TableRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(&self.name));
        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }
    }
}

impl ToSql for &Projection {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Projection::All => fmt!(f, "*"),
            Projection::Columns(columns) => fmt!(f, comma(columns.iter().map(Ident))),
            Projection::Count => fmt!(f, "COUNT(*) AS " Ident("count")),
        }
    }
}

/// ` LIMIT n OFFSET m`, using each flavor's spelling for an offset without a
/// limit.
struct Paging(Option<u64>, Option<u64>);

impl ToSql for Paging {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match (self.0, self.1) {
            (None, None) => {}
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT " limit " OFFSET " offset),
            (None, Some(offset)) => match f.serializer.flavor {
                Flavor::Sqlite => fmt!(f, " LIMIT -1 OFFSET " offset),
                Flavor::Mysql => fmt!(f, " LIMIT " u64::MAX " OFFSET " offset),
                Flavor::Postgresql => fmt!(f, " OFFSET " offset),
            },
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let projection = &self.projection;
        let table = &self.table;

        fmt!(
            f, "SELECT " projection " FROM " table
            Where(&self.filter) OrderBy(&self.order_by) Paging(self.limit, self.offset)
        );
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let columns = comma(self.values.iter().map(|a| Ident(&a.column)));
        let values = comma(self.values.iter().map(|a| Placeholder(&a.placeholder)));

        fmt!(
            f, "INSERT INTO " Ident(&self.table) " (" columns ") VALUES (" values ")"
        );
    }
}

struct Set<'a>(&'a crate::stmt::Assignment);

impl ToSql for Set<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(&self.0.column) " = " Placeholder(&self.0.placeholder));
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let sets = comma(self.assignments.iter().map(Set));

        fmt!(
            f, "UPDATE " Ident(&self.table) " SET " sets Where(&self.filter)
        );
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "DELETE FROM " Ident(&self.table) Where(&self.filter));
    }
}
