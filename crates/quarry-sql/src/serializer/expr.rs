use super::{comma, Flavor, Formatter, Ident, ToSql};

use crate::stmt::{Predicate, WhereClause};

use quarry_core::stmt::{Conjunction, Direction};

/// A bind parameter: `:name` on SQLite, `$n` on PostgreSQL, `?` on MySQL.
pub(super) struct Placeholder<'a>(pub(super) &'a str);

impl ToSql for Placeholder<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;

        match f.serializer.flavor {
            Flavor::Sqlite => {
                if !f.params.iter().any(|name| name == self.0) {
                    f.params.push(self.0.to_owned());
                }
                fmt!(f, ":" self.0);
            }
            Flavor::Postgresql => {
                let position = match f.params.iter().position(|name| name == self.0) {
                    Some(index) => index + 1,
                    None => {
                        f.params.push(self.0.to_owned());
                        f.params.len()
                    }
                };
                write!(f.dst, "${position}").unwrap();
            }
            Flavor::Mysql => {
                f.params.push(self.0.to_owned());
                fmt!(f, "?");
            }
        }
    }
}

impl ToSql for &Predicate {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Predicate::IsNull { column } => fmt!(f, Ident(column) " IS NULL"),
            Predicate::Eq {
                column,
                placeholder,
            } => fmt!(f, Ident(column) " = " Placeholder(placeholder)),
            Predicate::Like {
                column,
                placeholder,
            } => fmt!(f, Ident(column) " LIKE " Placeholder(placeholder)),
            Predicate::InList {
                column,
                placeholders,
            } => {
                let list = comma(placeholders.iter().map(|p| Placeholder(p)));
                fmt!(f, Ident(column) " IN (" list ")");
            }
        }
    }
}

/// ` WHERE a AND b OR c`, or nothing for an empty filter.
pub(super) struct Where<'a>(pub(super) &'a [WhereClause]);

impl ToSql for Where<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        for (index, clause) in self.0.iter().enumerate() {
            let sep = match (index, clause.conjunction) {
                (0, _) => " WHERE ",
                (_, Conjunction::And) => " AND ",
                (_, Conjunction::Or) => " OR ",
            };
            let predicate = &clause.predicate;
            fmt!(f, sep predicate);
        }
    }
}

struct OrderByExpr<'a>(&'a str, Direction);

impl ToSql for OrderByExpr<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let direction = match self.1 {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
            Direction::Unspecified => "",
        };
        fmt!(f, Ident(self.0) direction);
    }
}

/// ` ORDER BY ...`, or nothing when no sort columns are given.
pub(super) struct OrderBy<'a>(pub(super) &'a [(String, Direction)]);

impl ToSql for OrderBy<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.0.is_empty() {
            return;
        }
        let exprs = comma(self.0.iter().map(|(column, dir)| OrderByExpr(column, *dir)));
        fmt!(f, " ORDER BY " exprs);
    }
}
