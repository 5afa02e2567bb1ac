use super::{Formatter, ToSql};

/// Items written one after another with `separator` between them.
pub(super) struct Delimited<L> {
    items: L,
    separator: &'static str,
}

/// `a, b, c`
pub(super) fn comma<L>(items: L) -> Delimited<L> {
    Delimited {
        items,
        separator: ", ",
    }
}

/// `a.b`
pub(super) fn period<L>(items: L) -> Delimited<L> {
    Delimited {
        items,
        separator: ".",
    }
}

impl<L> ToSql for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql(self, f: &mut Formatter<'_>) {
        for (index, item) in self.items.into_iter().enumerate() {
            if index > 0 {
                f.dst.push_str(self.separator);
            }
            item.to_sql(f);
        }
    }
}
