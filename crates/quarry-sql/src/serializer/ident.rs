use super::{period, Formatter, ToSql};

/// A possibly qualified identifier, quoted per flavor.
pub(super) struct Ident<S>(pub(super) S);

/// One quoted identifier segment.
struct Quoted<'a>(&'a str);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        period(self.0.as_ref().split('.').map(Quoted)).to_sql(f);
    }
}

impl ToSql for Quoted<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let quote = if f.serializer.is_mysql() { '`' } else { '"' };
        f.dst.push(quote);
        f.dst.push_str(self.0);
        f.dst.push(quote);
    }
}
