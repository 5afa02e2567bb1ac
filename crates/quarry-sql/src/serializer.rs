#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{comma, period};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

// Fragment serializers
mod expr;
mod statement;

use crate::stmt::Statement;

use quarry_core::driver::Dialect;

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Placeholder names in bind order
    params: Vec<String>,
}

impl Serializer {
    pub fn for_dialect(dialect: Dialect) -> Serializer {
        match dialect {
            Dialect::Sqlite => Serializer::sqlite(),
            Dialect::Postgresql => Serializer::postgresql(),
            Dialect::Mysql => Serializer::mysql(),
        }
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        self.serialize_with_params(stmt).0
    }

    /// Serializes `stmt` and also returns the placeholder names in the order
    /// a positional driver binds them.
    ///
    /// SQLite keeps `:name` placeholders and the list follows first use.
    /// PostgreSQL renders `$1, $2, ...`, one per distinct name. MySQL renders
    /// `?` for every occurrence, so a name used twice is listed twice.
    pub fn serialize_with_params(&self, stmt: &Statement) -> (String, Vec<String>) {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params: vec![],
        };

        stmt.to_sql(&mut fmt);
        let params = fmt.params;

        ret.push(';');
        (ret, params)
    }
}
