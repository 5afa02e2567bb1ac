/// The SQL dialect a connection speaks. Statement text is serialized per
/// dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgresql,
    Mysql,
}

impl Dialect {
    /// Statement that opens a transaction.
    pub fn begin_statement(self) -> &'static str {
        match self {
            Dialect::Mysql => "START TRANSACTION",
            Dialect::Sqlite | Dialect::Postgresql => "BEGIN",
        }
    }
}
