mod transaction_manager;
use transaction_manager::TransactionManager;

mod value;
pub(crate) use value::Value;

use quarry_core::{
    driver::{Bind, Dialect, Prepared, Response, Row},
    stmt, Error, Result,
};
use rusqlite::{types::ToSql, Connection as RusqliteConnection};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_argument(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a new connection. Every in-memory connection gets its own
    /// empty database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    transaction: TransactionManager,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    fn from_rusqlite(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            transaction: TransactionManager::new(),
        }
    }

    /// Runs one or more statements without parameters. Used for schema
    /// setup, which sits outside the entity layer.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        tracing::debug!(sql, "sqlite execute_batch");
        self.connection
            .execute_batch(sql)
            .map_err(|err| Error::execute(err.to_string()))
    }

    fn transition(&mut self, sql: &str, was_active: bool) -> Result<()> {
        tracing::debug!(sql, "sqlite transaction");
        if let Err(err) = self.connection.execute_batch(sql) {
            self.transaction.revert(was_active);
            return Err(Error::driver(err));
        }
        Ok(())
    }
}

impl quarry_core::driver::Connection for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn begin_transaction(&mut self) -> Result<()> {
        let sql = self.transaction.start()?;
        self.transition(sql, false)
    }

    fn commit(&mut self) -> Result<()> {
        let sql = self.transaction.commit()?;
        self.transition(sql, true)
    }

    fn rollback(&mut self) -> Result<()> {
        let sql = self.transaction.rollback()?;
        self.transition(sql, true)
    }

    fn in_transaction(&self) -> bool {
        self.transaction.is_active()
    }

    fn last_insert_id(&self) -> Result<stmt::Value> {
        Ok(stmt::Value::I64(self.connection.last_insert_rowid()))
    }

    fn prepare(&mut self, sql: &str) -> Result<Prepared> {
        let stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(|err| Error::prepare(sql, err))?;

        Ok(Prepared::new(sql, stmt.column_count() > 0))
    }

    fn exec(&mut self, prepared: &Prepared, binds: &[Bind]) -> Result<Response> {
        tracing::debug!(sql = prepared.sql(), binds = binds.len(), "sqlite exec");

        let mut stmt = self
            .connection
            .prepare_cached(prepared.sql())
            .map_err(|err| Error::prepare(prepared.sql(), err))?;

        let names = binds
            .iter()
            .map(|bind| format!(":{}", bind.name))
            .collect::<Vec<_>>();
        let values = binds
            .iter()
            .map(|bind| Value::from(&bind.value))
            .collect::<Vec<_>>();
        let params = names
            .iter()
            .zip(&values)
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect::<Vec<_>>();

        if !prepared.returns_rows() {
            let count = stmt
                .execute(params.as_slice())
                .map_err(|err| Error::execute(err.to_string()))?;

            return Ok(Response::count(count as u64));
        }

        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mut rows = stmt
            .query(params.as_slice())
            .map_err(|err| Error::execute(err.to_string()))?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut fields = Row::with_capacity(columns.len());

                    for (index, column) in columns.iter().enumerate() {
                        let value = row.get_ref(index).map_err(Error::driver)?;
                        fields.insert(column.clone(), Value::from_sql(value)?);
                    }

                    ret.push(fields);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::execute(err.to_string()));
                }
            }
        }

        Ok(Response::values(ret))
    }
}
