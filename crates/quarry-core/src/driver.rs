mod dialect;
pub use dialect::Dialect;

mod prepared;
pub use prepared::{Bind, Prepared};

mod response;
pub use response::{Response, Row, Rows};

use crate::{stmt::Value, Result};

use std::fmt::Debug;

/// A single database connection.
///
/// Every call blocks until the database answers. A connection is owned by one
/// entity manager at a time; nothing here is expected to be shared between
/// threads without external synchronization.
pub trait Connection: Debug + Send {
    /// SQL dialect spoken by this connection.
    fn dialect(&self) -> Dialect;

    /// Starts a transaction. Fails if one is already active; nesting is not
    /// supported.
    fn begin_transaction(&mut self) -> Result<()>;

    /// Commits the active transaction.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the active transaction.
    fn rollback(&mut self) -> Result<()>;

    fn in_transaction(&self) -> bool;

    /// Id generated by the most recent successful INSERT on this connection.
    fn last_insert_id(&self) -> Result<Value>;

    /// Compiles `sql`, failing with a prepare error if the database rejects it.
    fn prepare(&mut self, sql: &str) -> Result<Prepared>;

    /// Runs a prepared statement with the given named parameters.
    fn exec(&mut self, stmt: &Prepared, binds: &[Bind]) -> Result<Response>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn begin_transaction(&mut self) -> Result<()> {
        (**self).begin_transaction()
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<()> {
        (**self).rollback()
    }

    fn in_transaction(&self) -> bool {
        (**self).in_transaction()
    }

    fn last_insert_id(&self) -> Result<Value> {
        (**self).last_insert_id()
    }

    fn prepare(&mut self, sql: &str) -> Result<Prepared> {
        (**self).prepare(sql)
    }

    fn exec(&mut self, stmt: &Prepared, binds: &[Bind]) -> Result<Response> {
        (**self).exec(stmt, binds)
    }
}
