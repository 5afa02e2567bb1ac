use quarry_core::{
    driver::{Bind, Connection, Dialect, Prepared, Response},
    stmt::Value,
    Error, Result,
};
use std::sync::{Arc, Mutex};

/// One statement or transaction command seen by the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedOp {
    pub sql: String,
    pub binds: Vec<Bind>,
    pub ok: bool,
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub(crate) ops: Vec<LoggedOp>,

    /// Statements containing this text fail with an execute error.
    pub(crate) fail_on: Option<String>,
}

/// A connection wrapper that records every executed statement and can be
/// told to fail statements matching a pattern.
#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes statements
    inner: Box<dyn Connection>,

    /// Using Arc<Mutex> so tests keep a handle after the connection moves
    /// into the entity manager
    shared: Arc<Mutex<Shared>>,
}

impl LoggingConnection {
    pub fn new(inner: Box<dyn Connection>) -> Self {
        Self {
            inner,
            shared: Arc::default(),
        }
    }

    pub(crate) fn shared(&self) -> Arc<Mutex<Shared>> {
        self.shared.clone()
    }

    fn record(&self, sql: &str, binds: &[Bind], ok: bool) {
        self.shared.lock().unwrap().ops.push(LoggedOp {
            sql: sql.to_owned(),
            binds: binds.to_vec(),
            ok,
        });
    }

    fn transition(&mut self, sql: &str, result: Result<()>) -> Result<()> {
        self.record(sql, &[], result.is_ok());
        result
    }
}

impl Connection for LoggingConnection {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    fn begin_transaction(&mut self) -> Result<()> {
        let result = self.inner.begin_transaction();
        self.transition("BEGIN", result)
    }

    fn commit(&mut self) -> Result<()> {
        let result = self.inner.commit();
        self.transition("COMMIT", result)
    }

    fn rollback(&mut self) -> Result<()> {
        let result = self.inner.rollback();
        self.transition("ROLLBACK", result)
    }

    fn in_transaction(&self) -> bool {
        self.inner.in_transaction()
    }

    fn last_insert_id(&self) -> Result<Value> {
        self.inner.last_insert_id()
    }

    fn prepare(&mut self, sql: &str) -> Result<Prepared> {
        self.inner.prepare(sql)
    }

    fn exec(&mut self, stmt: &Prepared, binds: &[Bind]) -> Result<Response> {
        let fail = {
            let shared = self.shared.lock().unwrap();
            shared
                .fail_on
                .as_deref()
                .is_some_and(|pattern| stmt.sql().contains(pattern))
        };

        let result = if fail {
            Err(Error::execute(format!("injected failure: {}", stmt.sql())))
        } else {
            self.inner.exec(stmt, binds)
        };

        self.record(stmt.sql(), binds, result.is_ok());
        result
    }
}
