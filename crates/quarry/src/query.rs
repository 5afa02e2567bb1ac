//! The statement executor: one prepared statement, its binds and its
//! outcome.

use quarry_core::{
    driver::{Bind, Prepared, Rows},
    stmt::ColumnValue,
    Connection, Error, Result,
};

pub use quarry_core::driver::Row;

/// What an executed statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Rows fetched by a SELECT, before any relation hydration.
    Rows(Vec<Row>),

    /// Rows affected by an INSERT, UPDATE or DELETE.
    Affected(u64),
}

impl QueryResult {
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryResult::Rows(rows) => rows,
            QueryResult::Affected(_) => vec![],
        }
    }

    pub fn affected(&self) -> u64 {
        match self {
            QueryResult::Rows(_) => 0,
            QueryResult::Affected(count) => *count,
        }
    }
}

/// A prepared statement bound to a connection.
///
/// Values must already be in their storage form; encoding composite
/// properties is the caller's job.
#[derive(Debug)]
pub struct Query<'a> {
    connection: &'a mut dyn Connection,
    prepared: Prepared,
    binds: Vec<Bind>,
    outcome: Option<Rows>,
    error: Option<String>,
}

impl<'a> Query<'a> {
    /// Prepares `sql`, failing with a prepare error if the driver rejects it.
    pub fn prepare(connection: &'a mut dyn Connection, sql: &str) -> Result<Self> {
        let prepared = connection.prepare(sql)?;

        Ok(Self {
            connection,
            prepared,
            binds: vec![],
            outcome: None,
            error: None,
        })
    }

    pub fn sql(&self) -> &str {
        self.prepared.sql()
    }

    /// Binds `value` to the placeholder `:name`, replacing an earlier bind of
    /// the same name.
    pub fn bind_value(&mut self, name: impl Into<String>, value: ColumnValue) -> &mut Self {
        let name = name.into();

        match self.binds.iter_mut().find(|bind| bind.name == name) {
            Some(bind) => bind.value = value,
            None => self.binds.push(Bind::new(name, value)),
        }
        self
    }

    /// Runs the statement. On failure the driver's message is also kept for
    /// [`Query::error`].
    pub fn execute(&mut self) -> Result<()> {
        self.outcome = None;
        self.error = None;

        match self.connection.exec(&self.prepared, &self.binds) {
            Ok(response) => {
                self.outcome = Some(response.rows);
                Ok(())
            }
            Err(err) => {
                let message = err
                    .execute_message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| err.to_string());
                self.error = Some(message.clone());

                if err.is_execute() {
                    Err(err)
                } else {
                    Err(Error::execute(message))
                }
            }
        }
    }

    /// Driver message of the last failed [`Query::execute`].
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Takes the outcome of the last successful [`Query::execute`].
    pub fn result(&mut self) -> Result<QueryResult> {
        match self.outcome.take() {
            Some(Rows::Values(rows)) => Ok(QueryResult::Rows(rows)),
            Some(Rows::Count(count)) => Ok(QueryResult::Affected(count)),
            None => Err(Error::invalid_argument(format!(
                "statement has no result; execute it first: {}",
                self.prepared.sql()
            ))),
        }
    }
}
