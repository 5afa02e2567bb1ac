use crate::stmt::ColumnValue;

/// A statement the connection has accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    sql: String,

    /// True when executing the statement produces a result set.
    returns_rows: bool,
}

impl Prepared {
    pub fn new(sql: impl Into<String>, returns_rows: bool) -> Self {
        Self {
            sql: sql.into(),
            returns_rows,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn returns_rows(&self) -> bool {
        self.returns_rows
    }
}

/// A value bound to a named placeholder. The name excludes the leading `:`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub name: String,
    pub value: ColumnValue,
}

impl Bind {
    pub fn new(name: impl Into<String>, value: ColumnValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
