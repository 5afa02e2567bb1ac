use crate::{
    stmt::{
        Assignment, Delete, Insert, Predicate, Projection, Select, Statement, TableRef, Update,
        WhereClause,
    },
    validate_ident,
};

use quarry_core::{
    stmt::{Conjunction, Direction},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Select,
    Insert,
    Update,
    Delete,
}

impl Verb {
    fn name(self) -> &'static str {
        match self {
            Verb::Select => "SELECT",
            Verb::Insert => "INSERT",
            Verb::Update => "UPDATE",
            Verb::Delete => "DELETE",
        }
    }
}

/// Assembles a [`Statement`] one clause at a time.
///
/// A builder is used for exactly one statement. Every check happens in
/// [`build`](Self::build), before anything reaches the database.
///
/// ```
/// use quarry_core::stmt::Direction;
/// use quarry_sql::{stmt::Predicate, QueryBuilder, Serializer};
///
/// let stmt = QueryBuilder::select("orders")
///     .and_where(Predicate::Eq {
///         column: "status".into(),
///         placeholder: "status".into(),
///     })
///     .order_by("created_at", Direction::Desc)
///     .limit(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     Serializer::sqlite().serialize(&stmt),
///     r#"SELECT * FROM "orders" WHERE "status" = :status ORDER BY "created_at" DESC LIMIT 10;"#,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    verb: Verb,
    table: String,
    alias: Option<String>,
    projection: Projection,
    assignments: Vec<Assignment>,
    filter: Vec<WhereClause>,
    order_by: Vec<(String, Direction)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl QueryBuilder {
    fn new(verb: Verb, table: impl Into<String>) -> Self {
        Self {
            verb,
            table: table.into(),
            alias: None,
            projection: Projection::All,
            assignments: vec![],
            filter: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn select(table: impl Into<String>) -> Self {
        Self::new(Verb::Select, table)
    }

    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(Verb::Insert, table)
    }

    pub fn update(table: impl Into<String>) -> Self {
        Self::new(Verb::Update, table)
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(Verb::Delete, table)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Selects only the given columns instead of `*`.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.projection = Projection::Columns(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the projection with a row count.
    pub fn count(mut self) -> Self {
        self.projection = Projection::Count;
        self
    }

    /// Adds `column = :placeholder` to an INSERT or UPDATE.
    pub fn set(mut self, column: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.assignments.push(Assignment {
            column: column.into(),
            placeholder: placeholder.into(),
        });
        self
    }

    pub fn and_where(self, predicate: Predicate) -> Self {
        self.push_where(Conjunction::And, predicate)
    }

    pub fn or_where(self, predicate: Predicate) -> Self {
        self.push_where(Conjunction::Or, predicate)
    }

    /// Appends already-joined clauses, typically the output of
    /// [`translate`](crate::translate).
    pub fn filter(mut self, clauses: impl IntoIterator<Item = WhereClause>) -> Self {
        self.filter.extend(clauses);
        self
    }

    fn push_where(mut self, conjunction: Conjunction, predicate: Predicate) -> Self {
        self.filter.push(WhereClause {
            conjunction,
            predicate,
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> Result<Statement> {
        validate_ident(&self.table)?;
        if self.table.contains('.') {
            return Err(Error::invalid_argument(format!(
                "table name `{}` must not be qualified",
                self.table
            )));
        }
        if let Some(alias) = &self.alias {
            validate_ident(alias)?;
        }
        if let Projection::Columns(columns) = &self.projection {
            if columns.is_empty() {
                return Err(Error::invalid_argument("empty column list"));
            }
            columns.iter().try_for_each(|column| validate_ident(column))?;
        }
        for assignment in &self.assignments {
            validate_ident(&assignment.column)?;
        }
        for clause in &self.filter {
            validate_ident(clause.predicate.column())?;
        }
        for (column, _) in &self.order_by {
            validate_ident(column)?;
        }

        if self.verb != Verb::Select {
            self.ensure_select_only()?;
        }

        Ok(match self.verb {
            Verb::Select => Select {
                table: TableRef {
                    name: self.table,
                    alias: self.alias,
                },
                projection: self.projection,
                filter: self.filter,
                order_by: self.order_by,
                limit: self.limit,
                offset: self.offset,
            }
            .into(),
            Verb::Insert => {
                if self.assignments.is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "INSERT into `{}` has no columns",
                        self.table
                    )));
                }
                if !self.filter.is_empty() {
                    return Err(Error::invalid_argument("INSERT does not take a WHERE clause"));
                }
                Insert {
                    table: self.table,
                    values: self.assignments,
                }
                .into()
            }
            Verb::Update => {
                if self.assignments.is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "UPDATE of `{}` has no set-clauses",
                        self.table
                    )));
                }
                Update {
                    table: self.table,
                    assignments: self.assignments,
                    filter: self.filter,
                }
                .into()
            }
            Verb::Delete => {
                if !self.assignments.is_empty() {
                    return Err(Error::invalid_argument("DELETE does not take set-clauses"));
                }
                Delete {
                    table: self.table,
                    filter: self.filter,
                }
                .into()
            }
        })
    }

    /// Rejects clauses that only make sense on a SELECT.
    fn ensure_select_only(&self) -> Result<()> {
        let clause = if self.alias.is_some() {
            "an alias"
        } else if self.projection != Projection::All {
            "a projection"
        } else if !self.order_by.is_empty() {
            "ORDER BY"
        } else if self.limit.is_some() {
            "LIMIT"
        } else if self.offset.is_some() {
            "OFFSET"
        } else {
            return Ok(());
        };

        Err(Error::invalid_argument(format!(
            "{} does not take {clause}",
            self.verb.name()
        )))
    }
}
