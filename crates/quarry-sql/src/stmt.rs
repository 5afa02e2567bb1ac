mod assignment;
pub use assignment::Assignment;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod predicate;
pub use predicate::{Predicate, WhereClause};

mod select;
pub use select::{Projection, Select};

mod table_ref;
pub use table_ref::TableRef;

mod update;
pub use update::Update;

/// A fully assembled statement, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// Returns `true` if executing the statement yields rows rather than an
    /// affected-row count.
    pub fn returns_rows(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Select(stmt) => &stmt.table.name,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
