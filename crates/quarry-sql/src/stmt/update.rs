use super::{Assignment, WhereClause};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub filter: Vec<WhereClause>,
}
