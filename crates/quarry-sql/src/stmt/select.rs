use super::{TableRef, WhereClause};

use quarry_core::stmt::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    All,
    Columns(Vec<String>),

    /// `COUNT(*)`
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: TableRef,
    pub projection: Projection,
    pub filter: Vec<WhereClause>,
    pub order_by: Vec<(String, Direction)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
