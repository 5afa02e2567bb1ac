use super::{Criteria, Criterion, Direction, Filter, OrderBy};

/// Everything a SELECT needs besides its table: projection, filter,
/// ordering and paging.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryPlan {
    /// Columns to select. `None` selects every column and is the only
    /// projection under which relations are hydrated.
    pub columns: Option<Vec<String>>,
    pub filter: Filter,
    pub order_by: OrderBy,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every entry of `criteria` to the filter, joined with `AND`.
    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.filter.extend(criteria);
        self
    }

    pub fn and_where(mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> Self {
        self.filter.and(column, criterion);
        self
    }

    pub fn or_where(mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> Self {
        self.filter.or(column, criterion);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(column, direction);
        self
    }

    pub fn sorted(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
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

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}
