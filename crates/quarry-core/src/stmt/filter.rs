use super::{Criteria, Criterion};

/// How a condition joins the conditions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub conjunction: Conjunction,
    pub column: String,
    pub criterion: Criterion,
}

/// An ordered list of conditions, joined left to right.
///
/// No grouping is added, so SQL precedence applies: `a AND b OR c` reads as
/// `(a AND b) OR c`. The conjunction of the first condition is ignored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(&mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> &mut Self {
        self.push(Conjunction::And, column.into(), criterion.into())
    }

    pub fn or(&mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> &mut Self {
        self.push(Conjunction::Or, column.into(), criterion.into())
    }

    /// Appends every entry of `criteria`, joined with `AND`.
    pub fn extend(&mut self, criteria: Criteria) -> &mut Self {
        for (column, criterion) in criteria {
            self.push(Conjunction::And, column, criterion);
        }
        self
    }

    fn push(&mut self, conjunction: Conjunction, column: String, criterion: Criterion) -> &mut Self {
        self.conditions.push(Condition {
            conjunction,
            column,
            criterion,
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl From<Criteria> for Filter {
    fn from(criteria: Criteria) -> Self {
        let mut filter = Filter::new();
        filter.extend(criteria);
        filter
    }
}
