use crate::{Error, Result};

use indexmap::IndexMap;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,

    /// Leave the direction to the database, which sorts ascending.
    #[default]
    Unspecified,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            Ok(Direction::Unspecified)
        } else if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(Error::invalid_argument(format!(
                "unknown sort direction `{s}`"
            )))
        }
    }
}

/// Columns to sort by, in the order they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderBy {
    entries: IndexMap<String, Direction>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sort column, returning `self` for chaining.
    pub fn with(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.push(column, direction);
        self
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new().with(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new().with(column, Direction::Desc)
    }

    pub fn push(&mut self, column: impl Into<String>, direction: Direction) {
        self.entries.insert(column.into(), direction);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Direction)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (K, Direction)>>(iter: I) -> Self {
        OrderBy {
            entries: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}
