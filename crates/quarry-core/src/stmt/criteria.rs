use super::Value;
use crate::Result;

use indexmap::IndexMap;

/// The condition placed on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// `column IS NULL`
    Null,

    /// `column = value`, or `column LIKE value` when a string value starts or
    /// ends with `%`
    Value(Value),

    /// `column IN (...)`
    List(Vec<Value>),
}

impl Criterion {
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Criterion {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Criterion::Null,
            // Elements that have no `Value` form leave the array whole so the
            // translator can reject it.
            Value::Array(items) => match items
                .iter()
                .cloned()
                .map(Value::from_json)
                .collect::<Result<Vec<_>>>()
            {
                Ok(values) => Criterion::List(values),
                Err(_) => Criterion::Value(Value::Array(items)),
            },
            value => Criterion::Value(value),
        }
    }
}

macro_rules! impl_criterion_from {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Criterion {
                fn from(value: $ty) -> Self {
                    Criterion::from(Value::from(value))
                }
            }

            impl From<Option<$ty>> for Criterion {
                fn from(value: Option<$ty>) -> Self {
                    Criterion::from(Value::from(value))
                }
            }

            impl From<Vec<$ty>> for Criterion {
                fn from(values: Vec<$ty>) -> Self {
                    Criterion::list(values)
                }
            }
        )*
    };
}

impl_criterion_from!(bool, i64, i32, u32, String, &str);

impl From<Vec<Value>> for Criterion {
    fn from(values: Vec<Value>) -> Self {
        Criterion::List(values)
    }
}

/// A declarative `column -> condition` map. Columns are unique and keep the
/// order in which they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Criteria {
    entries: IndexMap<String, Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition, returning `self` for chaining. A column that is
    /// already present has its condition replaced in place.
    pub fn with(mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> Self {
        self.insert(column, criterion);
        self
    }

    pub fn insert(
        &mut self,
        column: impl Into<String>,
        criterion: impl Into<Criterion>,
    ) -> Option<Criterion> {
        self.entries.insert(column.into(), criterion.into())
    }

    pub fn get(&self, column: &str) -> Option<&Criterion> {
        self.entries.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Criteria {
    type Item = (String, Criterion);
    type IntoIter = indexmap::map::IntoIter<String, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, C: Into<Criterion>> FromIterator<(K, C)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Criteria {
            entries: iter
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        }
    }
}
