use super::Cardinality;
use crate::{Entity, Error, Result};

use std::{any::Any, fmt};

/// A hydrated relation on its way to [`Entity::attach`].
///
/// The concrete entity type is erased so one `attach` implementation can
/// receive every relation of its entity.
pub struct Related {
    cardinality: Cardinality,
    target: &'static str,
    value: Box<dyn Any>,
}

impl Related {
    pub fn one<T: Entity>(value: Option<T>) -> Self {
        Self {
            cardinality: Cardinality::One,
            target: T::table_name(),
            value: Box::new(value),
        }
    }

    pub fn many<T: Entity>(values: Vec<T>) -> Self {
        Self {
            cardinality: Cardinality::Many,
            target: T::table_name(),
            value: Box::new(values),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }

    pub fn into_one<T: Entity>(self) -> Result<Option<T>> {
        if self.is_many() {
            return Err(self.mismatch::<T>("a to-one"));
        }
        let target = self.target;
        self.value
            .downcast::<Option<T>>()
            .map(|value| *value)
            .map_err(|_| mismatch::<T>(target, "a to-one"))
    }

    pub fn into_many<T: Entity>(self) -> Result<Vec<T>> {
        if !self.is_many() {
            return Err(self.mismatch::<T>("a to-many"));
        }
        let target = self.target;
        self.value
            .downcast::<Vec<T>>()
            .map(|values| *values)
            .map_err(|_| mismatch::<T>(target, "a to-many"))
    }

    fn mismatch<T: Entity>(&self, expected: &str) -> Error {
        mismatch::<T>(self.target, expected)
    }
}

fn mismatch<T: Entity>(target: &str, expected: &str) -> Error {
    Error::invalid_argument(format!(
        "expected {expected} relation of `{}`; got `{target}`",
        T::table_name()
    ))
}

impl fmt::Debug for Related {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Related")
            .field("cardinality", &self.cardinality)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
