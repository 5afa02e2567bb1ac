use crate::{Entity, Related, Result};

use std::fmt;

/// A to-many relation field. Unloaded until the hydrator attaches it.
pub struct HasMany<T> {
    values: Option<Vec<T>>,
}

impl<T: Entity> HasMany<T> {
    pub fn load(related: Related) -> Result<Self> {
        Ok(Self {
            values: Some(related.into_many()?),
        })
    }

    #[track_caller]
    pub fn get(&self) -> &[T] {
        self.values
            .as_ref()
            .expect("relation not loaded")
            .as_slice()
    }

    pub fn try_get(&self) -> Option<&[T]> {
        self.values.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.values.is_some()
    }

    /// Drops the loaded values, returning the field to the unloaded state.
    pub fn unload(&mut self) {
        self.values = None;
    }
}

impl<T> Default for HasMany<T> {
    fn default() -> Self {
        Self { values: None }
    }
}

impl<T: Clone> Clone for HasMany<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasMany<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_ref() {
            Some(values) => fmt.debug_list().entries(values).finish(),
            None => write!(fmt, "<not loaded>"),
        }
    }
}
