use crate::{Entity, Related, Result};

use std::fmt;

/// A to-one relation field. Once loaded it holds the first matching row, or
/// nothing if no row matched.
pub struct HasOne<T> {
    value: Option<Option<Box<T>>>,
}

impl<T: Entity> HasOne<T> {
    pub fn load(related: Related) -> Result<Self> {
        Ok(Self {
            value: Some(related.into_one()?.map(Box::new)),
        })
    }

    #[track_caller]
    pub fn get(&self) -> Option<&T> {
        self.value
            .as_ref()
            .expect("relation not loaded")
            .as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for HasOne<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone> Clone for HasOne<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasOne<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_ref() {
            Some(Some(t)) => t.fmt(fmt),
            Some(None) => write!(fmt, "None"),
            None => write!(fmt, "<not loaded>"),
        }
    }
}
