use super::{FromValue, Value};
use crate::{err, Result};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

/// An insertion-ordered `column -> value` map.
///
/// Entities export their storable properties as a record, and fetched rows
/// are handed back to entities as records.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// Removes `name` and converts it to `T`. A missing field reads as
    /// [`Value::Null`], so `Option<T>` targets tolerate partial rows.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T> {
        let value = self.remove(name).unwrap_or_default();
        T::from_value(value).map_err(|e| e.context(err!("field `{name}`")))
    }

    /// Removes `name` and deserializes it through `serde`.
    pub fn take_object<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let value = self.remove(name).unwrap_or_default();
        value
            .deserialize()
            .map_err(|e| e.context(err!("field `{name}`")))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keeps only the fields for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &Value) -> bool) {
        self.fields.retain(|k, v| f(k, v));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}
