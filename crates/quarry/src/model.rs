use crate::{schema::PropertyTypes, Error, Related, Result};

use quarry_core::stmt::Record;
use uuid::Uuid;

use std::fmt;

/// Stable per-instance token keying an entity in the deferred write sets.
///
/// Assigned once at construction. New entities have no primary key yet, so
/// pending writes cannot be keyed by id. Clones share the token and address
/// the same pending write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(Uuid);

impl Identity {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A domain type mapped to one table row.
pub trait Entity: Sized + 'static {
    /// Unprefixed name of the backing table.
    fn table_name() -> &'static str;

    /// Primary-key column. Must be non-null before a save or delete.
    fn id_field() -> &'static str {
        "id"
    }

    /// Property name to storage kind or relation descriptor.
    fn property_types() -> PropertyTypes;

    /// Properties left out of [`Entity::to_json`].
    fn hidden_fields() -> &'static [&'static str] {
        &[]
    }

    /// Hidden properties that are still written to the database.
    fn storable_hidden_fields() -> &'static [&'static str] {
        &[]
    }

    /// Properties holding relations. Never stored.
    fn relationship_properties() -> Vec<String> {
        Self::property_types()
            .relations()
            .map(|(name, _)| name.to_owned())
            .collect()
    }

    fn identity(&self) -> Identity;

    /// Exports every plain property, hidden ones included.
    fn to_record(&self) -> Result<Record>;

    /// Builds an instance from a fetched row. Values arrive already decoded
    /// according to [`Entity::property_types`].
    fn from_record(record: Record) -> Result<Self>;

    /// Assigns a hydrated relation to `property`.
    fn attach(&mut self, property: &str, related: Related) -> Result<()> {
        let _ = related;
        Err(Error::invalid_argument(format!(
            "`{}` does not accept relation `{property}`",
            std::any::type_name::<Self>()
        )))
    }

    /// The record written to the database: relation properties and hidden
    /// properties that are not storable are left out.
    fn storable_record(&self) -> Result<Record> {
        let relations = Self::relationship_properties();
        let hidden = Self::hidden_fields();
        let storable = Self::storable_hidden_fields();

        let mut record = self.to_record()?;
        record.retain(|name, _| {
            !relations.iter().any(|relation| relation == name)
                && (!hidden.contains(&name) || storable.contains(&name))
        });
        Ok(record)
    }

    /// The public JSON form: every hidden property is left out.
    fn to_json(&self) -> Result<serde_json::Value> {
        let hidden = Self::hidden_fields();

        let object = self
            .to_record()?
            .into_iter()
            .filter(|(name, _)| !hidden.contains(&name.as_str()))
            .map(|(name, value)| (name, value.into_json()))
            .collect::<serde_json::Map<_, _>>();

        Ok(serde_json::Value::Object(object))
    }
}
