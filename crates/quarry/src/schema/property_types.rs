use super::Relation;

use indexmap::IndexMap;
use quarry_core::schema::ScalarKind;

#[derive(Debug, Clone)]
pub enum PropertyType {
    /// A plain column.
    Scalar(ScalarKind),

    /// A property filled by the hydrator, never stored.
    Relation(Relation),
}

impl PropertyType {
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            PropertyType::Scalar(kind) => Some(*kind),
            PropertyType::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            PropertyType::Relation(relation) => Some(relation),
            PropertyType::Scalar(_) => None,
        }
    }
}

/// Insertion-ordered map from property name to [`PropertyType`].
///
/// ```
/// use quarry::{PropertyTypes, ScalarKind};
///
/// let types = PropertyTypes::new()
///     .scalar("id", ScalarKind::Int)
///     .scalar("tags", ScalarKind::Array);
///
/// assert_eq!(types.kind_of("tags"), Some(ScalarKind::Array));
/// assert_eq!(types.kind_of("missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyTypes {
    properties: IndexMap<String, PropertyType>,
}

impl PropertyTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.properties.insert(name.into(), PropertyType::Scalar(kind));
        self
    }

    pub fn relation(mut self, name: impl Into<String>, relation: Relation) -> Self {
        self.properties
            .insert(name.into(), PropertyType::Relation(relation));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropertyType> {
        self.properties.get(name)
    }

    /// Declared kind of a plain property. `None` for relations and unknown
    /// names.
    pub fn kind_of(&self, name: &str) -> Option<ScalarKind> {
        self.get(name).and_then(PropertyType::as_scalar)
    }

    pub fn relations(&self) -> impl Iterator<Item = (&str, &Relation)> {
        self.properties
            .iter()
            .filter_map(|(name, ty)| Some((name.as_str(), ty.as_relation()?)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyType)> {
        self.properties.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
