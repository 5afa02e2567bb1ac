//! Static per-entity metadata: which properties are plain columns, which are
//! relations, and how relations are loaded.

mod include;
pub use include::{Include, RelationOptions, Relations};

mod property_types;
pub use property_types::{PropertyType, PropertyTypes};

mod related;
pub use related::Related;

mod relation;
pub use relation::{Cardinality, Relation};
