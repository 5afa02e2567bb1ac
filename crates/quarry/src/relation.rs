//! Field types holding hydrated relations on an entity.

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;
