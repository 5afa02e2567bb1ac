pub mod builder;
pub use builder::QueryBuilder;

pub mod criteria;
pub use criteria::{translate, Placeholders, Translated};

mod ident;
pub use ident::validate_ident;

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
