/// Storage kind of a plain (non-relation) entity property.
///
/// The kind drives how a stored [`ColumnValue`](crate::stmt::ColumnValue) is
/// decoded back into a [`Value`](crate::stmt::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    String,
    Bool,
    Object,
    Array,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Object => "object",
            ScalarKind::Array => "array",
        }
    }
}
