use quarry_core::stmt::Conjunction;

/// A single WHERE condition. Placeholder names exclude the leading `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    IsNull {
        column: String,
    },
    Eq {
        column: String,
        placeholder: String,
    },
    Like {
        column: String,
        placeholder: String,
    },
    InList {
        column: String,
        placeholders: Vec<String>,
    },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::IsNull { column }
            | Predicate::Eq { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::InList { column, .. } => column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub conjunction: Conjunction,
    pub predicate: Predicate,
}
