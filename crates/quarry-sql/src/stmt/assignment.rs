/// `column = :placeholder`, as used by INSERT values and UPDATE sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub placeholder: String,
}
