use super::Error;

/// Error when a criterion cannot be translated into a WHERE clause, such as
/// an empty `IN` list.
#[derive(Debug)]
pub(super) struct InvalidCriteriaError {
    message: Box<str>,
}

impl std::error::Error for InvalidCriteriaError {}

impl core::fmt::Display for InvalidCriteriaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid criteria: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid criteria error.
    pub fn invalid_criteria(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCriteria(InvalidCriteriaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid criteria error.
    pub fn is_invalid_criteria(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidCriteria(_)))
    }
}
