use super::Error;

/// Error when a caller passes malformed input.
///
/// This occurs when:
/// - An id is not a scalar value
/// - A column name is not a valid identifier
/// - A connection name or URL scheme is unknown
/// - An entity without an id is registered for save or delete
#[derive(Debug)]
pub(super) struct InvalidArgumentError {
    message: Box<str>,
}

impl std::error::Error for InvalidArgumentError {}

impl core::fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgumentError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidArgument(_)))
    }
}
