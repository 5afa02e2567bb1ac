use super::Error;

/// Error when a prepared statement fails to execute.
///
/// The message is the driver's error text, unmodified.
#[derive(Debug)]
pub(super) struct ExecuteError {
    message: Box<str>,
}

impl std::error::Error for ExecuteError {}

impl core::fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "execute failed: {}", self.message)
    }
}

impl Error {
    /// Creates an execute error carrying the driver's raw error text.
    pub fn execute(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Execute(ExecuteError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an execute error.
    pub fn is_execute(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Execute(_)))
    }

    /// Returns the driver's error text if this error, or one of its causes,
    /// is an execute error.
    pub fn execute_message(&self) -> Option<&str> {
        self.layers().find_map(|err| match err.kind() {
            super::ErrorKind::Execute(err) => Some(&*err.message),
            _ => None,
        })
    }
}
