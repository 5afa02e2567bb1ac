use super::Error;

/// Error when the driver rejects statement text.
#[derive(Debug)]
pub(super) struct PrepareError {
    sql: Box<str>,
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for PrepareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for PrepareError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "prepare failed: {}; sql={}", self.inner, self.sql)
    }
}

impl Error {
    /// Creates a prepare error for `sql`, wrapping the driver's error.
    pub fn prepare(
        sql: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::Prepare(PrepareError {
            sql: sql.into().into(),
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a prepare error.
    pub fn is_prepare(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Prepare(_)))
    }
}
