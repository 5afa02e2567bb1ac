mod adhoc;
mod driver;
mod entity_not_found;
mod execute;
mod invalid_argument;
mod invalid_criteria;
mod prepare;
mod transaction;
mod type_conversion;

use adhoc::AdhocError;
use driver::DriverError;
use entity_not_found::EntityNotFoundError;
use execute::ExecuteError;
use invalid_argument::InvalidArgumentError;
use invalid_criteria::InvalidCriteriaError;
use prepare::PrepareError;
use std::{fmt, sync::Arc};
use transaction::TransactionError;
use type_conversion::TypeConversionError;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// The error type of every fallible Quarry operation.
///
/// A single pointer wide. Errors can wrap one another through
/// [`Error::context`]; the kind predicates (`is_execute`, `is_transaction`,
/// ...) look through every layer.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<Layer>>,
}

#[derive(Debug)]
struct Layer {
    kind: ErrorKind,
    source: Option<Error>,
}

impl Error {
    /// Wraps `self` in `outer`, which is shown first.
    ///
    /// `"flushing User: execute failed: UNIQUE constraint failed"`
    pub fn context(self, outer: Error) -> Error {
        let kind = match outer.inner.map(Arc::try_unwrap) {
            Some(Ok(layer)) => layer.kind,
            Some(Err(shared)) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(Layer {
                kind,
                source: Some(self),
            })),
        }
    }

    /// The innermost error, without any context.
    pub fn root(&self) -> &Error {
        self.layers().last().unwrap_or(self)
    }

    fn layers(&self) -> Layers<'_> {
        Layers { next: Some(self) }
    }

    fn kind(&self) -> &ErrorKind {
        match &self.inner {
            Some(layer) => &layer.kind,
            None => &ErrorKind::Unknown,
        }
    }

    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.layers().any(|err| f(err.kind()))
    }
}

/// Walks from the outermost context down to the root.
struct Layers<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<&'a Error> {
        let current = self.next?;
        self.next = current
            .inner
            .as_deref()
            .and_then(|layer| layer.source.as_ref());
        Some(current)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Prepare(err) => Some(err),
            _ => self
                .inner
                .as_deref()
                .and_then(|layer| layer.source.as_ref())
                .map(|err| err as &(dyn std::error::Error + 'static)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, err) in self.layers().enumerate() {
            if depth > 0 {
                f.write_str(": ")?;
            }
            fmt::Display::fmt(err.kind(), f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let kinds = self.layers().map(Error::kind).collect::<Vec<_>>();
            f.debug_tuple("Error").field(&kinds).finish()
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    EntityNotFound(EntityNotFoundError),
    Execute(ExecuteError),
    InvalidArgument(InvalidArgumentError),
    InvalidCriteria(InvalidCriteriaError),
    Prepare(PrepareError),
    Transaction(TransactionError),
    TypeConversion(TypeConversionError),
    Unknown,
}

impl ErrorKind {
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        let display: &dyn fmt::Display = match self {
            ErrorKind::Anyhow(err) => err,
            ErrorKind::Adhoc(err) => err,
            ErrorKind::Driver(err) => err,
            ErrorKind::EntityNotFound(err) => err,
            ErrorKind::Execute(err) => err,
            ErrorKind::InvalidArgument(err) => err,
            ErrorKind::InvalidCriteria(err) => err,
            ErrorKind::Prepare(err) => err,
            ErrorKind::Transaction(err) => err,
            ErrorKind::TypeConversion(err) => err,
            ErrorKind::Unknown => return None,
        };
        Some(display)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_display() {
            Some(err) => fmt::Display::fmt(err, f),
            None => f.write_str("unknown quarry error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        let layer = Layer { kind, source: None };
        Error {
            inner: Some(Arc::new(layer)),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        ErrorKind::Anyhow(err).into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        ErrorKind::Anyhow(err.into()).into()
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        ErrorKind::Anyhow(err.into()).into()
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::invalid_argument(format!("invalid connection url: {err}"))
    }
}
