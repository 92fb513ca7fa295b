use std::{fmt, io};
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// A pending comparison is never an error; it travels as a sort outcome.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a comparator-origin invalid argument error.
    pub(crate) fn comparator_invalid(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidArgument,
            ErrorOrigin::Comparator,
            message,
        )
    }

    /// Construct a session-origin invalid argument error.
    pub(crate) fn session_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, ErrorOrigin::Session, message)
    }

    /// Construct a codec-origin invalid argument error.
    pub(crate) fn codec_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, ErrorOrigin::Codec, message)
    }

    /// Construct a codec-origin corruption error.
    pub(crate) fn codec_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Codec, message)
    }

    /// Construct a storage-origin I/O error with the failing operation as context.
    pub(crate) fn storage_io(context: impl fmt::Display, err: &io::Error) -> Self {
        Self::new(
            ErrorClass::Io,
            ErrorOrigin::Storage,
            format!("{context}: {err}"),
        )
    }

    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.class, ErrorClass::Corruption)
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidArgument)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<io::Error> for InternalError {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorClass::Io, ErrorOrigin::Storage, err.to_string())
    }
}

///
/// ErrorClass
/// Runtime error taxonomy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// An element reference or answer was malformed; fatal to the attempt.
    InvalidArgument,

    /// Persisted session bytes could not be decoded.
    Corruption,

    /// Reading or writing persisted state failed.
    Io,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::Corruption => "corruption",
            Self::Io => "io",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Comparator,
    Codec,
    Storage,
    Session,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Comparator => "comparator",
            Self::Codec => "codec",
            Self::Storage => "storage",
            Self::Session => "session",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::codec_corruption("truncated string");

        assert_eq!(err.display_with_class(), "codec:corruption: truncated string");
        assert!(err.is_corruption());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn io_errors_map_to_storage_origin() {
        let err: InternalError = io::Error::new(io::ErrorKind::NotFound, "gone").into();

        assert_eq!(err.class, ErrorClass::Io);
        assert_eq!(err.origin, ErrorOrigin::Storage);
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn storage_io_keeps_context() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = InternalError::storage_io("write session file 'x/sort.mky'", &source);

        assert_eq!(err.message, "write session file 'x/sort.mky': denied");
    }
}
