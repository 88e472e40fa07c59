//! Error types for record validation, lookup and (de)serialization.
//!
//! Two kinds of failure exist:
//!
//! - [`Error::InvalidRecord`]: the caller handed in something malformed. A key
//!   that breaks the naming rules, an unsupported leaf value, a media type
//!   string that is not `type/subtype`, or bytes a parser cannot decode.
//! - [`Error::RuntimeRecord`]: an otherwise valid operation could not be
//!   completed. An encoder refused validated data, or no codec is registered
//!   for a well-formed media type.
//!
//! Both carry an [`ErrorCode`] that narrows the failure down further.
//!
//! ## Examples
//!
//! ```rust
//! use serde_record::{value, normalize, ErrorCode};
//!
//! let data = value!({ "1two": "prohibited" });
//! let err = normalize(data.as_object().unwrap()).unwrap_err();
//!
//! assert!(err.is_invalid());
//! assert_eq!(err.code(), ErrorCode::InvalidRecord);
//! assert_eq!(err.to_string(), "Invalid record key at /: \"1two\"");
//! ```

use crate::Path;
use std::fmt;
use thiserror::Error;

/// Narrows down why an operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A requested property does not exist.
    NotFound,
    /// A media type is malformed or has no codec registered.
    NotSupported,
    /// A record violates the naming or shape rules.
    InvalidRecord,
    /// An encoder or decoder failed.
    InternalError,
}

impl ErrorCode {
    /// Returns a stable, human-readable name for this code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not found",
            ErrorCode::NotSupported => "not supported",
            ErrorCode::InvalidRecord => "invalid record",
            ErrorCode::InternalError => "internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents every failure this crate reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Caller-supplied data is malformed
    #[error("{message}")]
    InvalidRecord { code: ErrorCode, message: String },

    /// An internal or environmental failure during a valid operation
    #[error("{message}")]
    RuntimeRecord {
        code: ErrorCode,
        message: String,
        source: Option<Box<Error>>,
    },
}

impl Error {
    /// Creates an [`Error::InvalidRecord`] with the given code.
    pub fn invalid<T: fmt::Display>(code: ErrorCode, msg: T) -> Self {
        Error::InvalidRecord {
            code,
            message: msg.to_string(),
        }
    }

    /// Creates an [`Error::RuntimeRecord`] with the given code.
    pub fn runtime<T: fmt::Display>(code: ErrorCode, msg: T) -> Self {
        Error::RuntimeRecord {
            code,
            message: msg.to_string(),
            source: None,
        }
    }

    /// Creates an [`Error::RuntimeRecord`] that keeps `cause` as its source.
    pub fn runtime_caused_by<T: fmt::Display>(code: ErrorCode, msg: T, cause: Error) -> Self {
        Error::RuntimeRecord {
            code,
            message: msg.to_string(),
            source: Some(Box::new(cause)),
        }
    }

    /// A record key does not match the naming rules.
    ///
    /// `path` points at the record holding the key, not at the key itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{Error, Path};
    ///
    /// let path = Path::root().join("foo");
    /// let err = Error::invalid_name(&path, "1two");
    /// assert_eq!(err.to_string(), "Invalid record key at /foo: \"1two\"");
    /// ```
    pub fn invalid_name(path: &Path, name: &str) -> Self {
        Error::invalid(
            ErrorCode::InvalidRecord,
            format!("Invalid record key at {}: \"{}\"", path, name),
        )
    }

    /// A leaf value is neither a scalar, a list nor a record.
    pub fn invalid_item(path: &Path, kind: &str) -> Self {
        Error::invalid(
            ErrorCode::InvalidRecord,
            format!("Invalid record item at {}: {}", path, kind),
        )
    }

    /// A media type string is not `type/subtype`.
    pub fn invalid_type(media_type: &str) -> Self {
        Error::invalid(
            ErrorCode::NotSupported,
            format!("Invalid media type: {}", media_type),
        )
    }

    /// A parser could not decode its input.
    pub fn malformed<T: fmt::Display>(format: &str, msg: T) -> Self {
        Error::invalid(
            ErrorCode::InternalError,
            format!("Could not parse {} record: {}", format, msg),
        )
    }

    /// No codec of the requested `role` is registered for `media_type`.
    pub fn not_supported(media_type: &str, role: &str) -> Self {
        Error::runtime(
            ErrorCode::NotSupported,
            format!("Could not provide \"{}\" {}", media_type, role),
        )
    }

    /// A property lookup on an entity found nothing.
    pub fn not_found(name: &str) -> Self {
        Error::invalid(
            ErrorCode::NotFound,
            format!("Failed to retrieve property \"{}\"", name),
        )
    }

    /// Returns the [`ErrorCode`] of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidRecord { code, .. } | Error::RuntimeRecord { code, .. } => *code,
        }
    }

    /// Returns the human-readable message of this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidRecord { message, .. } | Error::RuntimeRecord { message, .. } => message,
        }
    }

    /// Returns `true` for [`Error::InvalidRecord`].
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Error::InvalidRecord { .. })
    }

    /// Returns `true` for [`Error::RuntimeRecord`].
    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self, Error::RuntimeRecord { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::runtime(ErrorCode::InternalError, msg)
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::invalid(ErrorCode::InternalError, msg)
    }
}

/// A decoder failure located by line number.
///
/// Byte-level decoders report this; codecs wrap it into an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {msg}")]
pub struct SyntaxError {
    pub line: usize,
    pub msg: String,
}

impl SyntaxError {
    pub fn new(line: usize, msg: &str) -> Self {
        SyntaxError {
            line,
            msg: msg.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
