//! Parser and builder contracts, and the builtin codecs.
//!
//! A [`RecordParser`] turns bytes into a validated [`Record`]; a
//! [`RecordBuilder`] turns untyped data into bytes after validating it. Codecs
//! are stateless apart from their options, so one instance may be shared
//! across threads.
//!
//! | Codec | Parser | Builder |
//! |-------|--------|---------|
//! | JSON | [`JsonParser`] | [`JsonBuilder`] |
//! | Native notation | [`NativeParser`] | [`NativeBuilder`] |
//! | INI | [`IniParser`] | none |
//!
//! Parsers fail with [`Error::InvalidRecord`](crate::Error::InvalidRecord)
//! when the bytes cannot be decoded or the decoded data is not a valid record.
//! Builders fail with [`Error::InvalidRecord`](crate::Error::InvalidRecord)
//! on invalid input data and with
//! [`Error::RuntimeRecord`](crate::Error::RuntimeRecord) when the encoder
//! itself gives up.
//!
//! ```rust
//! use serde_record::codec::{JsonBuilder, JsonParser, RecordBuilder, RecordParser};
//! use serde_record::value;
//!
//! let data = value!({ "foo": "bar", "baz": [] });
//! let bytes = JsonBuilder::new().build(data.as_object().unwrap()).unwrap();
//! assert_eq!(bytes, br#"{"foo":"bar","baz":[]}"#);
//!
//! let record = JsonParser::new().parse(&bytes).unwrap();
//! assert_eq!(record.len(), 2);
//! ```

mod ini;
mod json;
mod native;

pub use ini::IniParser;
pub use json::{JsonBuilder, JsonParser};
pub use native::{NativeBuilder, NativeParser};

use crate::{Map, Record, Result};

/// Decodes bytes of one media type into a [`Record`].
pub trait RecordParser: Send + Sync {
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`](crate::Error::InvalidRecord) if
    /// `bytes` cannot be decoded or do not form a valid record.
    fn parse(&self, bytes: &[u8]) -> Result<Record>;
}

/// Encodes untyped data as bytes of one media type.
pub trait RecordBuilder: Send + Sync {
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`](crate::Error::InvalidRecord) if
    /// `data` is not a valid record, or with
    /// [`Error::RuntimeRecord`](crate::Error::RuntimeRecord) if encoding
    /// fails.
    fn build(&self, data: &Map) -> Result<Vec<u8>>;
}
