//! # serde_record
//!
//! Validated, format-independent records: nested key/value data with strict
//! naming rules, plus a registry of codecs that read and write it in several
//! media types.
//!
//! ## What is a record?
//!
//! A record is an ordered mapping from keys to items. Keys follow a strict
//! identifier grammar (a letter first, then letters and digits, single `+`,
//! `_`, `.` or `-` separators in between). Items are `null`, booleans,
//! numbers, strings, lists of items or nested records. Nothing else is
//! allowed; binary blobs, dates and arbitrary-precision integers are rejected.
//!
//! ## Key Features
//!
//! - **One rule set**: validation and normalization share a single traversal,
//!   so "is valid" and "canonical form" never disagree
//! - **Valid by construction**: a [`Record`] can only come out of
//!   normalization, so holding one means holding valid data
//! - **Several media types**: JSON, a compact native notation, and INI input,
//!   looked up case-insensitively through a [`RecordFactory`]
//! - **Precise errors**: every failure names the offending key by path and
//!   carries an [`ErrorCode`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_record::{from_slice, to_vec, value, Item};
//!
//! let data = value!({
//!     "name": "Alice",
//!     "tags": ["admin", "dev"],
//!     "address": { "city": "Berlin" }
//! });
//! let data = data.as_object().unwrap();
//!
//! let json = to_vec("application/json", data).unwrap();
//! let record = from_slice("application/json", &json).unwrap();
//! assert_eq!(record.get("name").and_then(Item::as_str), Some("Alice"));
//!
//! let native = to_vec("application/vnd.serde-record.serialized", data).unwrap();
//! assert_eq!(
//!     String::from_utf8(native).unwrap(),
//!     "name: Alice\ntags[2]: admin,dev\naddress:\n  city: Berlin"
//! );
//! ```
//!
//! ### Lists hidden in mappings
//!
//! A mapping whose keys are exactly `"0"`, `"1"`, ... in order is a list.
//! Any other numeric key is an invalid name:
//!
//! ```rust
//! use serde_record::{normalize, value, Item};
//!
//! let data = value!({ "list": { "0": "a", "1": "b" } });
//! let record = normalize(data.as_object().unwrap()).unwrap();
//! assert!(record.get("list").and_then(Item::as_list).is_some());
//!
//! let data = value!({ "foo": "bar", "0": "baz" });
//! assert!(normalize(data.as_object().unwrap()).is_err());
//! ```
//!
//! ## Errors
//!
//! [`Error::InvalidRecord`] means the caller handed in something malformed:
//! bad keys, bad items, undecodable bytes, a media type that is not
//! `type/subtype`. [`Error::RuntimeRecord`] means a valid request could not be
//! served: no codec for the media type, or an encoder that gave up.
//!
//! ## Logging
//!
//! Registry lookups and codec failures emit [`tracing`] events at `debug`
//! level. The crate never installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - building and parsing records in every media type
//! - **`dynamic_values.rs`** - entities, error handling and the `value!` macro
//!
//! Run any demo with: `cargo run --example <name>`

pub mod codec;
pub mod de;
pub mod entity;
pub mod error;
pub mod factory;
pub mod macros;
pub mod map;
pub mod media_type;
pub mod name;
pub mod normalize;
pub mod options;
pub mod path;
pub mod record;
pub mod ser;
pub mod value;

pub use codec::{RecordBuilder, RecordParser};
pub use entity::{AnyRecordEntity, GenericRecordEntity, RecordEntity};
pub use error::{Error, ErrorCode, Result};
pub use factory::RecordFactory;
pub use map::Map;
pub use options::{Delimiter, JsonOptions, NativeOptions};
pub use path::{Path, Segment};
pub use record::{Item, Record};
pub use value::{Number, Value};

use std::io;
use std::sync::LazyLock;

static DEFAULT_FACTORY: LazyLock<RecordFactory> = LazyLock::new(RecordFactory::new);

/// Returns the process-wide factory with the builtin registrations.
#[must_use]
pub fn default_factory() -> &'static RecordFactory {
    &DEFAULT_FACTORY
}

/// Validates `data` and returns it as a [`Record`].
///
/// # Examples
///
/// ```rust
/// use serde_record::{normalize, value};
///
/// let data = value!({ "foo": "bar", "baz": [] });
/// let record = normalize(data.as_object().unwrap()).unwrap();
/// assert_eq!(record.len(), 2);
/// ```
///
/// # Errors
///
/// Fails with [`Error::InvalidRecord`] on the first invalid key or item.
pub fn normalize(data: &Map) -> Result<Record> {
    normalize::normalize_data(data)
}

/// Parses `bytes` of the given media type.
///
/// # Examples
///
/// ```rust
/// use serde_record::{from_slice, Item};
///
/// let record = from_slice("TEXT/JSON", br#"{"foo":"bar"}"#).unwrap();
/// assert_eq!(record.get("foo").and_then(Item::as_str), Some("bar"));
/// ```
///
/// # Errors
///
/// Fails if the media type is malformed or has no parser, if the bytes cannot
/// be decoded, or if the decoded data is not a valid record.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(media_type: &str, bytes: &[u8]) -> Result<Record> {
    DEFAULT_FACTORY.parser(media_type)?.parse(bytes)
}

/// Reads everything from `reader` and parses it as the given media type.
///
/// # Errors
///
/// Same as [`from_slice`], plus [`Error::RuntimeRecord`] if reading fails.
pub fn from_reader<R: io::Read>(media_type: &str, mut reader: R) -> Result<Record> {
    let parser = DEFAULT_FACTORY.parser(media_type)?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::runtime(ErrorCode::InternalError, e))?;
    parser.parse(&bytes)
}

/// Builds `data` as the given media type.
///
/// # Examples
///
/// ```rust
/// use serde_record::{to_vec, value};
///
/// let data = value!({ "foo": "bar", "baz": [] });
/// let bytes = to_vec("application/json", data.as_object().unwrap()).unwrap();
/// assert_eq!(bytes, br#"{"foo":"bar","baz":[]}"#);
/// ```
///
/// # Errors
///
/// Fails if the media type is malformed or has no builder, if `data` is not a
/// valid record, or if encoding fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(media_type: &str, data: &Map) -> Result<Vec<u8>> {
    DEFAULT_FACTORY.builder(media_type)?.build(data)
}

/// Builds `data` as the given media type and writes it to `writer`.
///
/// # Errors
///
/// Same as [`to_vec`], plus [`Error::RuntimeRecord`] if writing fails.
pub fn to_writer<W: io::Write>(media_type: &str, mut writer: W, data: &Map) -> Result<()> {
    let bytes = to_vec(media_type, data)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::runtime(ErrorCode::InternalError, e))
}
