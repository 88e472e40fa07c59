//! Objects that carry or produce a record.
//!
//! [`AnyRecordEntity`] is the common interface: anything that can hand out a
//! [`Record`]. Two implementations ship with the crate:
//!
//! - [`RecordEntity`] holds a record and edits it property by property. Every
//!   write is validated, so the record it holds is always valid.
//! - [`GenericRecordEntity`] computes its record on demand from a closure and
//!   validates the result each time.
//!
//! ```rust
//! use serde_record::{value, AnyRecordEntity, Item, RecordEntity};
//!
//! let mut entity = RecordEntity::new();
//! entity.set_property("name", "Alice").unwrap();
//! entity.set_property("tags", value!(["admin", "dev"])).unwrap();
//!
//! assert_eq!(entity.property("name").unwrap().as_str(), Some("Alice"));
//! assert!(entity.set_property("1st", "x").is_err());
//! assert_eq!(entity.record().unwrap().len(), 2);
//! ```

use crate::name::{is_valid_name, validate_name};
use crate::normalize::{normalize_data, normalize_item_at};
use crate::{Error, ErrorCode, Item, Map, Path, Record, Result, Value};
use tracing::debug;

/// Anything that can provide a [`Record`].
pub trait AnyRecordEntity {
    /// Returns the entity's current record.
    ///
    /// # Errors
    ///
    /// Implementations that compute the record may fail; see
    /// [`GenericRecordEntity`].
    fn record(&self) -> Result<Record>;
}

/// An entity holding a record that can be edited one property at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordEntity {
    record: Record,
}

impl RecordEntity {
    /// Creates an entity with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity holding `data`.
    ///
    /// # Errors
    ///
    /// Fails like [`normalize_data`] if `data` is not a valid record.
    pub fn create(data: &Map) -> Result<Self> {
        Ok(RecordEntity {
            record: normalize_data(data)?,
        })
    }

    /// Sets `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`] if `key` is not a valid name or
    /// `value` is not a valid item. The entity is left unchanged.
    pub fn set_property<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<()> {
        let root = Path::root();
        validate_name(key, &root)?;
        let item = normalize_item_at(&value.into(), &mut root.join(key))?;
        self.record.insert(key.to_string(), item);
        Ok(())
    }

    /// Returns the value of `key`. A null value is returned as [`Item::Null`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`] if `key` is not a valid name, with
    /// code `NotFound` if the record has no such key.
    pub fn property(&self, key: &str) -> Result<&Item> {
        validate_name(key, &Path::root())?;
        self.record.get(key).ok_or_else(|| Error::not_found(key))
    }

    /// Returns the value of `key`, or `fallback` if it is missing or null.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`] if `key` is not a valid name.
    pub fn property_or(&self, key: &str, fallback: Item) -> Result<Item> {
        validate_name(key, &Path::root())?;
        match self.record.get(key) {
            None | Some(Item::Null) => Ok(fallback),
            Some(item) => Ok(item.clone()),
        }
    }

    /// Returns `true` if `key` is a valid name holding a non-null value.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        is_valid_name(key) && self.record.get(key).is_some_and(|item| !item.is_null())
    }

    /// Replaces the whole record with `data`.
    ///
    /// # Errors
    ///
    /// Fails like [`normalize_data`]. The entity is left unchanged.
    pub fn set_record(&mut self, data: &Map) -> Result<()> {
        self.record = normalize_data(data)?;
        Ok(())
    }

    /// Borrows the record without cloning it.
    #[must_use]
    pub fn as_record(&self) -> &Record {
        &self.record
    }
}

impl From<Record> for RecordEntity {
    fn from(record: Record) -> Self {
        RecordEntity { record }
    }
}

impl AnyRecordEntity for RecordEntity {
    fn record(&self) -> Result<Record> {
        Ok(self.record.clone())
    }
}

/// An entity whose record is produced by a closure.
///
/// The closure's output is normalized on every call. If the closure fails or
/// returns invalid data, [`record`](AnyRecordEntity::record) fails with
/// [`Error::RuntimeRecord`] (code `InternalError`) and keeps the cause as its
/// source.
///
/// # Examples
///
/// ```rust
/// use serde_record::{value, AnyRecordEntity, Error, ErrorCode, GenericRecordEntity, Value};
///
/// let entity = GenericRecordEntity::new(|| match value!({ "answer": 42 }) {
///     Value::Object(map) => Ok(map),
///     _ => Err(Error::runtime(ErrorCode::InternalError, "unreachable")),
/// });
/// assert_eq!(entity.record().unwrap().len(), 1);
///
/// let broken = GenericRecordEntity::new(|| Err(Error::not_found("answer")));
/// let err = broken.record().unwrap_err();
/// assert!(err.is_runtime());
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// ```
pub struct GenericRecordEntity<F> {
    callback: F,
}

impl<F> GenericRecordEntity<F>
where
    F: Fn() -> Result<Map>,
{
    pub fn new(callback: F) -> Self {
        GenericRecordEntity { callback }
    }
}

impl<F> AnyRecordEntity for GenericRecordEntity<F>
where
    F: Fn() -> Result<Map>,
{
    fn record(&self) -> Result<Record> {
        (self.callback)()
            .and_then(|data| normalize_data(&data))
            .map_err(|cause| {
                debug!(error = %cause, "record callback failed");
                Error::runtime_caused_by(
                    ErrorCode::InternalError,
                    format!("Failed to retrieve record: {}", cause),
                    cause,
                )
            })
    }
}
