//! Media type registry.
//!
//! A [`RecordFactory`] maps media types to parser and builder constructors.
//! Lookups are case-insensitive and validate the media type first, so a
//! malformed type string is reported as such rather than as "not registered".
//! Each lookup returns a fresh codec with default options.
//!
//! | Media type | Parser | Builder |
//! |------------|--------|---------|
//! | `application/json`, `text/json`, `text/x-json` | JSON | JSON |
//! | `application/vnd.serde-record.serialized` | native | native |
//! | `application/textedit`, `zz-application/zz-winassoc-ini` | INI | none |
//!
//! ```rust
//! use serde_record::{value, RecordFactory};
//!
//! let factory = RecordFactory::new();
//! assert!(factory.has_parser("TEXT/JSON").unwrap());
//! assert!(!factory.has_builder("application/textedit").unwrap());
//!
//! let builder = factory.builder("application/json").unwrap();
//! let data = value!({ "foo": "bar", "baz": [] });
//! assert_eq!(builder.build(data.as_object().unwrap()).unwrap(), br#"{"foo":"bar","baz":[]}"#);
//! ```

use crate::codec::{
    IniParser, JsonBuilder, JsonParser, NativeBuilder, NativeParser, RecordBuilder, RecordParser,
};
use crate::media_type::{self, normalize_type};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

type ParserFn = fn() -> Box<dyn RecordParser>;
type BuilderFn = fn() -> Box<dyn RecordBuilder>;

/// Provides parsers and builders by media type.
///
/// The registrations are fixed at construction and never change, so a
/// factory can be shared freely between threads.
pub struct RecordFactory {
    parsers: HashMap<&'static str, ParserFn>,
    builders: HashMap<&'static str, BuilderFn>,
}

impl Default for RecordFactory {
    fn default() -> Self {
        let json_parser: ParserFn = || Box::new(JsonParser::new());
        let native_parser: ParserFn = || Box::new(NativeParser::new());
        let ini_parser: ParserFn = || Box::new(IniParser::new());
        let json_builder: BuilderFn = || Box::new(JsonBuilder::new());
        let native_builder: BuilderFn = || Box::new(NativeBuilder::new());

        let parsers = HashMap::from([
            (media_type::APPLICATION_JSON, json_parser),
            (media_type::TEXT_JSON, json_parser),
            (media_type::TEXT_X_JSON, json_parser),
            (media_type::APPLICATION_NATIVE, native_parser),
            (media_type::APPLICATION_TEXTEDIT, ini_parser),
            (media_type::ZZ_WINASSOC_INI, ini_parser),
        ]);

        let builders = HashMap::from([
            (media_type::APPLICATION_JSON, json_builder),
            (media_type::TEXT_JSON, json_builder),
            (media_type::TEXT_X_JSON, json_builder),
            (media_type::APPLICATION_NATIVE, native_builder),
        ]);

        RecordFactory { parsers, builders }
    }
}

impl RecordFactory {
    /// Creates a factory with the builtin registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a parser is registered for `media_type`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`] (code `NotSupported`) if
    /// `media_type` is malformed.
    pub fn has_parser(&self, media_type: &str) -> Result<bool> {
        let key = normalize_type(media_type)?;
        Ok(self.parsers.contains_key(key.as_str()))
    }

    /// Returns whether a builder is registered for `media_type`.
    ///
    /// # Errors
    ///
    /// Same as [`has_parser`](Self::has_parser).
    pub fn has_builder(&self, media_type: &str) -> Result<bool> {
        let key = normalize_type(media_type)?;
        Ok(self.builders.contains_key(key.as_str()))
    }

    /// Returns a new parser for `media_type`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRecord`] if `media_type` is malformed, or
    /// with [`Error::RuntimeRecord`] (code `NotSupported`) if no parser is
    /// registered for it.
    pub fn parser(&self, media_type: &str) -> Result<Box<dyn RecordParser>> {
        let key = normalize_type(media_type)?;
        match self.parsers.get(key.as_str()) {
            Some(create) => {
                debug!(media_type = %key, "providing parser");
                Ok(create())
            }
            None => {
                debug!(media_type = %key, "no parser registered");
                Err(Error::not_supported(&key, "parser"))
            }
        }
    }

    /// Returns a new builder for `media_type`.
    ///
    /// # Errors
    ///
    /// Same as [`parser`](Self::parser).
    pub fn builder(&self, media_type: &str) -> Result<Box<dyn RecordBuilder>> {
        let key = normalize_type(media_type)?;
        match self.builders.get(key.as_str()) {
            Some(create) => {
                debug!(media_type = %key, "providing builder");
                Ok(create())
            }
            None => {
                debug!(media_type = %key, "no builder registered");
                Err(Error::not_supported(&key, "builder"))
            }
        }
    }

    /// The media types a parser is registered for, sorted.
    #[must_use]
    pub fn parser_types(&self) -> Vec<&'static str> {
        sorted_keys(&self.parsers)
    }

    /// The media types a builder is registered for, sorted.
    #[must_use]
    pub fn builder_types(&self) -> Vec<&'static str> {
        sorted_keys(&self.builders)
    }
}

fn sorted_keys<V>(map: &HashMap<&'static str, V>) -> Vec<&'static str> {
    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort_unstable();
    keys
}
