//! Media type rules.
//!
//! A media type is `type/subtype`, both halves following the same token
//! grammar as record keys. Wildcards and additional path segments are not
//! accepted. Media types compare case-insensitively, so lookups go through
//! [`normalize_type`] first.
//!
//! ```rust
//! use serde_record::media_type::{is_valid_type, normalize_type};
//!
//! assert!(is_valid_type("application/vnd.serde-record.serialized"));
//! assert!(!is_valid_type("*/*"));
//! assert_eq!(normalize_type("TEXT/JSON").unwrap(), "text/json");
//! ```

use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static MEDIA_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+(?:[+_.\-]?[A-Za-z0-9]+)*/[A-Za-z]+(?:[+_.\-]?[A-Za-z0-9]+)*$")
        .unwrap()
});

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `text/json`
pub const TEXT_JSON: &str = "text/json";
/// `text/x-json`
pub const TEXT_X_JSON: &str = "text/x-json";
/// The crate's own textual notation, see [`crate::ser`] and [`crate::de`].
pub const APPLICATION_NATIVE: &str = "application/vnd.serde-record.serialized";
/// `application/textedit`, one of the names INI files travel under
pub const APPLICATION_TEXTEDIT: &str = "application/textedit";
/// `zz-application/zz-winassoc-ini`, the other one
pub const ZZ_WINASSOC_INI: &str = "zz-application/zz-winassoc-ini";

/// Returns `true` if `media_type` is a well-formed `type/subtype` string.
#[inline]
#[must_use]
pub fn is_valid_type(media_type: &str) -> bool {
    MEDIA_TYPE.is_match(media_type)
}

/// Fails with [`Error::InvalidRecord`] (code `NotSupported`) on a malformed
/// media type.
pub fn validate_type(media_type: &str) -> Result<()> {
    if is_valid_type(media_type) {
        Ok(())
    } else {
        Err(Error::invalid_type(media_type))
    }
}

/// Validates `media_type` and returns its lowercase form.
///
/// # Errors
///
/// Same as [`validate_type`].
pub fn normalize_type(media_type: &str) -> Result<String> {
    validate_type(media_type)?;
    Ok(media_type.to_ascii_lowercase())
}
