//! Record key rules.
//!
//! A key starts with an ASCII letter and continues with groups of ASCII
//! letters and digits, each group optionally introduced by exactly one of
//! `+`, `_`, `.` or `-`:
//!
//! ```text
//! ^[A-Za-z]+([+_.-]?[A-Za-z0-9]+)*$
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use serde_record::name::is_valid_name;
//!
//! assert!(is_valid_name("foo"));
//! assert!(is_valid_name("a.b-c"));
//! assert!(!is_valid_name("1two"));
//! assert!(!is_valid_name("umläutz"));
//! assert!(!is_valid_name("trailing-"));
//! ```

use crate::{Error, Path, Result};
use regex::Regex;
use std::sync::LazyLock;

// Explicit ASCII classes: a case-insensitive `[a-z]` would also match
// Unicode case variants such as U+212A KELVIN SIGN.
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?:[+_.\-]?[A-Za-z0-9]+)*$").unwrap());

/// Returns `true` if `name` may be used as a record key.
#[inline]
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Fails with [`Error::InvalidRecord`] if `name` may not be used as a record key.
///
/// `path` locates the record the key belongs to and is quoted in the error
/// message.
///
/// # Examples
///
/// ```rust
/// use serde_record::{name::validate_name, Path};
///
/// assert!(validate_name("foo", &Path::root()).is_ok());
///
/// let err = validate_name("0", &Path::root().join("bar")).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid record key at /bar: \"0\"");
/// ```
pub fn validate_name(name: &str, path: &Path) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::invalid_name(path, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_valid_names() {
        for name in ["a", "foo", "fooBar", "x1", "a+b", "a_b", "a.b", "a-b", "a.b-c", "abc123def"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in [
            "", "0", "1two", "_a", "-a", ".a", "a-", "a__b", "a-.b", "a b", "a/b", "umläutz",
            "\u{212A}elvin", "a\n",
        ] {
            assert!(!is_valid_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_validate_name_error() {
        let err = validate_name("1two", &Path::root()).unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.code(), ErrorCode::InvalidRecord);
        assert_eq!(err.to_string(), "Invalid record key at /: \"1two\"");
    }
}
