//! Untyped input data.
//!
//! [`Value`] is what a decoder produces and what callers hand to builders and
//! entities: arbitrarily nested data that has not been checked yet. It is
//! deliberately wider than a record may be. Besides scalars, arrays and
//! objects it can hold byte blobs, timestamps and big integers, none of which
//! a record accepts, so the normalizer has something concrete to reject.
//!
//! ## Core Types
//!
//! - [`Value`]: any input value
//! - [`Number`]: an integer or floating-point number
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_record::{value, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "tags": ["admin", "dev"]
//! });
//! assert!(obj.is_object());
//! assert_eq!(text.kind(), "string");
//! ```

use crate::Map;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A dynamically-typed, not yet validated value.
///
/// # Examples
///
/// ```rust
/// use serde_record::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let blob = Value::Bytes(vec![0xde, 0xad]);
///
/// assert!(num.is_scalar());
/// assert!(!blob.is_scalar());
/// assert_eq!(blob.kind(), "bytes");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    Bytes(Vec<u8>),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// An integer or floating-point number.
///
/// Unsigned integers that do not fit into an `i64` are stored as floats.
///
/// Equality is by variant and value, except that any NaN equals any other
/// NaN, so records holding NaN still compare equal to their own copies.
/// `Integer(1)` and `Float(1.0)` are not equal.
///
/// # Examples
///
/// ```rust
/// use serde_record::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::from(u64::MAX).as_f64(), u64::MAX as f64);
/// ```
#[derive(Clone, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` unless this is a NaN or infinite float.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    /// Converts this number to an `i64` if it is integral and in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

/// Integral floats keep a trailing `.0` so they read back as floats.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => {
                let text = fl.to_string();
                if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Float(value as f64),
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for null, booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// Names the kind of value, as quoted in validation errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Float(_)) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::BigInt(_) => "bigint",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::Bytes(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_keeps_float_marker() {
        assert_eq!(Number::Integer(42).to_string(), "42");
        assert_eq!(Number::Float(42.0).to_string(), "42.0");
        assert_eq!(Number::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Number::Float(3.5).to_string(), "3.5");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_number_equality() {
        assert_eq!(Number::Float(f64::NAN), Number::Float(f64::NAN));
        assert_eq!(Number::Float(0.0), Number::Float(-0.0));
        assert_ne!(Number::Float(f64::NAN), Number::Float(1.0));
        assert_ne!(Number::Integer(1), Number::Float(1.0));
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert_eq!(Number::from(7u64), Number::Integer(7));
        assert!(Number::from(u64::MAX).is_float());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(1).kind(), "integer");
        assert_eq!(Value::from(1.5).kind(), "float");
        assert_eq!(Value::from(BigInt::from(5)).kind(), "bigint");
        assert_eq!(Value::from(Utc::now()).kind(), "date");
        assert_eq!(Value::from(vec![1u8, 2]).kind(), "bytes");
    }

    #[test]
    fn test_scalar_classification() {
        assert!(Value::Null.is_scalar());
        assert!(Value::from("x").is_scalar());
        assert!(!Value::Array(vec![]).is_scalar());
        assert!(!Value::Object(Map::new()).is_scalar());
        assert!(!Value::from(BigInt::from(1)).is_scalar());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let value: Value = serde_json::from_str(r#"{"b":1,"a":[true,null],"c":2.5}"#).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(
            obj.get("a"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(obj.get("c").and_then(Value::as_f64), Some(2.5));
    }
}
