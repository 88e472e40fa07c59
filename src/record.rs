//! Canonical, validated records.
//!
//! A [`Record`] is an ordered mapping of valid keys to [`Item`]s. Records are
//! produced by [`normalize_data`](crate::normalize::normalize_data) (directly
//! or through a parser), so holding a `Record` means holding data that already
//! passed validation. There is no public way to insert into one.
//!
//! ```rust
//! use serde_record::{normalize, value, Item};
//!
//! let data = value!({ "foo": "bar", "baz": [1, 2] });
//! let record = normalize(data.as_object().unwrap()).unwrap();
//!
//! assert_eq!(record.get("foo").and_then(Item::as_str), Some("bar"));
//! assert_eq!(record.get("baz").and_then(Item::as_list).map(Vec::len), Some(2));
//! ```

use crate::{Map, Number, Value};
use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// One level of validated, nested data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(IndexMap<String, Item>);

/// A validated value: a scalar, a list or a nested record.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Item {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Item>),
    Record(Record),
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Callers guarantee `name` is a valid key and `item` was normalized.
    pub(crate) fn insert(&mut self, name: String, item: Item) -> Option<Item> {
        self.0.insert(name, item)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Item> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Item> {
        self.0.iter()
    }

    /// Converts the record back into untyped data, e.g. to hand it to a
    /// builder. Normalizing the result yields this record again.
    #[must_use]
    pub fn to_map(&self) -> Map {
        self.iter()
            .map(|(name, item)| (name.clone(), item.to_value()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Item);
    type IntoIter = indexmap::map::Iter<'a, String, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Record> for Map {
    fn from(record: Record) -> Self {
        record.to_map()
    }
}

impl Item {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Item::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Item::List(_) | Item::Record(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Item::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Item::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Item::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Item>> {
        match self {
            Item::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Item::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Converts the item back into untyped data.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Item::Null => Value::Null,
            Item::Bool(b) => Value::Bool(*b),
            Item::Number(n) => Value::Number(n.clone()),
            Item::String(s) => Value::String(s.clone()),
            Item::List(list) => Value::Array(list.iter().map(Item::to_value).collect()),
            Item::Record(record) => Value::Object(record.to_map()),
        }
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        item.to_value()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, item) in self {
            map.serialize_entry(name, item)?;
        }
        map.end()
    }
}

/// Non-finite floats are refused: no portable encoding exists for them.
impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Item::Null => serializer.serialize_unit(),
            Item::Bool(b) => serializer.serialize_bool(*b),
            Item::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Item::Number(Number::Float(f)) if f.is_finite() => serializer.serialize_f64(*f),
            Item::Number(Number::Float(f)) => Err(S::Error::custom(format!(
                "{} cannot be encoded as a number",
                f
            ))),
            Item::String(s) => serializer.serialize_str(s),
            Item::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Item::Record(record) => record.serialize(serializer),
        }
    }
}
