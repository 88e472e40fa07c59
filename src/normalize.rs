//! Record validation and normalization.
//!
//! Validation and normalization walk the input the same way: one generic
//! traversal, instantiated once with a collector that discards everything
//! ([`validate_data`]) and once with a collector that rebuilds the input as
//! a [`Record`] ([`normalize_data`]). Both therefore accept exactly the same
//! inputs and fail on the same item with the same error.
//!
//! ## Rules
//!
//! - Every key must satisfy [`is_valid_name`](crate::name::is_valid_name).
//! - Null, booleans, numbers and strings are copied as-is.
//! - Arrays are lists. Objects whose keys are exactly `"0"`, `"1"`, ...
//!   in that order are lists too, as are empty objects below the top level.
//!   Every other object is a nested record.
//! - Anything else (bytes, dates, big integers) is rejected.
//!
//! The first violation ends the walk. Errors are not accumulated.
//!
//! ```rust
//! use serde_record::{normalize::{is_valid_data, normalize_data}, value, Item};
//!
//! let data = value!({ "list": { "0": "a", "1": "b" }, "map": { "0": "a", "2": "b" } });
//! let data = data.as_object().unwrap();
//!
//! assert!(!is_valid_data(data));
//! let err = normalize_data(data).unwrap_err();
//! assert_eq!(err.to_string(), "Invalid record key at /map: \"0\"");
//! ```

use crate::name::validate_name;
use crate::{Error, Item, Map, Path, Record, Result, Value};

/// Receives the pieces of a record in the order the traversal accepts them.
trait Collect {
    type Item;
    type Record: Default;
    type List: Default;

    fn scalar(value: &Value) -> Self::Item;
    fn insert(record: &mut Self::Record, name: &str, item: Self::Item);
    fn push(list: &mut Self::List, item: Self::Item);
    fn list(list: Self::List) -> Self::Item;
    fn record(record: Self::Record) -> Self::Item;
}

/// Keeps nothing; only the traversal's verdict matters.
struct Check;

impl Collect for Check {
    type Item = ();
    type Record = ();
    type List = ();

    fn scalar(_: &Value) {}
    fn insert(_: &mut (), _: &str, _: ()) {}
    fn push(_: &mut (), _: ()) {}
    fn list(_: ()) {}
    fn record(_: ()) {}
}

/// Rebuilds the input as a [`Record`].
struct Canonical;

impl Collect for Canonical {
    type Item = Item;
    type Record = Record;
    type List = Vec<Item>;

    // Only reached for scalars.
    fn scalar(value: &Value) -> Item {
        match value {
            Value::Bool(b) => Item::Bool(*b),
            Value::Number(n) => Item::Number(n.clone()),
            Value::String(s) => Item::String(s.clone()),
            _ => Item::Null,
        }
    }

    fn insert(record: &mut Record, name: &str, item: Item) {
        record.insert(name.to_string(), item);
    }

    fn push(list: &mut Vec<Item>, item: Item) {
        list.push(item);
    }

    fn list(list: Vec<Item>) -> Item {
        Item::List(list)
    }

    fn record(record: Record) -> Item {
        Item::Record(record)
    }
}

/// Returns `true` if the keys of `map` are `"0"`, `"1"`, ... in order.
fn is_sequential(map: &Map) -> bool {
    map.keys()
        .enumerate()
        .all(|(index, key)| *key == index.to_string())
}

fn walk_data<C: Collect>(data: &Map, path: &mut Path) -> Result<C::Record> {
    let mut record = C::Record::default();
    for (name, value) in data {
        validate_name(name, path)?;
        path.push_key(name);
        let item = walk_item::<C>(value, path);
        path.pop();
        C::insert(&mut record, name, item?);
    }
    Ok(record)
}

fn walk_list<'a, C, I>(items: I, path: &mut Path) -> Result<C::Item>
where
    C: Collect,
    I: Iterator<Item = &'a Value>,
{
    let mut list = C::List::default();
    for (index, value) in items.enumerate() {
        path.push_index(index);
        let item = walk_item::<C>(value, path);
        path.pop();
        C::push(&mut list, item?);
    }
    Ok(C::list(list))
}

fn walk_item<C: Collect>(value: &Value, path: &mut Path) -> Result<C::Item> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(C::scalar(value)),
        Value::Array(items) => walk_list::<C, _>(items.iter(), path),
        Value::Object(map) if is_sequential(map) => walk_list::<C, _>(map.values(), path),
        Value::Object(map) => walk_data::<C>(map, path).map(C::record),
        other => Err(Error::invalid_item(path, other.kind())),
    }
}

/// Checks that `data` is a valid record.
///
/// # Errors
///
/// Fails with [`Error::InvalidRecord`] (code `InvalidRecord`) on the first key
/// or item that breaks the rules.
pub fn validate_data(data: &Map) -> Result<()> {
    walk_data::<Check>(data, &mut Path::root())
}

/// Returns `true` if [`validate_data`] would succeed.
#[must_use]
pub fn is_valid_data(data: &Map) -> bool {
    validate_data(data).is_ok()
}

/// Validates `data` and returns it in canonical form.
///
/// Normalizing is idempotent: `normalize_data(&normalize_data(d)?.to_map())`
/// returns the same record again.
///
/// # Errors
///
/// Exactly those of [`validate_data`].
pub fn normalize_data(data: &Map) -> Result<Record> {
    walk_data::<Canonical>(data, &mut Path::root())
}

/// Checks that `value` may appear as an item inside a record.
///
/// # Errors
///
/// Same as [`validate_data`], with paths relative to `value`.
pub fn validate_item(value: &Value) -> Result<()> {
    walk_item::<Check>(value, &mut Path::root())
}

/// Validates `value` as a record item and returns it in canonical form.
///
/// # Errors
///
/// Same as [`validate_item`].
pub fn normalize_item(value: &Value) -> Result<Item> {
    normalize_item_at(value, &mut Path::root())
}

pub(crate) fn normalize_item_at(value: &Value, path: &mut Path) -> Result<Item> {
    walk_item::<Canonical>(value, path)
}
