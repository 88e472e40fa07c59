/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Objects become [`Value::Object`](crate::Value::Object) with keys in the
/// order written, arrays become [`Value::Array`](crate::Value::Array), and any
/// other expression goes through `Value::from`.
///
/// ```rust
/// use serde_record::{value, Value};
///
/// let data = value!({
///     "foo": "bar",
///     "baz": [1, 2.5, null],
///     "nested": { "flag": true }
/// });
/// assert_eq!(data.as_object().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
