//! Native notation output.
//!
//! The native notation is an indentation-based text form of a [`Record`]:
//!
//! ```text
//! name: Alice
//! tags[3]: admin,dev,"x:y"
//! address:
//!   city: Berlin
//! history[2]:
//!   - [2]: 1,2
//!   -
//!     when: yesterday
//! ```
//!
//! - Scalars follow `key: `. Strings are bare unless they could be misread
//!   (empty, numeric-looking, `true`/`false`/`null`, surrounding whitespace,
//!   structural characters), in which case they are quoted and escaped.
//! - Nested records follow a bare `key:` on the lines below, one level deeper.
//! - Lists carry their length in a header, `key[N]:`. Lists of scalars are
//!   written inline; any other list puts one `- ` item per line below.
//!   A `-` with nothing after it opens a nested record.
//!
//! [`Deserializer`](crate::de::Deserializer) reads the same notation back.
//!
//! ```rust
//! use serde_record::{normalize, ser::to_string, value, NativeOptions};
//!
//! let data = value!({ "foo": "bar", "baz": [1, 2, 3] });
//! let record = normalize(data.as_object().unwrap()).unwrap();
//! assert_eq!(to_string(&record, &NativeOptions::default()), "foo: bar\nbaz[3]: 1,2,3");
//! ```

use crate::{Item, NativeOptions, Record};

/// Writes records in the native notation.
pub struct Serializer {
    output: String,
    options: NativeOptions,
}

impl Serializer {
    pub fn new(options: NativeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `record` as a top-level document.
    pub fn serialize_record(&mut self, record: &Record) {
        self.write_record(record, 0);
    }

    fn start_line(&mut self, depth: usize) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        for _ in 0..depth * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_record(&mut self, record: &Record, depth: usize) {
        for (name, item) in record {
            self.start_line(depth);
            // Record keys never need quoting.
            self.output.push_str(name);
            match item {
                Item::List(list) => self.write_list(list, depth),
                Item::Record(nested) => {
                    self.output.push(':');
                    self.write_record(nested, depth + 1);
                }
                scalar => {
                    self.output.push_str(": ");
                    self.write_scalar(scalar);
                }
            }
        }
    }

    fn write_header(&mut self, len: usize) {
        self.output.push('[');
        if let Some(marker) = self
            .options
            .length_marker
            .filter(|&marker| NativeOptions::is_valid_length_marker(marker))
        {
            self.output.push(marker);
        }
        self.output.push_str(&len.to_string());
        self.output.push_str(self.options.delimiter.header_suffix());
        self.output.push_str("]:");
    }

    fn write_list(&mut self, list: &[Item], depth: usize) {
        self.write_header(list.len());

        if list.iter().all(Item::is_scalar) {
            let delimiter = self.options.delimiter.as_char();
            for (i, element) in list.iter().enumerate() {
                self.output.push(if i == 0 { ' ' } else { delimiter });
                self.write_scalar(element);
            }
            return;
        }

        for element in list {
            self.start_line(depth + 1);
            self.output.push('-');
            match element {
                Item::List(inner) => {
                    self.output.push(' ');
                    self.write_list(inner, depth + 1);
                }
                Item::Record(nested) => self.write_record(nested, depth + 2),
                scalar => {
                    self.output.push(' ');
                    self.write_scalar(scalar);
                }
            }
        }
    }

    fn write_scalar(&mut self, item: &Item) {
        match item {
            Item::Null => self.output.push_str("null"),
            Item::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Item::Number(n) => self.output.push_str(&n.to_string()),
            Item::String(s) => self.write_string(s),
            Item::List(_) | Item::Record(_) => {}
        }
    }

    fn write_string(&mut self, s: &str) {
        if !needs_quotes(s, self.options.delimiter.as_char()) {
            self.output.push_str(s);
            return;
        }

        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                '\0' => self.output.push_str("\\0"),
                c if c.is_control() => self.output.push_str(&format!("\\u{:04x}", c as u32)),
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}

fn needs_quotes(s: &str, delimiter: char) -> bool {
    if s.is_empty() {
        return true;
    }

    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }

    if s.contains(|c: char| c == ':' || c == '"' || c == '\\' || c == delimiter || c.is_control()) {
        return true;
    }

    if s == "true" || s == "false" || s == "null" {
        return true;
    }

    // Would read back as a number, including "inf" and "NaN".
    if s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok() {
        return true;
    }

    // Would read back as a list header.
    s.starts_with('[')
}

/// Renders `record` in the native notation.
#[must_use]
pub fn to_string(record: &Record, options: &NativeOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_record(record);
    serializer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_data;
    use crate::{value, Delimiter, Value};

    fn render(data: Value) -> String {
        render_with(data, &NativeOptions::default())
    }

    fn render_with(data: Value, options: &NativeOptions) -> String {
        let record = normalize_data(data.as_object().unwrap()).unwrap();
        to_string(&record, options)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            render(value!({ "a": null, "b": true, "c": 42, "d": 2.0, "e": "text" })),
            "a: null\nb: true\nc: 42\nd: 2.0\ne: text"
        );
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(render(value!({})), "");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(
            render(value!({
                "a": "",
                "b": "42",
                "c": "true",
                "d": " padded",
                "e": "x:y",
                "f": "line\nbreak",
                "g": "[not a list",
                "h": "say \"hi\"",
                "i": "inf"
            })),
            concat!(
                "a: \"\"\n",
                "b: \"42\"\n",
                "c: \"true\"\n",
                "d: \" padded\"\n",
                "e: \"x:y\"\n",
                "f: \"line\\nbreak\"\n",
                "g: \"[not a list\"\n",
                "h: \"say \\\"hi\\\"\"\n",
                "i: \"inf\""
            )
        );
    }

    #[test]
    fn test_nested_records() {
        assert_eq!(
            render(value!({ "outer": { "inner": { "leaf": 1 } }, "next": 2 })),
            "outer:\n  inner:\n    leaf: 1\nnext: 2"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render(value!({ "empty": [], "flat": [1, "a,b", null] })),
            "empty[0]:\nflat[3]: 1,\"a,b\",null"
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            render(value!({ "mixed": [1, [2, 3], { "k": "v" }, [[4]]] })),
            concat!(
                "mixed[4]:\n",
                "  - 1\n",
                "  - [2]: 2,3\n",
                "  -\n",
                "    k: v\n",
                "  - [1]:\n",
                "    - [1]: 4"
            )
        );
    }

    #[test]
    fn test_options() {
        let options = NativeOptions::new()
            .with_indent(4)
            .with_delimiter(Delimiter::Pipe)
            .with_length_marker('#');
        assert_eq!(
            render_with(value!({ "a": { "b": ["x|y", "z,w"] } }), &options),
            "a:\n    b[#2|]: \"x|y\"|z,w"
        );
    }

    #[test]
    fn test_unusable_length_marker_is_not_written() {
        let data = value!({ "a": [1, 2] });
        for marker in ['1', ']', ':'] {
            let options = NativeOptions::new().with_length_marker(marker);
            assert_eq!(render_with(data.clone(), &options), "a[2]: 1,2");
        }
    }
}
