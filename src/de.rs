//! Native notation input.
//!
//! The [`Deserializer`] reads the notation written by
//! [`Serializer`](crate::ser::Serializer) into untyped [`Map`] data. It only
//! checks structure (indentation, list headers and lengths, quoting); key
//! naming rules are left to [`normalize_data`](crate::normalize::normalize_data).
//!
//! Reading is line-based. Each line is indented by spaces only; nesting depth
//! is taken from the indentation of the first child line, so any consistent
//! step width is accepted. Blank lines are ignored.
//!
//! ```rust
//! use serde_record::{de::from_str, Value};
//!
//! let map = from_str("foo: bar\nbaz[2]: 1,\"two\"\nnested:\n  flag: true").unwrap();
//! assert_eq!(map.get("foo"), Some(&Value::from("bar")));
//! assert_eq!(map.get("baz"), Some(&Value::Array(vec![Value::from(1), Value::from("two")])));
//! assert!(map.get("nested").unwrap().is_object());
//! ```

use crate::error::SyntaxError;
use crate::options::Delimiter;
use crate::{Map, Number, Value};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Deepest nesting of records and block lists the reader accepts.
pub const MAX_DEPTH: usize = 128;

#[derive(Clone, Copy, Debug)]
struct Line<'de> {
    number: usize,
    indent: usize,
    text: &'de str,
}

impl Line<'_> {
    fn is_list_item(&self) -> bool {
        self.text == "-" || self.text.starts_with("- ")
    }

    fn error(&self, msg: &str) -> SyntaxError {
        SyntaxError::new(self.number, msg)
    }
}

/// A parsed list header: `[N]`, `[#N]`, `[N|]` or `[N\t]` followed by `:`.
struct Header<'de> {
    len: usize,
    delimiter: Delimiter,
    tail: &'de str,
}

/// The native notation reader.
///
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    lines: Vec<Line<'de>>,
    position: usize,
    depth: usize,
}

impl<'de> Deserializer<'de> {
    /// Splits `input` into lines and measures their indentation.
    ///
    /// # Errors
    ///
    /// Fails if a line is indented with a tab.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Result<Self> {
        let mut lines = Vec::new();
        for (index, raw) in input.lines().enumerate() {
            let text = raw.trim_start_matches(' ');
            let indent = raw.len() - text.len();
            if text.starts_with('\t') {
                return Err(SyntaxError::new(index + 1, "tab in indentation"));
            }
            let text = text.trim_end();
            if !text.is_empty() {
                lines.push(Line {
                    number: index + 1,
                    indent,
                    text,
                });
            }
        }
        Ok(Deserializer {
            lines,
            position: 0,
            depth: 0,
        })
    }

    /// Reads the whole input as a top-level record.
    ///
    /// # Errors
    ///
    /// Fails on the first structural problem, reporting its line. Input
    /// nested deeper than [`MAX_DEPTH`] is rejected.
    pub fn parse_document(mut self) -> Result<Map> {
        match self.peek() {
            None => Ok(Map::new()),
            Some(first) if first.indent > 0 => Err(first.error("unexpected indentation")),
            Some(_) => self.parse_record(0),
        }
    }

    fn peek(&self) -> Option<Line<'de>> {
        self.lines.get(self.position).copied()
    }

    fn descend(&mut self, line: Line<'de>) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(line.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_record(&mut self, indent: usize) -> Result<Map> {
        let mut map = Map::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(line.error("unexpected indentation"));
            }
            if line.is_list_item() {
                return Err(line.error("list item outside of a list"));
            }
            self.position += 1;

            let (key, rest) = split_key(line)?;
            if map.contains_key(key) {
                return Err(line.error(&format!("duplicate key \"{}\"", key)));
            }
            let value = self.parse_entry(rest, line)?;
            map.insert(key.to_string(), value);
        }
        Ok(map)
    }

    /// Parses what follows a key: `: scalar`, `:` plus a nested block, or a
    /// list header.
    fn parse_entry(&mut self, rest: &'de str, line: Line<'de>) -> Result<Value> {
        if rest.starts_with('[') {
            let header = parse_header(rest, line)?;
            return self.parse_list(header, line);
        }

        let tail = rest[1..].trim();
        if tail.is_empty() {
            self.parse_nested(line.indent)
        } else {
            parse_scalar(tail, line)
        }
    }

    fn parse_nested(&mut self, parent_indent: usize) -> Result<Value> {
        match self.peek() {
            Some(next) if next.indent > parent_indent => {
                self.descend(next)?;
                let map = self.parse_record(next.indent)?;
                self.depth -= 1;
                Ok(Value::Object(map))
            }
            _ => Ok(Value::Object(Map::new())),
        }
    }

    fn parse_list(&mut self, header: Header<'de>, line: Line<'de>) -> Result<Value> {
        let tail = header.tail.trim();
        if !tail.is_empty() {
            let values = split_delimited(tail, header.delimiter, line)?
                .into_iter()
                .map(|piece| parse_scalar(piece, line))
                .collect::<Result<Vec<_>>>()?;
            if values.len() != header.len {
                return Err(count_mismatch(line, header.len, values.len()));
            }
            return Ok(Value::Array(values));
        }

        if header.len == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        let item_indent = match self.peek() {
            Some(next) if next.indent > line.indent => {
                self.descend(next)?;
                next.indent
            }
            _ => return Err(count_mismatch(line, header.len, 0)),
        };

        // The declared length is untrusted, so it only bounds the loop.
        let mut values = Vec::new();
        while values.len() < header.len {
            match self.peek() {
                Some(next) if next.indent == item_indent && next.is_list_item() => {
                    self.position += 1;
                    values.push(self.parse_list_item(next)?);
                }
                Some(next) if next.indent == item_indent => {
                    return Err(next.error("expected list item"));
                }
                _ => return Err(count_mismatch(line, header.len, values.len())),
            }
        }

        if let Some(next) = self.peek() {
            if next.indent == item_indent && next.is_list_item() {
                return Err(next.error(&format!("list declares {} items, found more", header.len)));
            }
        }

        self.depth -= 1;
        Ok(Value::Array(values))
    }

    fn parse_list_item(&mut self, line: Line<'de>) -> Result<Value> {
        let content = line.text[1..].trim();
        if content.is_empty() {
            self.parse_nested(line.indent)
        } else if content.starts_with('[') {
            let header = parse_header(content, line)?;
            self.parse_list(header, line)
        } else {
            parse_scalar(content, line)
        }
    }
}

fn count_mismatch(line: Line<'_>, declared: usize, found: usize) -> SyntaxError {
    line.error(&format!("list declares {} items, found {}", declared, found))
}

/// Splits `key: ...` or `key[N]: ...` into the key and the rest, which starts
/// with `:` or `[`.
fn split_key(line: Line<'_>) -> Result<(&str, &str)> {
    let split = line
        .text
        .find(|c| c == ':' || c == '[')
        .ok_or_else(|| line.error("expected ':' after key"))?;
    let key = line.text[..split].trim_end();
    if key.is_empty() {
        return Err(line.error("missing key"));
    }
    Ok((key, &line.text[split..]))
}

fn parse_header<'de>(text: &'de str, line: Line<'de>) -> Result<Header<'de>> {
    let close = text
        .find(']')
        .ok_or_else(|| line.error("unterminated list header"))?;
    let mut inner = &text[1..close];

    // Optional length marker such as '#'.
    if let Some(first) = inner.chars().next() {
        if !first.is_ascii_digit() {
            inner = &inner[first.len_utf8()..];
        }
    }

    let digits = inner.len() - inner.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return Err(line.error("missing list length"));
    }
    let len = inner[..digits]
        .parse::<usize>()
        .map_err(|_| line.error("invalid list length"))?;

    let delimiter = match &inner[digits..] {
        "" => Delimiter::Comma,
        suffix => {
            let mut chars = suffix.chars();
            match (chars.next().and_then(Delimiter::from_char), chars.next()) {
                (Some(delimiter), None) => delimiter,
                _ => return Err(line.error("invalid list delimiter")),
            }
        }
    };

    let tail = text[close + 1..]
        .strip_prefix(':')
        .ok_or_else(|| line.error("expected ':' after list header"))?;

    Ok(Header {
        len,
        delimiter,
        tail,
    })
}

/// Splits an inline list on `delimiter`, ignoring delimiters inside quotes.
fn split_delimited<'de>(
    text: &'de str,
    delimiter: Delimiter,
    line: Line<'_>,
) -> Result<Vec<&'de str>> {
    let delimiter = delimiter.as_char();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if in_quotes && ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_quotes = !in_quotes;
        } else if !in_quotes && ch == delimiter {
            pieces.push(text[start..i].trim());
            start = i + ch.len_utf8();
        }
    }

    if in_quotes {
        return Err(line.error("unterminated string"));
    }
    pieces.push(text[start..].trim());
    Ok(pieces)
}

fn parse_scalar(text: &str, line: Line<'_>) -> Result<Value> {
    if text.starts_with('"') {
        let (s, rest) = parse_quoted(text, line)?;
        if !rest.trim().is_empty() {
            return Err(line.error("unexpected characters after string"));
        }
        return Ok(Value::String(s));
    }

    match text {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Number(Number::Integer(i)));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok(Value::Number(Number::Float(f)));
    }

    Ok(Value::String(text.to_string()))
}

/// Reads a quoted string starting at `text[0]`, returning its contents and
/// whatever follows the closing quote.
fn parse_quoted<'a>(text: &'a str, line: Line<'_>) -> Result<(String, &'a str)> {
    let mut result = String::new();
    let mut chars = text.char_indices().skip(1);

    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((result, &text[i + 1..])),
            '\\' => {
                let (_, escaped) = chars
                    .next()
                    .ok_or_else(|| line.error("unterminated string"))?;
                match escaped {
                    '"' => result.push('"'),
                    '\\' => result.push('\\'),
                    '/' => result.push('/'),
                    'n' => result.push('\n'),
                    'r' => result.push('\r'),
                    't' => result.push('\t'),
                    'b' => result.push('\u{0008}'),
                    'f' => result.push('\u{000C}'),
                    '0' => result.push('\0'),
                    'u' => {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            let digit = chars
                                .next()
                                .and_then(|(_, c)| c.to_digit(16))
                                .ok_or_else(|| line.error("invalid unicode escape"))?;
                            code = code * 16 + digit;
                        }
                        let c = char::from_u32(code)
                            .ok_or_else(|| line.error("invalid unicode escape"))?;
                        result.push(c);
                    }
                    other => {
                        return Err(line.error(&format!("invalid escape sequence \\{}", other)));
                    }
                }
            }
            c => result.push(c),
        }
    }

    Err(line.error("unterminated string"))
}

/// Parses a native notation document into untyped data.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] found.
pub fn from_str(input: &str) -> Result<Map> {
    Deserializer::from_str(input)?.parse_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn object(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(from_str("").unwrap(), Map::new());
        assert_eq!(from_str("\n  \n").unwrap(), Map::new());
    }

    #[test]
    fn test_scalars() {
        let map = from_str("a: null\nb: true\nc: -7\nd: 2.5\ne: hello world\nf: \"42\"").unwrap();
        assert_eq!(
            map,
            object(value!({
                "a": null,
                "b": true,
                "c": (-7),
                "d": 2.5,
                "e": "hello world",
                "f": "42"
            }))
        );
    }

    #[test]
    fn test_nested_records() {
        let map = from_str("outer:\n    inner:\n        leaf: 1\nnext: 2\nempty:").unwrap();
        assert_eq!(
            map,
            object(value!({ "outer": { "inner": { "leaf": 1 } }, "next": 2, "empty": {} }))
        );
    }

    #[test]
    fn test_inline_lists() {
        let map = from_str("a[0]:\nb[3]: 1, \"x,y\" ,null\nc[#2|]: p|q\nd[2\t]: r\ts").unwrap();
        assert_eq!(
            map,
            object(value!({
                "a": [],
                "b": [1, "x,y", null],
                "c": ["p", "q"],
                "d": ["r", "s"]
            }))
        );
    }

    #[test]
    fn test_list_items() {
        let input = "mixed[4]:\n  - 1\n  - [2]: 2,3\n  -\n    k: v\n  - [1]:\n    - [1]: 4";
        assert_eq!(
            from_str(input).unwrap(),
            object(value!({ "mixed": [1, [2, 3], { "k": "v" }, [[4]]] }))
        );
    }

    #[test]
    fn test_escapes() {
        let map = from_str(r#"s: "a\"b\\c\nd\u00e9""#).unwrap();
        assert_eq!(map.get("s"), Some(&Value::from("a\"b\\c\nd\u{e9}")));
    }

    #[test]
    fn test_syntax_errors() {
        let cases = [
            ("  a: 1", 1, "unexpected indentation"),
            ("a: 1\n\tb: 2", 2, "tab in indentation"),
            ("a: 1\na: 2", 2, "duplicate key \"a\""),
            ("just words", 1, "expected ':' after key"),
            (": 1", 1, "missing key"),
            ("a[2]: 1", 1, "list declares 2 items, found 1"),
            ("a[2]:\n  - 1", 1, "list declares 2 items, found 1"),
            ("a[1]:\n  - 1\n  - 2", 3, "list declares 1 items, found more"),
            ("a[x]: 1", 1, "missing list length"),
            ("a[1;]: 1", 1, "invalid list delimiter"),
            ("a[1 1", 1, "unterminated list header"),
            ("a: \"open", 1, "unterminated string"),
            ("a: \"x\" y", 1, "unexpected characters after string"),
            ("a: \"\\q\"", 1, "invalid escape sequence \\q"),
            ("- 1", 1, "list item outside of a list"),
            ("a: 1\n    b: 2", 2, "unexpected indentation"),
        ];
        for (input, line, msg) in cases {
            let err = from_str(input).unwrap_err();
            assert_eq!(err, SyntaxError::new(line, msg), "{input:?}");
        }
    }

    #[test]
    fn test_declared_length_is_not_trusted() {
        let input = format!("a[{}]:\n  - 1", usize::MAX);
        assert_eq!(
            from_str(&input).unwrap_err(),
            SyntaxError::new(1, &format!("list declares {} items, found 1", usize::MAX))
        );

        assert_eq!(
            from_str("a[1000000000000]:\n  - 1\n  - 2").unwrap_err(),
            SyntaxError::new(1, "list declares 1000000000000 items, found 2")
        );
        assert_eq!(
            from_str("a[99999999999999999999999]:\n  - 1").unwrap_err(),
            SyntaxError::new(1, "invalid list length")
        );
    }

    fn nested_records(levels: usize) -> String {
        (0..levels)
            .map(|level| format!("{}a:\n", "  ".repeat(level)))
            .collect()
    }

    fn nested_lists(levels: usize) -> String {
        let mut input = "a[1]:\n".to_string();
        for level in 1..levels {
            input.push_str(&format!("{}- [1]:\n", "  ".repeat(level)));
        }
        input.push_str(&format!("{}- 1\n", "  ".repeat(levels)));
        input
    }

    #[test]
    fn test_nesting_limit_for_records() {
        let map = from_str(&nested_records(MAX_DEPTH + 1)).unwrap();
        let mut depth = 0;
        let mut current = &map;
        while let Some(Value::Object(inner)) = current.get("a") {
            depth += 1;
            current = inner;
        }
        assert_eq!(depth, MAX_DEPTH + 1);

        assert_eq!(
            from_str(&nested_records(MAX_DEPTH + 2)).unwrap_err(),
            SyntaxError::new(MAX_DEPTH + 2, "nesting too deep")
        );
    }

    #[test]
    fn test_nesting_limit_for_lists() {
        assert!(from_str(&nested_lists(MAX_DEPTH)).is_ok());
        assert_eq!(
            from_str(&nested_lists(MAX_DEPTH + 1)).unwrap_err(),
            SyntaxError::new(MAX_DEPTH + 2, "nesting too deep")
        );
    }

    #[test]
    fn test_deep_input_fails_without_overflowing() {
        let err = from_str(&nested_records(2000)).unwrap_err();
        assert_eq!(err, SyntaxError::new(MAX_DEPTH + 2, "nesting too deep"));
    }

    #[test]
    fn test_keys_are_not_validated() {
        let map = from_str("0: zero").unwrap();
        assert_eq!(map.get("0"), Some(&Value::from("zero")));
    }
}
