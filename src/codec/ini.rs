use super::RecordParser;
use crate::error::SyntaxError;
use crate::normalize::normalize_data;
use crate::{Error, Map, Number, Record, Result, Value};
use tracing::debug;

/// Parses INI-style configuration text.
///
/// - Blank lines and lines starting with `;` or `#` are skipped.
/// - `[section]` opens a nested record; keys before the first section go to
///   the top level. Repeating a section header continues that section.
/// - `key = value` sets a key, replacing earlier values; `key[] = value`
///   appends to a list.
/// - Values are typed: `true`/`on`/`yes`, `false`/`off`/`no`/`none`, `null`,
///   integers and floats. Anything else, or anything in single or double
///   quotes, is a string. In unquoted values `;` starts a comment.
///
/// # Examples
///
/// ```rust
/// use serde_record::codec::{IniParser, RecordParser};
/// use serde_record::Item;
///
/// let text = b"debug = on\n\n[server]\nhost = example.org\nport = 8080\nalias[] = a\nalias[] = b\n";
/// let record = IniParser::new().parse(text).unwrap();
///
/// assert_eq!(record.get("debug"), Some(&Item::Bool(true)));
/// let server = record.get("server").and_then(Item::as_record).unwrap();
/// assert_eq!(server.get("port").and_then(Item::as_i64), Some(8080));
/// assert_eq!(server.get("alias").and_then(Item::as_list).map(Vec::len), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IniParser;

impl IniParser {
    #[must_use]
    pub fn new() -> Self {
        IniParser
    }
}

impl RecordParser for IniParser {
    fn parse(&self, bytes: &[u8]) -> Result<Record> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::malformed("INI", e))?;
        let data = read_ini(text).map_err(|e| {
            debug!(line = e.line, error = %e.msg, "INI decoding failed");
            Error::malformed("INI", e)
        })?;
        normalize_data(&data)
    }
}

struct Section {
    name: String,
    line: usize,
    entries: Map,
}

fn read_ini(text: &str) -> std::result::Result<Map, SyntaxError> {
    let mut root = Map::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| SyntaxError::new(number, "unterminated section header"))?
                .trim();
            if name.is_empty() {
                return Err(SyntaxError::new(number, "missing section name"));
            }
            current = match sections.iter().position(|s| s.name == name) {
                Some(existing) => Some(existing),
                None => {
                    sections.push(Section {
                        name: name.to_string(),
                        line: number,
                        entries: Map::new(),
                    });
                    Some(sections.len() - 1)
                }
            };
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| SyntaxError::new(number, "expected '=' after key"))?;
        let key = key.trim_end();
        let value = parse_value(value.trim(), number)?;

        let target = match current.and_then(|i| sections.get_mut(i)) {
            Some(section) => &mut section.entries,
            None => &mut root,
        };

        match key.strip_suffix("[]") {
            Some(list) => append(target, list.trim_end(), value, number)?,
            None if key.is_empty() => return Err(SyntaxError::new(number, "missing key")),
            None => {
                target.insert(key.to_string(), value);
            }
        }
    }

    for section in sections {
        if root.contains_key(&section.name) {
            return Err(SyntaxError::new(
                section.line,
                &format!("section \"{}\" conflicts with a key", section.name),
            ));
        }
        root.insert(section.name, Value::Object(section.entries));
    }

    Ok(root)
}

fn append(map: &mut Map, key: &str, value: Value, line: usize) -> std::result::Result<(), SyntaxError> {
    if key.is_empty() {
        return Err(SyntaxError::new(line, "missing key"));
    }
    match map.get_mut(key) {
        Some(Value::Array(items)) => items.push(value),
        Some(_) => {
            return Err(SyntaxError::new(line, &format!("\"{}\" is not a list", key)));
        }
        None => {
            map.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
    Ok(())
}

fn parse_value(text: &str, line: usize) -> std::result::Result<Value, SyntaxError> {
    for quote in ['"', '\''] {
        if let Some(rest) = text.strip_prefix(quote) {
            let (inner, tail) = rest
                .split_once(quote)
                .ok_or_else(|| SyntaxError::new(line, "unterminated string"))?;
            let tail = tail.trim_start();
            if !tail.is_empty() && !tail.starts_with(';') {
                return Err(SyntaxError::new(line, "unexpected characters after string"));
            }
            return Ok(Value::String(inner.to_string()));
        }
    }

    let text = match text.split_once(';') {
        Some((before, _)) => before.trim_end(),
        None => text,
    };

    let keyword = |words: &[&str]| words.iter().any(|w| text.eq_ignore_ascii_case(w));
    if keyword(&["true", "on", "yes"]) {
        return Ok(Value::Bool(true));
    }
    if keyword(&["false", "off", "no", "none"]) {
        return Ok(Value::Bool(false));
    }
    if keyword(&["null"]) {
        return Ok(Value::Null);
    }

    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Number(Number::Integer(i)));
    }
    if text.contains(|c: char| c.is_ascii_digit()) {
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Number(Number::Float(f)));
        }
    }

    Ok(Value::String(text.to_string()))
}
