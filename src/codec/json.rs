use super::{RecordBuilder, RecordParser};
use crate::normalize::normalize_data;
use crate::{Error, ErrorCode, JsonOptions, Map, Record, Result, Value};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io;
use tracing::debug;

/// Parses JSON documents.
///
/// The top level must be an object. A top-level array is read as an object
/// keyed by position, so `[]` is the empty record and anything longer fails
/// on key `"0"`.
#[derive(Clone, Debug, Default)]
pub struct JsonParser;

impl JsonParser {
    #[must_use]
    pub fn new() -> Self {
        JsonParser
    }
}

impl RecordParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Record> {
        let decoded: Value = serde_json::from_slice(bytes).map_err(|e| {
            debug!(error = %e, "JSON decoding failed");
            Error::malformed("JSON", e)
        })?;

        let data = match decoded {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            other => {
                return Err(Error::malformed(
                    "JSON",
                    format!("expected an object, found {}", other.kind()),
                ))
            }
        };

        normalize_data(&data)
    }
}

/// Builds JSON documents.
///
/// # Examples
///
/// ```rust
/// use serde_record::codec::{JsonBuilder, RecordBuilder};
/// use serde_record::{value, JsonOptions};
///
/// let data = value!({ "html": "<b>'hi'</b>" });
/// let data = data.as_object().unwrap();
///
/// let bytes = JsonBuilder::new().build(data).unwrap();
/// assert_eq!(bytes, br#"{"html":"\u003Cb\u003E\u0027hi\u0027\u003C/b\u003E"}"#);
///
/// let raw = JsonBuilder::with_options(JsonOptions::new().with_escape_html(false));
/// assert_eq!(raw.build(data).unwrap(), br#"{"html":"<b>'hi'</b>"}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct JsonBuilder {
    options: JsonOptions,
}

impl JsonBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: JsonOptions) -> Self {
        JsonBuilder { options }
    }

    #[must_use]
    pub fn options(&self) -> &JsonOptions {
        &self.options
    }
}

impl RecordBuilder for JsonBuilder {
    fn build(&self, data: &Map) -> Result<Vec<u8>> {
        let record = normalize_data(data)?;

        let encoded = match (self.options.pretty, self.options.escape_html) {
            (false, false) => encode(&record, CompactFormatter),
            (false, true) => encode(&record, MarkupSafe(CompactFormatter)),
            (true, false) => encode(&record, PrettyFormatter::new()),
            (true, true) => encode(&record, MarkupSafe(PrettyFormatter::new())),
        };

        encoded.map_err(|e| {
            debug!(error = %e, "JSON encoding failed");
            Error::runtime(
                ErrorCode::InternalError,
                format!("Failed to build JSON record: {}", e),
            )
        })
    }
}

fn encode<F: Formatter>(record: &Record, formatter: F) -> serde_json::Result<Vec<u8>> {
    let mut output = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
    record.serialize(&mut serializer)?;
    Ok(output)
}

/// Wraps a formatter so `<`, `>` and `'` inside strings come out as `\u` escapes.
struct MarkupSafe<F>(F);

impl<F: Formatter> Formatter for MarkupSafe<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, byte) in fragment.bytes().enumerate() {
            let escape: &[u8] = match byte {
                b'<' => b"\\u003C",
                b'>' => b"\\u003E",
                b'\'' => b"\\u0027",
                _ => continue,
            };
            if start < i {
                self.0.write_string_fragment(writer, &fragment[start..i])?;
            }
            writer.write_all(escape)?;
            start = i + 1;
        }
        if start < fragment.len() {
            self.0.write_string_fragment(writer, &fragment[start..])?;
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}
