use super::{RecordBuilder, RecordParser};
use crate::normalize::normalize_data;
use crate::{de, ser, Error, ErrorCode, Map, NativeOptions, Record, Result};
use tracing::debug;

/// Parses the native notation.
///
/// Accepts any layout the [`NativeBuilder`] can produce, whatever options it
/// was built with.
#[derive(Clone, Debug, Default)]
pub struct NativeParser;

impl NativeParser {
    #[must_use]
    pub fn new() -> Self {
        NativeParser
    }
}

impl RecordParser for NativeParser {
    fn parse(&self, bytes: &[u8]) -> Result<Record> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::malformed("native", e))?;
        let data = de::from_str(text).map_err(|e| {
            debug!(line = e.line, error = %e.msg, "native decoding failed");
            Error::malformed("native", e)
        })?;
        normalize_data(&data)
    }
}

/// Builds the native notation.
#[derive(Clone, Debug, Default)]
pub struct NativeBuilder {
    options: NativeOptions,
}

impl NativeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: NativeOptions) -> Self {
        NativeBuilder { options }
    }

    #[must_use]
    pub fn options(&self) -> &NativeOptions {
        &self.options
    }
}

impl RecordBuilder for NativeBuilder {
    fn build(&self, data: &Map) -> Result<Vec<u8>> {
        if let Some(marker) = self.options.length_marker {
            if !NativeOptions::is_valid_length_marker(marker) {
                return Err(Error::invalid(
                    ErrorCode::NotSupported,
                    format!("Invalid list length marker {:?}", marker),
                ));
            }
        }
        let record = normalize_data(data)?;
        Ok(ser::to_string(&record, &self.options).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Delimiter, ErrorCode, Item, Number, Value};

    fn object(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_build() {
        let data = object(value!({ "foo": "bar", "baz": [] }));
        let bytes = NativeBuilder::new().build(&data).unwrap();
        assert_eq!(bytes, b"foo: bar\nbaz[0]:");
    }

    #[test]
    fn test_round_trip_with_options() {
        let data = object(value!({
            "name": "a|b",
            "nums": [1, 2.5, (f64::INFINITY)],
            "nested": { "list": [{ "k": "v" }, [1, "two"]], "empty": [] },
            "text": "multi\nline"
        }));
        let options = NativeOptions::new()
            .with_indent(3)
            .with_delimiter(Delimiter::Pipe)
            .with_length_marker('#');
        let bytes = NativeBuilder::with_options(options).build(&data).unwrap();
        let record = NativeParser::new().parse(&bytes).unwrap();
        assert_eq!(record, normalize_data(&data).unwrap());
        assert_eq!(
            record.get("nums").and_then(Item::as_list).map(|l| l[2].clone()),
            Some(Item::Number(Number::Float(f64::INFINITY)))
        );
    }

    #[test]
    fn test_round_trip_nan() {
        let data = object(value!({ "x": (f64::NAN), "list": [(f64::NAN), 1] }));
        let expected = normalize_data(&data).unwrap();
        assert_eq!(expected, normalize_data(&expected.to_map()).unwrap());

        let bytes = NativeBuilder::new().build(&data).unwrap();
        assert_eq!(bytes, b"x: NaN\nlist[2]: NaN,1");
        assert_eq!(NativeParser::new().parse(&bytes).unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_invalid_keys() {
        let err = NativeParser::new().parse(b"foo: bar\n0: baz").unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.code(), ErrorCode::InvalidRecord);
        assert_eq!(err.to_string(), "Invalid record key at /: \"0\"");
    }

    #[test]
    fn test_parse_malformed() {
        let err = NativeParser::new().parse(b"foobar").unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(
            err.to_string(),
            "Could not parse native record: line 1: expected ':' after key"
        );

        let err = NativeParser::new().parse(b"a: \xff").unwrap_err();
        assert!(err.message().starts_with("Could not parse native record: "));
    }

    #[test]
    fn test_length_markers() {
        let data = object(value!({ "a": [1, 2], "b": [[3], { "k": "v" }] }));
        let expected = normalize_data(&data).unwrap();

        for marker in ['#', '@', '~', 'n', '\u{e9}'] {
            let builder =
                NativeBuilder::with_options(NativeOptions::new().with_length_marker(marker));
            let bytes = builder.build(&data).unwrap();
            let record = NativeParser::new().parse(&bytes).unwrap();
            assert_eq!(record, expected, "{marker:?}");
        }

        for marker in ['1', '0', ']', '[', ':', '|', ',', '\t', ' ', '"', '-'] {
            let builder =
                NativeBuilder::with_options(NativeOptions::new().with_length_marker(marker));
            let err = builder.build(&data).unwrap_err();
            assert!(err.is_invalid(), "{marker:?}");
            assert_eq!(err.code(), ErrorCode::NotSupported);
            assert_eq!(
                err.to_string(),
                format!("Invalid list length marker {:?}", marker)
            );
        }
    }

    #[test]
    fn test_parse_oversized_list_length() {
        let err = NativeParser::new()
            .parse(b"a[18446744073709551615]:\n  - 1")
            .unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.code(), ErrorCode::InternalError);

        let err = NativeParser::new()
            .parse(b"a[1000000000000]:\n  - 1")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not parse native record: line 1: list declares 1000000000000 items, found 1"
        );
    }

    #[test]
    fn test_parse_deep_nesting() {
        let input: String = (0..1000)
            .map(|level| format!("{}a:\n", "  ".repeat(level)))
            .collect();
        let err = NativeParser::new().parse(input.as_bytes()).unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(
            err.to_string(),
            format!(
                "Could not parse native record: line {}: nesting too deep",
                de::MAX_DEPTH + 2
            )
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(NativeParser::new().parse(b"").unwrap().is_empty());
    }
}
