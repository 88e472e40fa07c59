//! Configuration options for the builders.
//!
//! - [`NativeOptions`]: layout of the native notation (indentation, list
//!   delimiter, length marker)
//! - [`JsonOptions`]: pretty-printing and markup-safe escaping for JSON
//!
//! Registry lookups hand out codecs with default options. Construct a codec
//! directly to use anything else:
//!
//! ```rust
//! use serde_record::codec::{NativeBuilder, RecordBuilder};
//! use serde_record::{value, Delimiter, NativeOptions};
//!
//! let builder = NativeBuilder::with_options(
//!     NativeOptions::new().with_delimiter(Delimiter::Pipe).with_length_marker('#'),
//! );
//! let data = value!({ "tags": ["a", "b", "c"] });
//! let bytes = builder.build(data.as_object().unwrap()).unwrap();
//! assert_eq!(bytes, b"tags[#3|]: a|b|c");
//! ```

/// Delimiter between the elements of an inline list.
///
/// # Examples
///
/// ```rust
/// use serde_record::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The marker written after the length in a list header. Comma is implied.
    #[must_use]
    pub const fn header_suffix(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Layout options for the native notation.
///
/// # Examples
///
/// ```rust
/// use serde_record::{Delimiter, NativeOptions};
///
/// let options = NativeOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.delimiter, Delimiter::Comma);
///
/// let options = NativeOptions::new().with_indent(4).with_delimiter(Delimiter::Tab);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeOptions {
    pub indent: usize,
    pub delimiter: Delimiter,
    pub length_marker: Option<char>,
}

impl Default for NativeOptions {
    fn default() -> Self {
        NativeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: None,
        }
    }
}

impl NativeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level. Zero is raised to one,
    /// since nesting is expressed by indentation alone.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Prefixes list lengths with `marker`, e.g. `[#3]` instead of `[3]`.
    ///
    /// The marker must pass [`is_valid_length_marker`](Self::is_valid_length_marker);
    /// the native builder refuses options holding any other.
    #[must_use]
    pub fn with_length_marker(mut self, marker: char) -> Self {
        self.length_marker = Some(marker);
        self
    }

    /// Returns `true` if `marker` can prefix a list length without changing
    /// how the header reads back: no digits, whitespace, control characters,
    /// quotes, or header and list syntax.
    ///
    /// ```rust
    /// use serde_record::NativeOptions;
    ///
    /// assert!(NativeOptions::is_valid_length_marker('#'));
    /// assert!(!NativeOptions::is_valid_length_marker('1'));
    /// assert!(!NativeOptions::is_valid_length_marker(']'));
    /// ```
    #[must_use]
    pub fn is_valid_length_marker(marker: char) -> bool {
        !(marker.is_ascii_digit()
            || marker.is_whitespace()
            || marker.is_control()
            || matches!(marker, '[' | ']' | ':' | ',' | '|' | '"' | '\\' | '-'))
    }
}

/// Output options for the JSON builder.
///
/// # Examples
///
/// ```rust
/// use serde_record::JsonOptions;
///
/// let options = JsonOptions::new();
/// assert!(!options.pretty);
/// assert!(options.escape_html);
///
/// let options = JsonOptions::pretty().with_escape_html(false);
/// assert!(options.pretty);
/// assert!(!options.escape_html);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonOptions {
    pub pretty: bool,
    /// Emit `<`, `>` and `'` as `\u003C`, `\u003E` and `\u0027`.
    pub escape_html: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            pretty: false,
            escape_html: true,
        }
    }
}

impl JsonOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pretty() -> Self {
        JsonOptions {
            pretty: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}
