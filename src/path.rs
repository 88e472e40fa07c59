//! Locations inside a nested record.
//!
//! A [`Path`] is the chain of keys and list positions leading from the top of
//! a record to an item. It renders slash-joined with a leading slash, which is
//! the form used in error messages:
//!
//! ```rust
//! use serde_record::Path;
//!
//! let path = Path::root().join("users").index(0).join("name");
//! assert_eq!(path.to_string(), "/users/0/name");
//! assert_eq!(Path::root().to_string(), "/");
//! ```

use std::fmt;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The location of an item inside a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, pointing at the top-level record.
    #[must_use]
    pub fn root() -> Self {
        Path::default()
    }

    /// Returns a copy of this path extended by a record key.
    #[must_use]
    pub fn join(mut self, key: &str) -> Self {
        self.push_key(key);
        self
    }

    /// Returns a copy of this path extended by a list position.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
