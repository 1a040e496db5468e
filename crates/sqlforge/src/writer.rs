//! Output buffer, argument accumulator and error slot for a single render.

use crate::error::{BuildError, BuildResult};
use crate::value::Value;

/// How prepared-mode placeholders are spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// The same token every time, e.g. `?`.
    Fixed(String),
    /// A prefix followed by a 1-based counter, e.g. `$1`, `$2`.
    Numbered(String),
}

impl PlaceholderStyle {
    pub fn question() -> Self {
        PlaceholderStyle::Fixed("?".to_string())
    }

    pub fn dollar() -> Self {
        PlaceholderStyle::Numbered("$".to_string())
    }
}

/// SQL text under construction.
///
/// A writer is single-use: create one per render, feed it fragments, then
/// call [`SqlWriter::finish`]. Once an error is recorded, later errors are
/// ignored and [`SqlWriter::finish`] returns the first one.
#[derive(Debug)]
pub struct SqlWriter {
    buf: String,
    args: Vec<Value>,
    prepared: bool,
    placeholders: PlaceholderStyle,
    next_param_idx: usize,
    error: Option<BuildError>,
}

impl SqlWriter {
    pub fn new(prepared: bool, placeholders: PlaceholderStyle) -> Self {
        Self {
            buf: String::with_capacity(128),
            args: Vec::new(),
            prepared,
            placeholders,
            next_param_idx: 1,
            error: None,
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    #[inline]
    pub fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    #[inline]
    pub fn push_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Write a placeholder token and record `value` as its argument.
    pub fn push_placeholder(&mut self, value: Value) {
        match &self.placeholders {
            PlaceholderStyle::Fixed(token) => self.buf.push_str(token),
            PlaceholderStyle::Numbered(prefix) => {
                self.buf.push_str(prefix);
                self.buf.push_str(&self.next_param_idx.to_string());
                self.next_param_idx += 1;
            }
        }
        self.args.push(value);
    }

    /// Mutable access to the raw buffer, for callers that quote in place.
    pub(crate) fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Record an error unless one is already set.
    pub fn set_error(&mut self, err: BuildError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Consume the writer, yielding the SQL and its arguments.
    pub fn finish(self) -> BuildResult<(String, Vec<Value>)> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.buf, self.args)),
        }
    }
}
