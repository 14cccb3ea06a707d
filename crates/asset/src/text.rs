//! Shared helpers for the line-oriented text formats (OBJ and MTL).

use std::{
    io::{self, BufRead},
    str::{FromStr, SplitWhitespace},
};

use crate::error::AssetError;

/// Reads lines as lossy UTF-8, tracking 1-based line numbers.
pub(crate) struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    /// Next `(line_no, trimmed_line)`, `None` at end of input.
    pub(crate) fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let line = String::from_utf8_lossy(&self.buf).trim().to_owned();
        Ok(Some((self.line_no, line)))
    }
}

/// Pulls numeric fields off a directive line left to right.
///
/// Once a token fails to parse, it and every later field read as zero, and
/// the failure is kept for the caller to report. Missing trailing fields
/// also read as zero but are not a failure.
pub(crate) struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    directive: &'a str,
    line: usize,
    error: Option<AssetError>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(directive: &'a str, tokens: SplitWhitespace<'a>, line: usize) -> Self {
        Self {
            tokens,
            directive,
            line,
            error: None,
        }
    }

    pub(crate) fn value<T: FromStr + Default>(&mut self) -> T {
        if self.error.is_some() {
            return T::default();
        }
        let Some(token) = self.tokens.next() else {
            return T::default();
        };
        token.parse().unwrap_or_else(|_| {
            self.error = Some(AssetError::MalformedNumericField {
                line: self.line,
                directive: self.directive.to_owned(),
                token: token.to_owned(),
            });
            T::default()
        })
    }

    pub(crate) fn next_f32(&mut self) -> f32 {
        self.value::<f32>()
    }

    pub(crate) fn next_vec3(&mut self) -> [f32; 3] {
        [self.next_f32(), self.next_f32(), self.next_f32()]
    }

    /// The first parse failure on this line, if any.
    pub(crate) fn finish(self) -> Option<AssetError> {
        self.error
    }
}
