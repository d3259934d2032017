//! Buffered byte source backing the tokenizer.
//!
//! A [`BufferedSource`] wraps a reader in a fixed-capacity buffer and tracks
//! two cursors: `position`, the read cursor, and `consumed`, the start of the
//! current pending span. The bytes in `[consumed, position)` are the text of
//! the token being recognized; refills slide that span to the front of the
//! buffer so it stays contiguous. A token that cannot fit the buffer in its
//! entirety puts the source into a sticky error state instead of growing
//! memory without bound.

use std::io::{ErrorKind, Read};

use crate::error::SourceError;

/// Default buffer capacity in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A fixed-buffer byte source with a pending-span cursor pair and line
/// accounting.
///
/// Invariant: `consumed <= position <= length <= capacity`.
#[derive(Debug)]
pub struct BufferedSource<R> {
    reader: R,
    buffer: Box<[u8]>,
    /// Number of valid bytes in the buffer.
    length: usize,
    /// Read cursor.
    position: usize,
    /// Start of the pending span.
    consumed: usize,
    line_number: u32,
    /// Byte that would complete the newline pair just counted, or 0.
    newline_pair: u8,
    at_start: bool,
    ended: bool,
    error: Option<SourceError>,
}

impl<R: Read> BufferedSource<R> {
    /// Creates a source with an explicit buffer capacity.
    ///
    /// The capacity bounds the longest single token the source can hold; see
    /// [`SourceError::TokenTooLong`].
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; capacity.max(4)].into_boxed_slice(),
            length: 0,
            position: 0,
            consumed: 0,
            line_number: 1,
            newline_pair: 0,
            at_start: true,
            ended: false,
            error: None,
        }
    }

    /// Returns the byte at the read cursor without consuming it, refilling
    /// the buffer as needed.
    ///
    /// Returns `None` at end of input and after any error. Use [`error`] to
    /// tell the two apart.
    ///
    /// [`error`]: BufferedSource::error
    pub fn peek(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }

        if self.at_start {
            self.at_start = false;
            if !self.fill() {
                return None;
            }
            if self.length >= UTF8_BOM.len() && &self.buffer[..UTF8_BOM.len()] == UTF8_BOM {
                self.position = UTF8_BOM.len();
                self.consumed = self.position;
            }
        }

        while self.position == self.length {
            if self.ended || !self.fill() {
                return None;
            }
        }

        Some(self.buffer[self.position])
    }

    /// Moves the read cursor forward by one byte.
    ///
    /// With `consume` set, the pending span is abandoned along with the byte;
    /// this is how delimiter and whitespace bytes are dropped.
    pub fn advance(&mut self, consume: bool) {
        debug_assert!(self.position < self.length, "advance past valid data");
        if self.position >= self.length {
            return;
        }
        let byte = self.buffer[self.position];
        self.count_line(byte);
        self.position += 1;
        if consume {
            self.consumed = self.position;
        }
    }

    /// Moves the read cursor forward by `n` bytes already seen via [`rest`].
    ///
    /// [`rest`]: BufferedSource::rest
    pub(crate) fn advance_by(&mut self, n: usize, consume: bool) {
        let end = (self.position + n).min(self.length);
        for index in self.position..end {
            let byte = self.buffer[index];
            self.count_line(byte);
        }
        self.position = end;
        if consume {
            self.consumed = self.position;
        }
    }

    /// Abandons the pending span, releasing its bytes for the next refill.
    pub fn consume(&mut self) {
        self.consumed = self.position;
    }

    /// Shrinks the pending span to its first `n` bytes, moving the read
    /// cursor back.
    ///
    /// Used when a lookahead scan over-read, e.g. past an exponent marker
    /// that turned out not to introduce an exponent.
    pub fn resize_value(&mut self, n: usize) {
        let target = self.consumed + n;
        debug_assert!(target <= self.position, "resize_value can only shrink");
        if target <= self.position {
            self.position = target;
        }
    }

    /// The bytes of the pending span, `[consumed, position)`.
    pub fn pending(&self) -> &[u8] {
        &self.buffer[self.consumed..self.position]
    }

    /// The valid bytes at and after the read cursor, without refilling.
    pub(crate) fn rest(&self) -> &[u8] {
        &self.buffer[self.position..self.length]
    }

    /// One-based line number of the read cursor.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// The sticky error, if any. Distinguishes a truncated stream from a
    /// clean end of input.
    pub fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    pub(crate) fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Counts one line per logical newline: LF-only, CR-only, and paired
    /// CRLF/LFCR conventions all advance the counter exactly once.
    fn count_line(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\r' => {
                if self.newline_pair == byte {
                    self.newline_pair = 0;
                } else {
                    self.line_number += 1;
                    self.newline_pair = if byte == b'\n' { b'\r' } else { b'\n' };
                }
            }
            _ => self.newline_pair = 0,
        }
    }

    /// Slides the pending span to the front of the buffer and reads more
    /// bytes after it. Returns `false` after recording a sticky error.
    fn fill(&mut self) -> bool {
        if self.consumed == 0 && self.length == self.buffer.len() {
            self.error = Some(SourceError::TokenTooLong(self.buffer.len()));
            return false;
        }

        let pending = self.length - self.consumed;
        self.buffer.copy_within(self.consumed..self.length, 0);
        self.position -= self.consumed;
        self.consumed = 0;
        self.length = pending;

        loop {
            match self.reader.read(&mut self.buffer[self.length..]) {
                Ok(0) => {
                    self.ended = true;
                    return true;
                }
                Ok(n) => {
                    self.length += n;
                    return true;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.error = Some(SourceError::Io(e));
                    return false;
                }
            }
        }
    }
}
