//! Hand-rolled tokenizer for the astrodat grammar.
//!
//! [`Tokenizer`] pulls bytes from a [`BufferedSource`], skips whitespace and
//! `#` comments, and classifies the input into [`TokenKind`]s. Number and
//! string recognition are delegated to explicit state machines in the
//! [`numbers`] and [`strings`] submodules. Token payloads stay in the
//! source's pending span whenever possible; only strings that contain
//! escapes, carriage returns, or invalid UTF-8 are rewritten into an owned
//! buffer.
//!
//! A single token of pushback is supported: [`Tokenizer::push_back`] makes
//! the next [`Tokenizer::next_token`] call return the current token again
//! without touching the input. That is all the lookahead a recursive-descent
//! consumer of this grammar needs.

mod numbers;
mod strings;

#[cfg(test)]
mod tests;

use std::io::Read;

use bstr::ByteSlice;

use crate::{
    error::SourceError,
    source::{BufferedSource, DEFAULT_BUFFER_SIZE},
};

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// No token has been read yet.
    Begin,
    /// End of input. Also returned for every call after `End` or `Error`.
    End,
    /// A lexical error. Check [`Tokenizer::source_error`] to distinguish a
    /// malformed token from a truncated or faulted stream.
    Error,
    /// `{`
    BeginGroup,
    /// `}`
    EndGroup,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `<`
    BeginUnits,
    /// `>`
    EndUnits,
    /// An identifier: `(alpha|_) (alpha|digit|_)*`.
    Name,
    /// A double-quoted string literal.
    String,
    /// A numeric literal.
    Number,
    /// `=`
    Equals,
    /// `|`
    Bar,
}

#[derive(Debug)]
enum TokenValue {
    None,
    /// The payload is the source's pending span.
    Span,
    /// Unescaped/repaired string text.
    Processed(String),
    Integer(i32),
    Double(f64),
}

/// Pull tokenizer over a byte stream.
#[derive(Debug)]
pub struct Tokenizer<R> {
    source: BufferedSource<R>,
    kind: TokenKind,
    value: TokenValue,
    pushed_back: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer with the default buffer capacity.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Creates a tokenizer with an explicit buffer capacity, which bounds the
    /// longest single token.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            source: BufferedSource::with_capacity(reader, capacity),
            kind: TokenKind::Begin,
            value: TokenValue::None,
            pushed_back: false,
        }
    }

    /// Lexes and returns the next token.
    ///
    /// After `End` or `Error`, every further call returns `End` without
    /// reading more input.
    pub fn next_token(&mut self) -> TokenKind {
        if self.pushed_back {
            self.pushed_back = false;
            return self.kind;
        }

        if matches!(self.kind, TokenKind::End | TokenKind::Error) {
            self.kind = TokenKind::End;
            self.value = TokenValue::None;
            return self.kind;
        }

        self.value = TokenValue::None;
        // Release the previous token's span.
        self.source.consume();

        self.kind = match self.skip_whitespace() {
            Some(byte) => self.read_token(byte),
            None => TokenKind::End,
        };
        self.kind
    }

    /// Makes the next [`next_token`](Tokenizer::next_token) call return the
    /// current token again. Only one token of pushback is held; calling this
    /// twice between lexes has no further effect.
    pub fn push_back(&mut self) {
        self.pushed_back = true;
    }

    /// The classification of the current token.
    pub fn token_kind(&self) -> TokenKind {
        self.kind
    }

    /// The text of the current `Name` token, or `None` for any other kind.
    pub fn name_value(&self) -> Option<&str> {
        if self.kind != TokenKind::Name {
            return None;
        }
        match &self.value {
            TokenValue::Span => std::str::from_utf8(self.source.pending()).ok(),
            _ => None,
        }
    }

    /// The decoded text of the current `String` token, or `None` for any
    /// other kind.
    pub fn string_value(&self) -> Option<&str> {
        if self.kind != TokenKind::String {
            return None;
        }
        match &self.value {
            TokenValue::Span => {
                // The raw span keeps the surrounding quotes; trim them here.
                let raw = self.source.pending();
                std::str::from_utf8(raw.get(1..raw.len().checked_sub(1)?)?).ok()
            }
            TokenValue::Processed(text) => Some(text),
            _ => None,
        }
    }

    /// The numeric value of the current `Number` token, or `None` for any
    /// other kind. Integer literals convert losslessly.
    pub fn number_value(&self) -> Option<f64> {
        match self.value {
            TokenValue::Integer(value) => Some(f64::from(value)),
            TokenValue::Double(value) => Some(value),
            _ => None,
        }
    }

    /// The value of the current `Number` token when the literal was a pure
    /// integer in `i32` range. `-0` is not an integer: it stays on the
    /// floating-point path to keep its sign bit.
    pub fn integer_value(&self) -> Option<i32> {
        match self.value {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// One-based line number at the read cursor.
    pub fn line_number(&self) -> u32 {
        self.source.line_number()
    }

    /// The source's sticky error, if any. Lets callers tell a clean `End`
    /// from an I/O fault or an overlong token.
    pub fn source_error(&self) -> Option<&SourceError> {
        self.source.error()
    }

    /// Skips whitespace runs and `#` comments, returning the first byte of
    /// the next token, or `None` at end of input.
    fn skip_whitespace(&mut self) -> Option<u8> {
        loop {
            self.source.peek()?;
            let rest = self.source.rest();
            match rest.find_not_byteset(b" \t\r\n") {
                Some(offset) => {
                    let byte = rest[offset];
                    self.source.advance_by(offset, true);
                    if byte != b'#' {
                        return Some(byte);
                    }
                    self.skip_comment();
                }
                None => self.source.advance_by(rest.len(), true),
            }
        }
    }

    /// Skips from a `#` to the end of the line.
    fn skip_comment(&mut self) {
        loop {
            if self.source.peek().is_none() {
                return;
            }
            let rest = self.source.rest();
            match rest.find_byte(b'\n') {
                Some(offset) => {
                    self.source.advance_by(offset + 1, true);
                    return;
                }
                None => self.source.advance_by(rest.len(), true),
            }
        }
    }

    fn read_token(&mut self, byte: u8) -> TokenKind {
        match byte {
            b'{' => self.punctuator(TokenKind::BeginGroup),
            b'}' => self.punctuator(TokenKind::EndGroup),
            b'[' => self.punctuator(TokenKind::BeginArray),
            b']' => self.punctuator(TokenKind::EndArray),
            b'<' => self.punctuator(TokenKind::BeginUnits),
            b'>' => self.punctuator(TokenKind::EndUnits),
            b'=' => self.punctuator(TokenKind::Equals),
            b'|' => self.punctuator(TokenKind::Bar),
            b'"' => self.read_string(),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.read_number(),
            _ if is_name_start(byte) => self.read_name(),
            _ => {
                // Consume the offending byte so the error is observed once.
                self.source.advance(true);
                TokenKind::Error
            }
        }
    }

    fn punctuator(&mut self, kind: TokenKind) -> TokenKind {
        self.source.advance(true);
        kind
    }

    fn read_name(&mut self) -> TokenKind {
        while let Some(byte) = self.source.peek() {
            if !is_name_byte(byte) {
                break;
            }
            self.source.advance(false);
        }
        if self.source.has_error() {
            return TokenKind::Error;
        }
        self.value = TokenValue::Span;
        TokenKind::Name
    }

    fn read_number(&mut self) -> TokenKind {
        match numbers::scan(&mut self.source) {
            Some(numbers::ScannedNumber::Integer(value)) => {
                self.value = TokenValue::Integer(value);
                TokenKind::Number
            }
            Some(numbers::ScannedNumber::Double(value)) => {
                self.value = TokenValue::Double(value);
                TokenKind::Number
            }
            None => TokenKind::Error,
        }
    }

    fn read_string(&mut self) -> TokenKind {
        match strings::scan(&mut self.source) {
            Some(true) => {
                let raw = self.source.pending();
                let processed = strings::rewrite(&raw[1..raw.len() - 1]);
                self.value = TokenValue::Processed(processed);
                TokenKind::String
            }
            Some(false) => {
                self.value = TokenValue::Span;
                TokenKind::String
            }
            None => TokenKind::Error,
        }
    }
}

const fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

const fn is_name_byte(byte: u8) -> bool {
    is_name_start(byte) || byte.is_ascii_digit()
}
