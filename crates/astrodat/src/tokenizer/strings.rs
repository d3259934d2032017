//! String scanning state machine and the escape/repair rewrite pass.
//!
//! Scanning is two-pass: the state machine validates structure (escapes,
//! Unicode escapes, termination) and flags whether the raw text needs to be
//! rewritten at all. Only flagged strings pay for the second pass, which
//! decodes escapes, normalizes newlines, and substitutes replacement
//! characters for invalid UTF-8. Unflagged strings are read straight out of
//! the pending span.

use std::io::Read;

use crate::{
    source::BufferedSource,
    utf8::{Utf8Check, Utf8Validator},
};

const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StringState {
    Normal,
    Escape,
    /// Unicode escape with this many hex digits still required.
    Unicode(u8),
    End,
}

/// Scans a string literal starting at the opening quote.
///
/// On success returns whether the raw text needs the rewrite pass (it
/// contained an escape, a carriage return, or invalid UTF-8). Returns `None`
/// for an unterminated string, a bad escape, or a source fault.
pub(super) fn scan<R: Read>(source: &mut BufferedSource<R>) -> Option<bool> {
    // Opening quote: kept in the raw span, excluded from the value.
    source.advance(false);

    let mut validator = Utf8Validator::new();
    let mut state = StringState::Normal;
    let mut needs_rewrite = false;

    while state != StringState::End {
        let byte = source.peek()?;
        match state {
            StringState::Normal => match byte {
                b'"' => {
                    // A dangling multi-byte sequence still needs repair.
                    if validator.is_mid_sequence() {
                        needs_rewrite = true;
                    }
                    state = StringState::End;
                }
                b'\\' => {
                    needs_rewrite = true;
                    state = StringState::Escape;
                }
                b'\r' => needs_rewrite = true,
                _ => {
                    if validator.check(byte) == Utf8Check::Invalid {
                        needs_rewrite = true;
                    }
                }
            },
            StringState::Escape => match byte {
                b'"' | b'\\' | b'n' => state = StringState::Normal,
                b'u' => state = StringState::Unicode(4),
                _ => return None,
            },
            StringState::Unicode(remaining) => {
                if !byte.is_ascii_hexdigit() {
                    return None;
                }
                state = if remaining == 1 {
                    StringState::Normal
                } else {
                    StringState::Unicode(remaining - 1)
                };
            }
            StringState::End => unreachable!(),
        }
        source.advance(false);
    }

    Some(needs_rewrite)
}

/// Rewrites flagged raw string text: decodes `\"` `\\` `\n` `\uXXXX`,
/// normalizes CR/LF/CRLF to a single line feed, and substitutes one
/// replacement character per invalid UTF-8 sequence. Escape structure was
/// validated by the scan, so this pass cannot fail; a malformed or truncated
/// `\u` escape decodes to the replacement character.
pub(super) fn rewrite(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut validator = Utf8Validator::new();
    let mut index = 0;

    while index < raw.len() {
        let byte = raw[index];
        match byte {
            b'\\' => {
                flush_partial(&mut validator, &mut out);
                match raw.get(index + 1) {
                    Some(b'"') => {
                        out.push('"');
                        index += 2;
                    }
                    Some(b'\\') => {
                        out.push('\\');
                        index += 2;
                    }
                    Some(b'n') => {
                        out.push('\n');
                        index += 2;
                    }
                    Some(b'u') => match raw.get(index + 2..index + 6) {
                        Some(digits) => {
                            out.push(char::from_u32(hex4(digits)).unwrap_or(REPLACEMENT));
                            index += 6;
                        }
                        None => {
                            out.push(REPLACEMENT);
                            index = raw.len();
                        }
                    },
                    _ => {
                        out.push(REPLACEMENT);
                        index = raw.len();
                    }
                }
            }
            b'\r' | b'\n' => {
                flush_partial(&mut validator, &mut out);
                out.push('\n');
                let pair = if byte == b'\r' { b'\n' } else { b'\r' };
                index += if raw.get(index + 1) == Some(&pair) { 2 } else { 1 };
            }
            _ => {
                match validator.check(byte) {
                    Utf8Check::Char(ch) => out.push(ch),
                    Utf8Check::Incomplete => {}
                    Utf8Check::Invalid => out.push(REPLACEMENT),
                }
                index += 1;
            }
        }
    }

    flush_partial(&mut validator, &mut out);
    out
}

fn flush_partial(validator: &mut Utf8Validator, out: &mut String) {
    if validator.is_mid_sequence() {
        validator.reset();
        out.push(REPLACEMENT);
    }
}

fn hex4(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, &digit| (acc << 4) | char::from(digit).to_digit(16).unwrap_or(0))
}
