//! Number scanning state machine.
//!
//! Recognizes `[-+]? (digit+ (. digit*)? | . digit+) ([eE] [-+]? digit+)?`.
//! The scanner never copies characters: it advances the source byte by byte
//! and lets the pending span capture the literal text for conversion at the
//! end. An exponent marker that turns out not to introduce an exponent is
//! rolled back out of the span with `resize_value`, so it is lexed again as
//! the start of the next token.

use std::io::Read;

use crate::source::BufferedSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumberState {
    Start,
    IntegerSign,
    Integer,
    FractionalPoint,
    Fractional,
    ExponentSymbol,
    ExponentSign,
    Exponent,
    End,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ByteClass {
    Digit,
    Sign,
    Point,
    Marker,
    Other,
    Eoi,
}

/// What the driver does with the current byte for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    /// Advance the source, keeping the byte in the pending span.
    Advance,
    /// Leave the byte for the next token.
    Stop,
    /// Shrink the span back to the mark taken before the exponent marker.
    Rollback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum ScannedNumber {
    Integer(i32),
    Double(f64),
}

pub(super) fn classify(byte: Option<u8>) -> ByteClass {
    match byte {
        Some(b'0'..=b'9') => ByteClass::Digit,
        Some(b'+' | b'-') => ByteClass::Sign,
        Some(b'.') => ByteClass::Point,
        Some(b'e' | b'E') => ByteClass::Marker,
        Some(_) => ByteClass::Other,
        None => ByteClass::Eoi,
    }
}

/// Pure transition function. `digits_before_point` distinguishes `1.` (a
/// complete number) from a bare `.` (not one).
pub(super) fn transition(
    state: NumberState,
    class: ByteClass,
    digits_before_point: bool,
) -> (NumberState, Action) {
    use {Action::*, ByteClass::*, NumberState::*};

    match (state, class) {
        (Start, Digit) => (Integer, Advance),
        (Start, Sign) => (IntegerSign, Advance),
        (Start, Point) => (FractionalPoint, Advance),
        (Start, _) => (Error, Stop),

        (IntegerSign, Digit) => (Integer, Advance),
        (IntegerSign, Point) => (FractionalPoint, Advance),
        (IntegerSign, _) => (Error, Stop),

        (Integer, Digit) => (Integer, Advance),
        (Integer, Point) => (FractionalPoint, Advance),
        (Integer, Marker) => (ExponentSymbol, Advance),
        (Integer, _) => (End, Stop),

        (FractionalPoint, Digit) => (Fractional, Advance),
        (FractionalPoint, Marker) if digits_before_point => (ExponentSymbol, Advance),
        (FractionalPoint, _) if digits_before_point => (End, Stop),
        (FractionalPoint, _) => (Error, Stop),

        (Fractional, Digit) => (Fractional, Advance),
        (Fractional, Marker) => (ExponentSymbol, Advance),
        (Fractional, _) => (End, Stop),

        (ExponentSymbol, Digit) => (Exponent, Advance),
        (ExponentSymbol, Sign) => (ExponentSign, Advance),
        (ExponentSymbol, _) => (End, Rollback),

        (ExponentSign, Digit) => (Exponent, Advance),
        (ExponentSign, _) => (End, Rollback),

        (Exponent, Digit) => (Exponent, Advance),
        (Exponent, _) => (End, Stop),

        (End | Error, _) => (state, Stop),
    }
}

/// Drives the state machine over the source. Returns `None` on a malformed
/// literal or a source fault mid-token.
pub(super) fn scan<R: Read>(source: &mut BufferedSource<R>) -> Option<ScannedNumber> {
    let mut state = NumberState::Start;
    let mut digits_before_point = false;
    let mut is_integer = true;
    let mut mark = 0;

    loop {
        let byte = source.peek();
        if byte.is_none() && source.has_error() {
            return None;
        }

        let (next, action) = transition(state, classify(byte), digits_before_point);
        match action {
            Action::Advance => {
                if next == NumberState::ExponentSymbol {
                    mark = source.pending().len();
                }
                source.advance(false);
            }
            Action::Stop => {}
            Action::Rollback => source.resize_value(mark),
        }

        match next {
            NumberState::Integer => digits_before_point = true,
            // Only a decimal point forces the double path; exponent forms
            // fail the integer parse on their own, and a rolled-back marker
            // leaves a plain integer literal behind.
            NumberState::FractionalPoint => is_integer = false,
            NumberState::End => return convert(source.pending(), is_integer),
            NumberState::Error => return None,
            _ => {}
        }
        state = next;
    }
}

fn convert(raw: &[u8], is_integer: bool) -> Option<ScannedNumber> {
    // A leading '+' is excluded from the numeric text.
    let text = match raw.first() {
        Some(b'+') => &raw[1..],
        _ => raw,
    };
    let text = std::str::from_utf8(text).ok()?;

    if is_integer {
        // -0 falls through to the double path to keep its sign bit.
        if let Ok(value) = text.parse::<i32>() {
            if value != 0 || !text.starts_with('-') {
                return Some(ScannedNumber::Integer(value));
            }
        }
    }

    text.parse::<f64>().ok().map(ScannedNumber::Double)
}
