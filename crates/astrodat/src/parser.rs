//! Recursive-descent parser building the value tree from the token stream.
//!
//! Failure is sentinel-valued throughout: every reader returns `None` instead
//! of raising, and a record or array that fails partway through is discarded
//! entirely. When a token cannot begin a value it is pushed back, so the
//! caller can inspect what stopped the parse (and fetch a line number from
//! the tokenizer for diagnostics).

use std::io::Read;

use crate::{
    hash::AssociativeArray,
    tokenizer::{TokenKind, Tokenizer},
    units::{AngleUnit, LengthUnit, MassUnit, TimeUnit, Units},
    value::{Value, ValueArray},
};

/// Parses a whole document: one value covering the entire stream.
pub fn parse_document<R: Read>(reader: R) -> Option<Value> {
    let mut tokenizer = Tokenizer::new(reader);
    Parser::new(&mut tokenizer).read_value()
}

/// Recursive-descent consumer of a [`Tokenizer`]'s token stream.
#[derive(Debug)]
pub struct Parser<'a, R> {
    tokenizer: &'a mut Tokenizer<R>,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(tokenizer: &'a mut Tokenizer<R>) -> Self {
        Self { tokenizer }
    }

    /// Reads exactly one value: a number, string, boolean, array, or record.
    ///
    /// Returns `None` with the offending token pushed back when the next
    /// token cannot begin a value. Bare names other than `true` and `false`
    /// are not values.
    pub fn read_value(&mut self) -> Option<Value> {
        match self.tokenizer.next_token() {
            TokenKind::Number => self.tokenizer.number_value().map(Value::from),
            TokenKind::String => self.tokenizer.string_value().map(Value::from),
            TokenKind::Name => match self.tokenizer.name_value() {
                Some("true") => Some(Value::from(true)),
                Some("false") => Some(Value::from(false)),
                _ => {
                    self.tokenizer.push_back();
                    None
                }
            },
            TokenKind::BeginArray => {
                self.tokenizer.push_back();
                self.read_array().map(Value::from)
            }
            TokenKind::BeginGroup => {
                self.tokenizer.push_back();
                self.read_hash().map(Value::from)
            }
            _ => {
                self.tokenizer.push_back();
                None
            }
        }
    }

    /// Reads a `[ ]` array of values. A malformed array yields `None`.
    pub fn read_array(&mut self) -> Option<ValueArray> {
        if self.tokenizer.next_token() != TokenKind::BeginArray {
            self.tokenizer.push_back();
            return None;
        }

        let mut array = ValueArray::new();
        while let Some(value) = self.read_value() {
            array.push(value);
        }

        if self.tokenizer.next_token() != TokenKind::EndArray {
            self.tokenizer.push_back();
            return None;
        }
        Some(array)
    }

    /// Reads a `{ }` record of `name units? value` entries. Any failure
    /// discards the whole record; no partial records are returned.
    pub fn read_hash(&mut self) -> Option<AssociativeArray> {
        if self.tokenizer.next_token() != TokenKind::BeginGroup {
            self.tokenizer.push_back();
            return None;
        }

        let mut hash = AssociativeArray::new();
        loop {
            let token = self.tokenizer.next_token();
            if token == TokenKind::EndGroup {
                return Some(hash);
            }
            if token != TokenKind::Name {
                self.tokenizer.push_back();
                return None;
            }
            let key = self.tokenizer.name_value()?.to_owned();

            let units = self.read_units()?;
            let mut value = self.read_value()?;
            value.set_units(units);
            hash.add_value(key, value);
        }
    }

    /// Reads an optional `< >` units clause.
    ///
    /// Absent clauses yield default units. Every name inside a clause must be
    /// a known unit of some axis; a later unit on the same axis overwrites an
    /// earlier one. A malformed clause yields `None`.
    fn read_units(&mut self) -> Option<Units> {
        if self.tokenizer.next_token() != TokenKind::BeginUnits {
            self.tokenizer.push_back();
            return Some(Units::default());
        }

        let mut units = Units::default();
        loop {
            match self.tokenizer.next_token() {
                TokenKind::EndUnits => return Some(units),
                TokenKind::Name => {
                    let name = self.tokenizer.name_value()?;
                    if let Some(unit) = LengthUnit::from_name(name) {
                        units.length = unit;
                    } else if let Some(unit) = TimeUnit::from_name(name) {
                        units.time = unit;
                    } else if let Some(unit) = AngleUnit::from_name(name) {
                        units.angle = unit;
                    } else if let Some(unit) = MassUnit::from_name(name) {
                        units.mass = unit;
                    } else {
                        return None;
                    }
                }
                _ => {
                    self.tokenizer.push_back();
                    return None;
                }
            }
        }
    }
}
