//! The document value tree.
//!
//! A [`Value`] is a discriminated payload (null, number, string, array,
//! record, boolean) carrying a [`Units`] annotation independent of the
//! discriminant. The discriminant is fixed at construction; accessors return
//! `None` rather than coercing. Ownership is strictly tree-shaped: a value
//! exclusively owns its string, array, or record payload, so cycles cannot be
//! built.

use std::fmt;

use crate::{hash::AssociativeArray, units::Units};

/// An ordered sequence of values, owned exclusively by its parent.
pub type ValueArray = Vec<Value>;

#[derive(Debug, Default, PartialEq)]
enum ValueData {
    #[default]
    Null,
    Number(f64),
    String(String),
    Array(ValueArray),
    Hash(AssociativeArray),
    Boolean(bool),
}

/// A parsed document value with its unit annotation.
#[derive(Debug, Default, PartialEq)]
pub struct Value {
    data: ValueData,
    units: Units,
}

impl Value {
    /// The null value with unspecified units.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    /// The numeric payload, or `None` for any other discriminant.
    pub fn as_number(&self) -> Option<f64> {
        match self.data {
            ValueData::Number(value) => Some(value),
            _ => None,
        }
    }

    /// The string payload, or `None` for any other discriminant.
    pub fn as_string(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(value) => Some(value),
            _ => None,
        }
    }

    /// The array payload, or `None` for any other discriminant.
    pub fn as_array(&self) -> Option<&ValueArray> {
        match &self.data {
            ValueData::Array(value) => Some(value),
            _ => None,
        }
    }

    /// The record payload, or `None` for any other discriminant.
    pub fn as_hash(&self) -> Option<&AssociativeArray> {
        match &self.data {
            ValueData::Hash(value) => Some(value),
            _ => None,
        }
    }

    /// The boolean payload, or `None` for any other discriminant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self.data {
            ValueData::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// Attaches a parsed units clause. The discriminant is unaffected.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// The unit annotation, defaulting to unspecified on every axis.
    pub fn units(&self) -> Units {
        self.units
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self {
            data: ValueData::Number(value),
            units: Units::default(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self {
            data: ValueData::Boolean(value),
            units: Units::default(),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self {
            data: ValueData::String(value),
            units: Units::default(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ValueArray> for Value {
    fn from(value: ValueArray) -> Self {
        Self {
            data: ValueData::Array(value),
            units: Units::default(),
        }
    }
}

impl From<AssociativeArray> for Value {
    fn from(value: AssociativeArray) -> Self {
        Self {
            data: ValueData::Hash(value),
            units: Units::default(),
        }
    }
}

/// Escapes a string for inclusion in a document string literal: quotes,
/// backslashes, line feeds, and remaining control characters.
fn write_escaped<W: fmt::Write>(text: &str, out: &mut W) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            ch if ch.is_control() && (ch as u32) <= 0xFFFF => {
                write!(out, "\\u{:04x}", ch as u32)?;
            }
            ch => out.write_char(ch)?,
        }
    }
    Ok(())
}

fn write_units(units: Units, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("<")?;
    let mut first = true;
    let names = [
        units.length.name(),
        units.time.name(),
        units.angle.name(),
        units.mass.name(),
    ];
    for name in names.into_iter().flatten() {
        if !first {
            f.write_str(" ")?;
        }
        first = false;
        f.write_str(name)?;
    }
    f.write_str(">")
}

impl fmt::Display for Value {
    /// Writes the value back in document syntax. Null has no literal in the
    /// grammar and prints as `null` for diagnostics only; the parser never
    /// produces a null value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            ValueData::Null => f.write_str("null"),
            ValueData::Number(value) => write!(f, "{value}"),
            ValueData::String(value) => {
                f.write_str("\"")?;
                write_escaped(value, f)?;
                f.write_str("\"")
            }
            ValueData::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
            ValueData::Array(values) => {
                f.write_str("[")?;
                let mut first = true;
                for value in values {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            ValueData::Hash(hash) => {
                f.write_str("{")?;
                for (key, value) in hash.iter() {
                    write!(f, " {key} ")?;
                    if !value.units().is_default() {
                        write_units(value.units(), f)?;
                        f.write_str(" ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}
