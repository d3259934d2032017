//! Order-preserving string-keyed records and their typed accessors.
//!
//! [`AssociativeArray`] is the record type of the document grammar: keys keep
//! their insertion order, lookups are by name, and a layer of typed accessors
//! converts values on the way out — but only when both the discriminant and,
//! for physical quantities, the units are compatible. Mismatches yield
//! `None`, never a coerced default.

use std::path::PathBuf;

use indexmap::IndexMap;
use nalgebra::{Unit, UnitQuaternion, Vector3, Vector4};

use crate::value::Value;

/// Numeric types retrievable through [`AssociativeArray::get_number`].
pub trait Numeric {
    fn from_f64(value: f64) -> Self;
}

impl Numeric for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Numeric for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as Self
    }
}

impl Numeric for i32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as Self
    }
}

impl Numeric for u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_f64(value: f64) -> Self {
        value as Self
    }
}

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Parses `#rgb`, `#rrggbb`, or `#rrggbbaa` hex notation.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let component = |range: &str, max: f32| -> Option<f32> {
            u32::from_str_radix(range, 16).ok().map(|v| v as f32 / max)
        };
        match digits.len() {
            3 => Some(Self::new(
                component(&digits[0..1], 15.0)?,
                component(&digits[1..2], 15.0)?,
                component(&digits[2..3], 15.0)?,
            )),
            6 | 8 => {
                let mut color = Self::new(
                    component(&digits[0..2], 255.0)?,
                    component(&digits[2..4], 255.0)?,
                    component(&digits[4..6], 255.0)?,
                );
                if digits.len() == 8 {
                    color.alpha = component(&digits[6..8], 255.0)?;
                }
                Some(color)
            }
            _ => None,
        }
    }
}

/// An insertion-ordered record of named values.
#[derive(Debug, Default, PartialEq)]
pub struct AssociativeArray {
    assoc: IndexMap<String, Value>,
}

impl AssociativeArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assoc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assoc.is_empty()
    }

    /// The value stored under `key`, or `None` if the key is unknown.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.assoc.get(key)
    }

    /// Appends `value` under `key`. A key that is already present keeps its
    /// first value; the duplicate is dropped.
    pub fn add_value(&mut self, key: String, value: Value) {
        self.assoc.entry(key).or_insert(value);
    }

    /// Visits `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.assoc.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// A numeric value converted to `T`, or `None` on a missing key or
    /// non-numeric discriminant.
    pub fn get_number<T: Numeric>(&self, key: &str) -> Option<T> {
        self.get_value(key)?.as_number().map(T::from_f64)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get_value(key)?.as_string()
    }

    /// A string value interpreted as a filesystem path.
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get_string(key).map(PathBuf::from)
    }

    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get_value(key)?.as_boolean()
    }

    /// A three-element numeric array as a vector.
    pub fn get_vector3(&self, key: &str) -> Option<Vector3<f64>> {
        vector3_of(self.get_value(key)?)
    }

    /// A four-element numeric array as a vector.
    pub fn get_vector4(&self, key: &str) -> Option<Vector4<f64>> {
        let array = self.get_value(key)?.as_array()?;
        if array.len() != 4 {
            return None;
        }
        Some(Vector4::new(
            array[0].as_number()?,
            array[1].as_number()?,
            array[2].as_number()?,
            array[3].as_number()?,
        ))
    }

    /// A rotation in axis-angle form, `[angle axisX axisY axisZ]`, scaled by
    /// the value's angle unit (degrees when unspecified).
    pub fn get_rotation(&self, key: &str) -> Option<UnitQuaternion<f64>> {
        let value = self.get_value(key)?;
        let array = value.as_array()?;
        if array.len() != 4 {
            return None;
        }
        let angle = array[0].as_number()?;
        let axis = Vector3::new(
            array[1].as_number()?,
            array[2].as_number()?,
            array[3].as_number()?,
        );
        let axis = Unit::try_new(axis, 1e-12)?;
        let scale = value.units().angle.scale().unwrap_or(1.0);
        Some(UnitQuaternion::from_axis_angle(
            &axis,
            (angle * scale).to_radians(),
        ))
    }

    /// A color from a `[r g b]` or `[r g b a]` array or a hex string.
    pub fn get_color(&self, key: &str) -> Option<Color> {
        if let Some(vec4) = self.get_vector4(key) {
            let mut color = Color::new(vec4.x as f32, vec4.y as f32, vec4.z as f32);
            color.alpha = vec4.w as f32;
            return Some(color);
        }
        if let Some(vec3) = self.get_vector3(key) {
            return Some(Color::new(vec3.x as f32, vec3.y as f32, vec3.z as f32));
        }
        Color::parse(self.get_string(key)?)
    }

    /// A numeric value scaled by its angle unit.
    ///
    /// The result is expressed in multiples of `output_scale` degrees. When
    /// the value has no angle unit, `default_scale` is applied instead, or no
    /// scaling at all when `default_scale` is zero.
    pub fn get_angle(&self, key: &str, output_scale: f64, default_scale: f64) -> Option<f64> {
        let value = self.get_value(key)?;
        Some(scale_quantity(
            value.as_number()?,
            value.units().angle.scale(),
            output_scale,
            default_scale,
        ))
    }

    /// A numeric value scaled by its length unit; scales are in kilometers.
    pub fn get_length(&self, key: &str, output_scale: f64, default_scale: f64) -> Option<f64> {
        let value = self.get_value(key)?;
        Some(scale_quantity(
            value.as_number()?,
            value.units().length.scale(),
            output_scale,
            default_scale,
        ))
    }

    /// A numeric value scaled by its time unit; scales are in days.
    pub fn get_time(&self, key: &str, output_scale: f64, default_scale: f64) -> Option<f64> {
        let value = self.get_value(key)?;
        Some(scale_quantity(
            value.as_number()?,
            value.units().time.scale(),
            output_scale,
            default_scale,
        ))
    }

    /// A numeric value scaled by its mass unit; scales are in Earth masses.
    pub fn get_mass(&self, key: &str, output_scale: f64, default_scale: f64) -> Option<f64> {
        let value = self.get_value(key)?;
        Some(scale_quantity(
            value.as_number()?,
            value.units().mass.scale(),
            output_scale,
            default_scale,
        ))
    }

    /// A three-element vector scaled by the value's length unit.
    pub fn get_length_vector(
        &self,
        key: &str,
        output_scale: f64,
        default_scale: f64,
    ) -> Option<Vector3<f64>> {
        let value = self.get_value(key)?;
        let vector = vector3_of(value)?;
        let scale = match value.units().length.scale() {
            Some(unit_scale) => unit_scale / output_scale,
            None if default_scale != 0.0 => default_scale / output_scale,
            None => return Some(vector),
        };
        Some(vector * scale)
    }

    /// A `[longitude latitude altitude]` tuple with the angles scaled by the
    /// value's angle unit and the altitude by its length unit.
    pub fn get_spherical_tuple(&self, key: &str) -> Option<Vector3<f64>> {
        let value = self.get_value(key)?;
        let mut tuple = vector3_of(value)?;
        if let Some(angle_scale) = value.units().angle.scale() {
            tuple.x *= angle_scale;
            tuple.y *= angle_scale;
        }
        if let Some(length_scale) = value.units().length.scale() {
            tuple.z *= length_scale;
        }
        Some(tuple)
    }
}

fn vector3_of(value: &Value) -> Option<Vector3<f64>> {
    let array = value.as_array()?;
    if array.len() != 3 {
        return None;
    }
    Some(Vector3::new(
        array[0].as_number()?,
        array[1].as_number()?,
        array[2].as_number()?,
    ))
}

fn scale_quantity(
    value: f64,
    unit_scale: Option<f64>,
    output_scale: f64,
    default_scale: f64,
) -> f64 {
    match unit_scale {
        Some(scale) => value * scale / output_scale,
        None if default_scale != 0.0 => value * default_scale / output_scale,
        None => value,
    }
}
