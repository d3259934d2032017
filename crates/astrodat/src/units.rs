//! Physical unit annotations and their conversion scales.
//!
//! A `< >` units clause in a document tags the following value with up to one
//! unit per axis: length, time, angle, and mass. Each axis defaults to
//! "unspecified", which has no scale; the typed accessors on
//! [`AssociativeArray`](crate::AssociativeArray) fall back to a caller-chosen
//! default scale in that case.

use std::f64::consts::PI;

const KM_PER_AU: f64 = 149_597_870.7;
const KM_PER_LY: f64 = 9_460_730_472_580.8;
const KM_PER_PARSEC: f64 = 3.085_677_581_491_367_3e13;

// IAU 2015 Resolution B3 nominal radii, in kilometers.
const EARTH_RADIUS: f64 = 6378.1;
const JUPITER_RADIUS: f64 = 71492.0;
const SOLAR_RADIUS: f64 = 695_700.0;

const SECONDS_PER_DAY: f64 = 86400.0;
const MINUTES_PER_DAY: f64 = 1440.0;
const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

const ARCSEC_PER_DEG: f64 = 3600.0;
const ARCMIN_PER_DEG: f64 = 60.0;
const DEG_PER_HOUR_ANGLE: f64 = 15.0;

// CODATA 2022 gravitational constant with IAU 2015 mass parameters.
const G: f64 = 6.674_30e-11;
const EARTH_MASS_KG: f64 = 3.986_004e14 / G;
const JUPITER_MASS_KG: f64 = 1.266_865_3e17 / G;

/// Length unit of a value, scaled in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthUnit {
    /// No unit was specified.
    #[default]
    Default,
    Kilometer,
    Meter,
    EarthRadius,
    JupiterRadius,
    SolarRadius,
    AstronomicalUnit,
    LightYear,
    Parsec,
    Kiloparsec,
    Megaparsec,
}

impl LengthUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "km" => Some(Self::Kilometer),
            "m" => Some(Self::Meter),
            "rE" => Some(Self::EarthRadius),
            "rJ" => Some(Self::JupiterRadius),
            "rS" => Some(Self::SolarRadius),
            "au" => Some(Self::AstronomicalUnit),
            "ly" => Some(Self::LightYear),
            "pc" => Some(Self::Parsec),
            "kpc" => Some(Self::Kiloparsec),
            "Mpc" => Some(Self::Megaparsec),
            _ => None,
        }
    }

    /// Scale of this unit in kilometers, or `None` when unspecified.
    pub fn scale(self) -> Option<f64> {
        match self {
            Self::Default => None,
            Self::Kilometer => Some(1.0),
            Self::Meter => Some(1e-3),
            Self::EarthRadius => Some(EARTH_RADIUS),
            Self::JupiterRadius => Some(JUPITER_RADIUS),
            Self::SolarRadius => Some(SOLAR_RADIUS),
            Self::AstronomicalUnit => Some(KM_PER_AU),
            Self::LightYear => Some(KM_PER_LY),
            Self::Parsec => Some(KM_PER_PARSEC),
            Self::Kiloparsec => Some(1e3 * KM_PER_PARSEC),
            Self::Megaparsec => Some(1e6 * KM_PER_PARSEC),
        }
    }

    pub(crate) fn name(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Kilometer => Some("km"),
            Self::Meter => Some("m"),
            Self::EarthRadius => Some("rE"),
            Self::JupiterRadius => Some("rJ"),
            Self::SolarRadius => Some("rS"),
            Self::AstronomicalUnit => Some("au"),
            Self::LightYear => Some("ly"),
            Self::Parsec => Some("pc"),
            Self::Kiloparsec => Some("kpc"),
            Self::Megaparsec => Some("Mpc"),
        }
    }
}

/// Time unit of a value, scaled in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeUnit {
    /// No unit was specified.
    #[default]
    Default,
    Second,
    Minute,
    Hour,
    Day,
    JulianYear,
}

impl TimeUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "s" => Some(Self::Second),
            "min" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            "y" => Some(Self::JulianYear),
            _ => None,
        }
    }

    /// Scale of this unit in days, or `None` when unspecified.
    pub fn scale(self) -> Option<f64> {
        match self {
            Self::Default => None,
            Self::Second => Some(1.0 / SECONDS_PER_DAY),
            Self::Minute => Some(1.0 / MINUTES_PER_DAY),
            Self::Hour => Some(1.0 / HOURS_PER_DAY),
            Self::Day => Some(1.0),
            Self::JulianYear => Some(DAYS_PER_JULIAN_YEAR),
        }
    }

    pub(crate) fn name(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Second => Some("s"),
            Self::Minute => Some("min"),
            Self::Hour => Some("h"),
            Self::Day => Some("d"),
            Self::JulianYear => Some("y"),
        }
    }
}

/// Angle unit of a value, scaled in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleUnit {
    /// No unit was specified.
    #[default]
    Default,
    Milliarcsecond,
    Arcsecond,
    Arcminute,
    Degree,
    HourAngle,
    Radian,
}

impl AngleUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mas" => Some(Self::Milliarcsecond),
            "arcsec" => Some(Self::Arcsecond),
            "arcmin" => Some(Self::Arcminute),
            "deg" => Some(Self::Degree),
            "hRA" => Some(Self::HourAngle),
            "rad" => Some(Self::Radian),
            _ => None,
        }
    }

    /// Scale of this unit in degrees, or `None` when unspecified.
    pub fn scale(self) -> Option<f64> {
        match self {
            Self::Default => None,
            Self::Milliarcsecond => Some(1e-3 / ARCSEC_PER_DEG),
            Self::Arcsecond => Some(1.0 / ARCSEC_PER_DEG),
            Self::Arcminute => Some(1.0 / ARCMIN_PER_DEG),
            Self::Degree => Some(1.0),
            Self::HourAngle => Some(DEG_PER_HOUR_ANGLE),
            Self::Radian => Some(180.0 / PI),
        }
    }

    pub(crate) fn name(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Milliarcsecond => Some("mas"),
            Self::Arcsecond => Some("arcsec"),
            Self::Arcminute => Some("arcmin"),
            Self::Degree => Some("deg"),
            Self::HourAngle => Some("hRA"),
            Self::Radian => Some("rad"),
        }
    }
}

/// Mass unit of a value, scaled in Earth masses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MassUnit {
    /// No unit was specified.
    #[default]
    Default,
    Kilogram,
    EarthMass,
    JupiterMass,
}

impl MassUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kg" => Some(Self::Kilogram),
            "mE" => Some(Self::EarthMass),
            "mJ" => Some(Self::JupiterMass),
            _ => None,
        }
    }

    /// Scale of this unit in Earth masses, or `None` when unspecified.
    pub fn scale(self) -> Option<f64> {
        match self {
            Self::Default => None,
            Self::Kilogram => Some(1.0 / EARTH_MASS_KG),
            Self::EarthMass => Some(1.0),
            Self::JupiterMass => Some(JUPITER_MASS_KG / EARTH_MASS_KG),
        }
    }

    pub(crate) fn name(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Kilogram => Some("kg"),
            Self::EarthMass => Some("mE"),
            Self::JupiterMass => Some("mJ"),
        }
    }
}

/// The unit annotation carried by every [`Value`](crate::Value): one unit per
/// physical axis, each defaulting to unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Units {
    pub length: LengthUnit,
    pub time: TimeUnit,
    pub angle: AngleUnit,
    pub mass: MassUnit,
}

impl Units {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
