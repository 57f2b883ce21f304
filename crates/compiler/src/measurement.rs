//! Length tokens such as `50cm`, `2m` or `0.5inch`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length returned when a token carries no recognizable measurement
pub const DEFAULT_LENGTH: f64 = 1.0;

/// Length unit accepted after a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Unit> {
        match suffix {
            "mm" => Some(Unit::Millimeter),
            "cm" => Some(Unit::Centimeter),
            "m" => Some(Unit::Meter),
            "inch" => Some(Unit::Inch),
            "foot" => Some(Unit::Foot),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Inch => "inch",
            Unit::Foot => "foot",
        }
    }

    /// Conversion factor to meters
    pub fn to_meters(&self) -> f64 {
        match self {
            Unit::Millimeter => 0.001,
            Unit::Centimeter => 0.01,
            Unit::Meter => 1.0,
            Unit::Inch => 0.0254,
            Unit::Foot => 0.3048,
        }
    }
}

/// A number followed by a unit, plus whatever text trails the unit
#[derive(Debug, Clone, Copy, PartialEq)]
struct Measurement<'a> {
    value: f64,
    unit: Unit,
    rest: &'a str,
}

impl Measurement<'_> {
    fn meters(&self) -> f64 {
        self.value * self.unit.to_meters()
    }
}

/// Number then unit at the start of a token; `mm` is tried before `m`
static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9.]+)(mm|cm|m|inch|foot)").expect("measurement pattern compiles")
});

/// Split a lower-case token into number, unit and trailing text
fn scan(token: &str) -> Option<Measurement<'_>> {
    let caps = MEASUREMENT.captures(token)?;
    let value = caps[1].parse::<f64>().ok()?;
    let unit = Unit::from_suffix(&caps[2])?;
    let end = caps.get(0).map_or(token.len(), |m| m.end());
    Some(Measurement {
        value,
        unit,
        rest: &token[end..],
    })
}

/// Convert a measurement token to meters, defaulting to 1.0 m
pub fn parse_measurement(token: &str) -> f64 {
    scan(&token.to_lowercase())
        .map(|m| m.meters())
        .unwrap_or(DEFAULT_LENGTH)
}

/// True if the whole token is exactly a number followed by one unit
pub fn is_measurement(token: &str) -> bool {
    scan(&token.to_lowercase()).is_some_and(|m| m.rest.is_empty())
}
