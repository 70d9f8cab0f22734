//! # Unit Types
//!
//! Lightweight unit handling for the sizing engines. Catalog resistances
//! and reactances are stored per 1000 length units of the owning
//! standard (ohms per 1000 ft, or ohms per km), so every voltage-drop
//! formula divides by [`UNIT_SCALE`].
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::units::{Feet, Meters, LengthUnit};
//!
//! let run: Meters = Feet(100.0).into();
//! assert!((run.0 - 30.48).abs() < 1e-9);
//!
//! let converted = LengthUnit::Feet.convert(30.48, LengthUnit::Meters);
//! assert!((converted - 30.48).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Catalog resistances are per 1000 length units
pub const UNIT_SCALE: f64 = 1000.0;

const METERS_PER_FOOT: f64 = 0.3048;
const MM2_PER_IN2: f64 = 645.16;
/// One circular mil in mm²
const MM2_PER_CMIL: f64 = 5.067_074_790_974_977e-4;

// ============================================================================
// Length
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / METERS_PER_FOOT)
    }
}

/// Length unit a standard's catalog is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Feet,
    Meters,
}

impl LengthUnit {
    /// Parse "ft", "feet", "m", "metres", ...
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "ft" | "feet" | "foot" => Ok(LengthUnit::Feet),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meters),
            other => Err(format!("Unknown length unit '{}' (expected ft or m)", other)),
        }
    }

    /// Convert `value` expressed in `from` into this unit
    pub fn convert(&self, value: f64, from: LengthUnit) -> f64 {
        match (from, self) {
            (LengthUnit::Feet, LengthUnit::Meters) => Meters::from(Feet(value)).0,
            (LengthUnit::Meters, LengthUnit::Feet) => Feet::from(Meters(value)).0,
            _ => value,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
        }
    }
}

// ============================================================================
// Area
// ============================================================================

/// Area unit used by a standard's conduit and wire-area tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareInches,
    SquareMillimeters,
}

impl AreaUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareInches => "in²",
            AreaUnit::SquareMillimeters => "mm²",
        }
    }

    /// Convert an area in this unit to mm²
    pub fn to_mm2(&self, value: f64) -> f64 {
        match self {
            AreaUnit::SquareInches => value * MM2_PER_IN2,
            AreaUnit::SquareMillimeters => value,
        }
    }
}

/// Conductor cross-section for a kcmil size (thousands of circular mils)
pub fn kcmil_to_mm2(kcmil: f64) -> f64 {
    kcmil * 1000.0 * MM2_PER_CMIL
}

/// Conductor cross-section for an AWG gauge number.
///
/// Aught sizes use negative gauge numbers: 1/0 = 0, 2/0 = -1, 3/0 = -2, 4/0 = -3.
pub fn awg_to_mm2(gauge: i32) -> f64 {
    let diameter_mm = 0.127 * 92f64.powf((36.0 - gauge as f64) / 39.0);
    std::f64::consts::PI / 4.0 * diameter_mm * diameter_mm
}

/// Area of a circle from its diameter
pub fn circle_area(diameter: f64) -> f64 {
    std::f64::consts::PI / 4.0 * diameter * diameter
}
