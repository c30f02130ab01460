//! # Unit Types
//!
//! Display units for dish dimensions and lightweight angle wrappers.
//!
//! Every preset is written in one length unit and all formulas are
//! unit-agnostic, so lengths stay plain `f64`. What needs a type is the
//! *display* contract (unit label plus digits after the decimal point) and
//! the difference between radians and degrees.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::units::{Degrees, LengthUnit, Radians};
//!
//! assert_eq!(LengthUnit::Centimetre.default_precision(), 1);
//! assert!((LengthUnit::Inch.from_mm(25.4) - 1.0).abs() < 1e-12);
//!
//! let angle: Degrees = Radians(std::f64::consts::PI).into();
//! assert!((angle.0 - 180.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Length Units
// ============================================================================

/// Length unit a parameter set is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimetres (storage unit for panel lengths)
    #[serde(rename = "mm")]
    Millimetre,
    /// Centimetres
    #[serde(rename = "cm")]
    Centimetre,
    /// Inches
    #[serde(rename = "in")]
    Inch,
}

impl LengthUnit {
    /// All units for UI selection
    pub const ALL: [LengthUnit; 3] = [
        LengthUnit::Millimetre,
        LengthUnit::Centimetre,
        LengthUnit::Inch,
    ];

    /// Short label printed after values
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Centimetre => "cm",
            LengthUnit::Inch => "in",
        }
    }

    /// Digits after the decimal point when no precision is configured
    pub fn default_precision(&self) -> usize {
        match self {
            LengthUnit::Millimetre => 0,
            LengthUnit::Centimetre => 1,
            LengthUnit::Inch => 1,
        }
    }

    /// Multiplier converting millimetres into this unit
    pub fn mm_factor(&self) -> f64 {
        match self {
            LengthUnit::Millimetre => 1.0,
            LengthUnit::Centimetre => 1.0 / 10.0,
            LengthUnit::Inch => 1.0 / 25.4,
        }
    }

    /// Convert a millimetre length into this unit
    pub fn from_mm(&self, mm: f64) -> f64 {
        mm * self.mm_factor()
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimetre" | "millimeter" | "millimetres" | "millimeters" => {
                Ok(LengthUnit::Millimetre)
            }
            "cm" | "centimetre" | "centimeter" | "centimetres" | "centimeters" => {
                Ok(LengthUnit::Centimetre)
            }
            "in" | "inch" | "inches" | "\"" => Ok(LengthUnit::Inch),
            _ => Err(CalcError::configuration(
                "units",
                format!("Unknown length unit '{}' (expected mm, cm or in)", s),
            )),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Radians);
impl_arithmetic!(Degrees);

impl Radians {
    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

// ============================================================================
// Display Measurement
// ============================================================================

/// A length paired with the unit and precision it should be shown with.
///
/// `Display` prints `value` rounded to `precision` digits followed by the unit
/// label, e.g. `546 mm` or `21.5 in`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Raw value in `unit`
    pub value: f64,
    /// Digits after the decimal point
    pub precision: usize,
    /// Unit the value is expressed in
    pub unit: LengthUnit,
}

impl Measurement {
    /// Pair a value with its display settings
    pub fn new(value: f64, precision: usize, unit: LengthUnit) -> Self {
        Measurement {
            value,
            precision,
            unit,
        }
    }

    /// The value rounded to the display precision, without the unit label
    pub fn formatted_value(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} {}", self.precision, self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_table() {
        assert_eq!(LengthUnit::Millimetre.default_precision(), 0);
        assert_eq!(LengthUnit::Centimetre.default_precision(), 1);
        assert_eq!(LengthUnit::Inch.default_precision(), 1);
        assert_relative_eq!(LengthUnit::Centimetre.from_mm(1616.0), 161.6, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Inch.from_mm(254.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(LengthUnit::from_str_flexible("MM").unwrap(), LengthUnit::Millimetre);
        assert_eq!(LengthUnit::from_str_flexible(" inches ").unwrap(), LengthUnit::Inch);
        let err = LengthUnit::from_str_flexible("furlong").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_angle_conversion() {
        let deg: Degrees = Radians(std::f64::consts::PI / 12.0).into();
        assert_relative_eq!(deg.0, 15.0, epsilon = 1e-12);
        let rad: Radians = Degrees(7.5).into();
        assert_relative_eq!(rad.0, std::f64::consts::PI / 24.0, epsilon = 1e-15);
        assert_relative_eq!((Degrees(10.0) + Degrees(5.0) * 2.0).value(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measurement_display() {
        let m = Measurement::new(545.67, 0, LengthUnit::Millimetre);
        assert_eq!(m.to_string(), "546 mm");
        let m = Measurement::new(21.483, 1, LengthUnit::Inch);
        assert_eq!(m.to_string(), "21.5 in");
        assert_eq!(m.formatted_value(), "21.5");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LengthUnit::Centimetre).unwrap();
        assert_eq!(json, "\"cm\"");
        let roundtrip: LengthUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, LengthUnit::Centimetre);
    }
}
