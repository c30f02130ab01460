//! # Error Types
//!
//! Structured error types for spar_core. Every failure names the quantity or
//! field at fault so a caller can report it without parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::errors::{CalcError, CalcResult};
//!
//! fn check_focal_length(f: f64) -> CalcResult<()> {
//!     if f <= 0.0 {
//!         return Err(CalcError::geometry("F", f, "Focal length must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_focal_length(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spar_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for resolving and solving dish geometry.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The parameter set could not be resolved (unknown site, missing field,
    /// ambiguous sleeve unknown, bad unit)
    #[error("Configuration error for '{field}': {reason}")]
    Configuration { field: String, reason: String },

    /// A formula produced a physically impossible result
    #[error("Geometry error: {quantity} = {value} - {reason}")]
    Geometry {
        quantity: String,
        value: f64,
        reason: String,
    },

    /// The radius search never crossed the requested arc length
    #[error("Root not bracketed: arc length {target} not reached for r in [{lower}, {upper}]")]
    RootNotBracketed { target: f64, lower: f64, upper: f64 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl CalcError {
    /// Create a Configuration error
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a Configuration error for a required field that was not supplied
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::configuration(field, "Required field is missing")
    }

    /// Create a Geometry error
    pub fn geometry(quantity: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::Geometry {
            quantity: quantity.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a RootNotBracketed error
    pub fn root_not_bracketed(target: f64, lower: f64, upper: f64) -> Self {
        CalcError::RootNotBracketed {
            target,
            lower,
            upper,
        }
    }

    /// Create a Serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::Serialization {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::Geometry { .. } => "GEOMETRY_ERROR",
            CalcError::RootNotBracketed { .. } => "ROOT_NOT_BRACKETED",
            CalcError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Reject a derived length or radius that came out negative.
pub(crate) fn ensure_non_negative(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_nan() || value < 0.0 {
        return Err(CalcError::geometry(
            quantity,
            value,
            "Derived dimension is negative - geometry is physically impossible",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::geometry("rs", -1.5, "Negative radius");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Geometry\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("F").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            CalcError::root_not_bracketed(10.0, 5.0, 20.0).error_code(),
            "ROOT_NOT_BRACKETED"
        );
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("Lv", 0.0).unwrap(), 0.0);
        let err = ensure_non_negative("Lv", -0.1).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
        assert!(ensure_non_negative("Lv", f64::NAN).is_err());
    }
}
