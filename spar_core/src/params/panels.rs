//! Dish panel lengths.
//!
//! Panels A-E run outward from the hub; neighbouring panels overlap by a fixed
//! amount. Lengths are stored in millimetres and rescaled when a parameter set
//! is displayed in another unit.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One of the five panel rings, hub outward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Panel {
    A,
    B,
    C,
    D,
    E,
}

impl Panel {
    /// All panels, hub outward
    pub const ALL: [Panel; 5] = [Panel::A, Panel::B, Panel::C, Panel::D, Panel::E];

    /// Single-letter label
    pub fn letter(&self) -> char {
        match self {
            Panel::A => 'A',
            Panel::B => 'B',
            Panel::C => 'C',
            Panel::D => 'D',
            Panel::E => 'E',
        }
    }
}

/// Lengths of panels A-E plus the overlap between neighbours.
///
/// ## JSON Example
///
/// ```json
/// { "A": 1616.0, "B": 2250.0, "C": 1220.0, "D": 1220.0, "E": 1220.0, "overlap": 100.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLengths {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "E")]
    pub e: f64,
    /// Overlap between neighbouring panels
    pub overlap: f64,
}

impl Default for PanelLengths {
    /// Standard panel set in millimetres
    fn default() -> Self {
        PanelLengths {
            a: 1616.0,
            b: 2250.0,
            c: 1220.0,
            d: 1220.0,
            e: 1220.0,
            overlap: 100.0,
        }
    }
}

impl PanelLengths {
    /// Length of one panel
    pub fn length(&self, panel: Panel) -> f64 {
        match panel {
            Panel::A => self.a,
            Panel::B => self.b,
            Panel::C => self.c,
            Panel::D => self.d,
            Panel::E => self.e,
        }
    }

    /// Every entry, overlap included, multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        PanelLengths {
            a: self.a * factor,
            b: self.b * factor,
            c: self.c * factor,
            d: self.d * factor,
            e: self.e * factor,
            overlap: self.overlap * factor,
        }
    }

    /// Validate that every entry is a finite, non-negative length.
    pub fn validate(&self) -> CalcResult<()> {
        let entries = Panel::ALL
            .iter()
            .map(|p| (format!("panels.{}", p.letter()), self.length(*p)))
            .chain(std::iter::once(("panels.overlap".to_string(), self.overlap)));
        for (field, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::configuration(
                    field,
                    format!("Panel length must be a non-negative number (got {})", value),
                ));
            }
        }
        Ok(())
    }
}
