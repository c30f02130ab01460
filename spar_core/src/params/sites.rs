//! Site presets.
//!
//! Each build site measured its own hub, sleeve and support hardware. The
//! presets below are the as-built dimensions; panels are the standard set.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GuideRadii, ParameterInput};
use super::panels::PanelLengths;
use crate::errors::{CalcError, CalcResult};
use crate::units::LengthUnit;

/// Known build sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    /// United Kingdom build (sleeve length fixed, spacer solved)
    Uk,
    /// South Africa build (spacer fixed, sleeve length solved)
    Sa,
    /// United States placeholder, in inches
    Us,
}

impl SiteId {
    /// All sites for UI selection
    pub const ALL: [SiteId; 3] = [SiteId::Uk, SiteId::Sa, SiteId::Us];

    /// Short identifier (e.g., "sa")
    pub fn code(&self) -> &'static str {
        match self {
            SiteId::Uk => "uk",
            SiteId::Sa => "sa",
            SiteId::Us => "us",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SiteId::Uk => "United Kingdom",
            SiteId::Sa => "South Africa",
            SiteId::Us => "United States (placeholder)",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "uk" | "gb" | "united-kingdom" => Ok(SiteId::Uk),
            "sa" | "za" | "south-africa" => Ok(SiteId::Sa),
            "us" | "usa" | "united-states" => Ok(SiteId::Us),
            _ => Err(CalcError::configuration(
                "site",
                format!("Unknown site '{}' (expected one of uk, sa, us)", s),
            )),
        }
    }

    /// As-built parameter input for this site
    pub fn preset(&self) -> ParameterInput {
        match self {
            SiteId::Uk => uk_preset(),
            SiteId::Sa => sa_preset(),
            SiteId::Us => us_preset(),
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn uk_preset() -> ParameterInput {
    ParameterInput {
        units: Some(LengthUnit::Millimetre),
        nail_radius: Some(240.0),
        hub_to_sleeve_top: Some(55.0),
        sleeve_diameter: Some(96.0),
        nail_to_sleeve: Some(30.0),
        sleeve_wall: Some(3.0),
        spar_diameter: Some(54.0),
        spacer: None,
        sleeve_length: Some(300.0),
        sleeve_to_horizontal: Some(40.0),
        coupler_offset: Some(40.0),
        horizontal_length: Some(3010.0),
        horizontal_radius: Some(210.0),
        focal_length: Some(4500.0),
        diameter: Some(14000.0),
        hub_inner_radius: Some(230.0),
        hub_outer_radius: Some(450.0),
        intermediate_spar_offset: Some(20.0),
        guide_radii: Some(GuideRadii {
            full_spar: 6820.0,
            intermediate_spar: 6750.0,
        }),
        panels: Some(PanelLengths::default()),
        ..ParameterInput::default()
    }
}

fn sa_preset() -> ParameterInput {
    let nail_head = 8.9;
    let nail_centre = 20.0;
    let nail_to_sleeve = nail_centre - nail_head / 2.0;
    let hub_inner_radius = 458.0 / 2.0;
    // Nail sits on the inner hub wall
    let nail_radius = hub_inner_radius;

    ParameterInput {
        units: Some(LengthUnit::Millimetre),
        nail_to_sleeve: Some(nail_to_sleeve),
        hub_inner_radius: Some(hub_inner_radius),
        hub_outer_radius: Some(916.0 / 2.0),
        nail_radius: Some(nail_radius),
        horizontal_radius: Some(nail_radius - nail_to_sleeve),
        hub_to_sleeve_top: Some(59.0),
        sleeve_diameter: Some(90.0),
        // 90 mm class 9 uPVC
        sleeve_wall: Some(3.9),
        spar_diameter: Some(63.0),
        spacer: Some(0.0),
        sleeve_length: None,
        sleeve_to_horizontal: Some(38.5),
        coupler_offset: Some(6.0),
        horizontal_length: Some(2720.0),
        focal_length: Some(4500.0),
        diameter: Some(14000.0),
        intermediate_spar_offset: Some(6.0),
        panels: Some(PanelLengths::default()),
        ..ParameterInput::default()
    }
}

/// Every dimension is a stand-in of 1 inch. Resolves, but does not solve.
fn us_preset() -> ParameterInput {
    ParameterInput {
        units: Some(LengthUnit::Inch),
        nail_radius: Some(1.0),
        hub_to_sleeve_top: Some(1.0),
        sleeve_diameter: Some(1.0),
        nail_to_sleeve: Some(1.0),
        sleeve_wall: Some(1.0),
        spar_diameter: Some(1.0),
        spacer: Some(0.0),
        sleeve_length: None,
        sleeve_to_horizontal: Some(1.0),
        coupler_offset: Some(1.0),
        horizontal_length: Some(1.0),
        horizontal_radius: Some(1.0),
        focal_length: Some(1.0),
        diameter: Some(1.0),
        hub_inner_radius: Some(1.0),
        hub_outer_radius: Some(1.0),
        intermediate_spar_offset: Some(0.0),
        panels: Some(PanelLengths::default()),
        ..ParameterInput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_site_parsing() {
        assert_eq!(SiteId::from_str_flexible("SA").unwrap(), SiteId::Sa);
        assert_eq!(SiteId::from_str_flexible(" uk ").unwrap(), SiteId::Uk);
        let err = SiteId::from_str_flexible("mars").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_sa_derived_dimensions() {
        let sa = SiteId::Sa.preset();
        assert_relative_eq!(sa.nail_to_sleeve.unwrap(), 15.55, epsilon = 1e-12);
        assert_relative_eq!(sa.nail_radius.unwrap(), 229.0);
        assert_relative_eq!(sa.horizontal_radius.unwrap(), 213.45, epsilon = 1e-12);
        assert_relative_eq!(sa.hub_outer_radius.unwrap(), 458.0);
        assert!(sa.guide_radii.is_none());
    }

    #[test]
    fn test_presets_pick_one_sleeve_unknown() {
        for site in SiteId::ALL {
            let preset = site.preset();
            assert!(
                preset.spacer.is_some() ^ preset.sleeve_length.is_some(),
                "{} must fix exactly one of e and Ls",
                site
            );
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SiteId::Uk).unwrap();
        assert_eq!(json, "\"uk\"");
    }
}
