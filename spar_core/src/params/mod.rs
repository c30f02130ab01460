//! # Parameter Resolution
//!
//! Turns a site preset or an explicit [`ParameterInput`] into an immutable
//! [`ParameterSet`] that every calculation reads from.
//!
//! ## Sleeve Unknown
//!
//! The sleeve is sized from exactly one of two known values: the sleeve length
//! `Ls` (and the spacer `e` is solved) or the spacer `e` (and `Ls` is solved).
//! In the input form both are optional numbers and resolution rejects "both"
//! and "neither". The resolved form holds a [`SleeveSpec`], so a
//! `ParameterSet` cannot represent the ambiguous cases at all.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::params::{resolve, ParameterSource, SiteId, SleeveSpec};
//!
//! let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
//! assert_eq!(params.sleeve, SleeveSpec::KnownSpacer(0.0));
//! assert_eq!(params.precision, 0);
//! ```

pub mod panels;
pub mod sites;

pub use panels::{Panel, PanelLengths};
pub use sites::SiteId;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::LengthUnit;

/// Which of the two sleeve quantities is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "known", content = "value", rename_all = "snake_case")]
pub enum SleeveSpec {
    /// Sleeve length `Ls` is fixed; the spacer `e` is solved
    KnownLs(f64),
    /// Spacer `e` is fixed; the sleeve length `Ls` is solved
    KnownSpacer(f64),
}

/// Radii of the check marks near the outer end of the spars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideRadii {
    /// Radius of the guide mark on a full spar
    pub full_spar: f64,
    /// Radius of the guide mark on an intermediate spar
    pub intermediate_spar: f64,
}

/// Where a parameter set comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource {
    /// A named site preset
    Site(SiteId),
    /// Explicit values, e.g. a preset overlaid with a JSON file
    Explicit(ParameterInput),
}

/// Unresolved parameters. Every field is optional so inputs can be layered.
///
/// Field names in JSON are the symbols used in the formulas. Panel lengths are
/// always given in millimetres; every other length is in `units`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "units": "mm",
///   "F": 4500.0, "D": 14000.0, "ri": 229.0, "ro": 458.0, "rn": 229.0,
///   "d": 15.55, "b": 59.0, "s": 90.0, "t": 3.9, "p": 63.0, "g": 38.5,
///   "q": 6.0, "Lh": 2720.0, "rh": 213.45, "e": 0.0,
///   "intermediate_spar_offset": 6.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterInput {
    /// Unit of every length except panel lengths
    pub units: Option<LengthUnit>,
    /// Digits after the decimal point; defaults from `units`
    pub precision: Option<usize>,

    /// F: focal length
    #[serde(rename = "F")]
    pub focal_length: Option<f64>,
    /// D: dish diameter
    #[serde(rename = "D")]
    pub diameter: Option<f64>,
    /// ri: inner hub radius
    #[serde(rename = "ri")]
    pub hub_inner_radius: Option<f64>,
    /// ro: outer hub radius
    #[serde(rename = "ro")]
    pub hub_outer_radius: Option<f64>,
    /// rn: distance from center to nail
    #[serde(rename = "rn")]
    pub nail_radius: Option<f64>,
    /// d: distance from nail to inner edge of sleeve
    #[serde(rename = "d")]
    pub nail_to_sleeve: Option<f64>,
    /// b: distance from hub top to sleeve top
    #[serde(rename = "b")]
    pub hub_to_sleeve_top: Option<f64>,
    /// s: outer diameter of sleeve
    #[serde(rename = "s")]
    pub sleeve_diameter: Option<f64>,
    /// t: wall thickness of sleeve
    #[serde(rename = "t")]
    pub sleeve_wall: Option<f64>,
    /// p: spar pipe outer diameter
    #[serde(rename = "p")]
    pub spar_diameter: Option<f64>,
    /// e: sleeve spacer size (give this or `Ls`)
    #[serde(rename = "e")]
    pub spacer: Option<f64>,
    /// Ls: sleeve length (give this or `e`)
    #[serde(rename = "Ls")]
    pub sleeve_length: Option<f64>,
    /// g: distance between bottom of sleeve and top of horizontal support spar
    #[serde(rename = "g")]
    pub sleeve_to_horizontal: Option<f64>,
    /// q: 90 degree coupler offset
    #[serde(rename = "q")]
    pub coupler_offset: Option<f64>,
    /// Lh: horizontal support spar length
    #[serde(rename = "Lh")]
    pub horizontal_length: Option<f64>,
    /// rh: location of inner edge of horizontal support spar
    #[serde(rename = "rh")]
    pub horizontal_radius: Option<f64>,
    /// Offset of the intermediate spar T
    pub intermediate_spar_offset: Option<f64>,
    /// Guide mark radii; sites without them get no guide marks
    pub guide_radii: Option<GuideRadii>,
    /// Panel lengths in millimetres; defaults to the standard panel set
    pub panels: Option<PanelLengths>,
}

/// Symbol and meaning of every input parameter, for help listings.
pub const PARAMETER_DESCRIPTIONS: &[(&str, &str)] = &[
    ("rn", "distance from center to nail"),
    ("b", "distance from hub top to sleeve top"),
    ("s", "outer diameter of sleeve"),
    ("d", "distance from nail to inner edge of sleeve"),
    ("t", "wall thickness of sleeve"),
    ("p", "spar pipe outer diameter"),
    ("e", "sleeve spacer size"),
    ("Ls", "sleeve length"),
    ("g", "distance between bottom of sleeve and top of horiz support spar"),
    ("q", "90deg coupler offset"),
    ("Lh", "horizontal support spar length"),
    ("rh", "location of inner edge of horizontal support spar"),
    ("F", "focal length"),
    ("D", "diameter"),
    ("ri", "inner hub radius"),
    ("ro", "outer hub radius"),
    ("intermediate_spar_offset", "offset of intermediate spar T"),
    ("panels.A-E", "length of panel A-E (mm)"),
    ("panels.overlap", "panel overlap (mm)"),
];

impl ParameterInput {
    /// Parse an input from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// Fields present in `overrides` win. The sleeve pair `(e, Ls)` is taken
    /// as a unit: if `overrides` names either, both come from `overrides`,
    /// so switching a preset from a fixed spacer to a fixed sleeve length
    /// needs only `{"Ls": ...}`.
    pub fn overlay(self, overrides: ParameterInput) -> ParameterInput {
        let (spacer, sleeve_length) =
            if overrides.spacer.is_some() || overrides.sleeve_length.is_some() {
                (overrides.spacer, overrides.sleeve_length)
            } else {
                (self.spacer, self.sleeve_length)
            };

        ParameterInput {
            units: overrides.units.or(self.units),
            precision: overrides.precision.or(self.precision),
            focal_length: overrides.focal_length.or(self.focal_length),
            diameter: overrides.diameter.or(self.diameter),
            hub_inner_radius: overrides.hub_inner_radius.or(self.hub_inner_radius),
            hub_outer_radius: overrides.hub_outer_radius.or(self.hub_outer_radius),
            nail_radius: overrides.nail_radius.or(self.nail_radius),
            nail_to_sleeve: overrides.nail_to_sleeve.or(self.nail_to_sleeve),
            hub_to_sleeve_top: overrides.hub_to_sleeve_top.or(self.hub_to_sleeve_top),
            sleeve_diameter: overrides.sleeve_diameter.or(self.sleeve_diameter),
            sleeve_wall: overrides.sleeve_wall.or(self.sleeve_wall),
            spar_diameter: overrides.spar_diameter.or(self.spar_diameter),
            spacer,
            sleeve_length,
            sleeve_to_horizontal: overrides.sleeve_to_horizontal.or(self.sleeve_to_horizontal),
            coupler_offset: overrides.coupler_offset.or(self.coupler_offset),
            horizontal_length: overrides.horizontal_length.or(self.horizontal_length),
            horizontal_radius: overrides.horizontal_radius.or(self.horizontal_radius),
            intermediate_spar_offset: overrides
                .intermediate_spar_offset
                .or(self.intermediate_spar_offset),
            guide_radii: overrides.guide_radii.or(self.guide_radii),
            panels: overrides.panels.or(self.panels),
        }
    }

    /// Every length in this input multiplied by `factor`.
    ///
    /// Panel lengths are always millimetres and are left alone, as are the
    /// unit and precision.
    pub fn scaled_lengths(self, factor: f64) -> ParameterInput {
        let scale = |v: Option<f64>| v.map(|x| x * factor);
        ParameterInput {
            focal_length: scale(self.focal_length),
            diameter: scale(self.diameter),
            hub_inner_radius: scale(self.hub_inner_radius),
            hub_outer_radius: scale(self.hub_outer_radius),
            nail_radius: scale(self.nail_radius),
            nail_to_sleeve: scale(self.nail_to_sleeve),
            hub_to_sleeve_top: scale(self.hub_to_sleeve_top),
            sleeve_diameter: scale(self.sleeve_diameter),
            sleeve_wall: scale(self.sleeve_wall),
            spar_diameter: scale(self.spar_diameter),
            spacer: scale(self.spacer),
            sleeve_length: scale(self.sleeve_length),
            sleeve_to_horizontal: scale(self.sleeve_to_horizontal),
            coupler_offset: scale(self.coupler_offset),
            horizontal_length: scale(self.horizontal_length),
            horizontal_radius: scale(self.horizontal_radius),
            intermediate_spar_offset: scale(self.intermediate_spar_offset),
            guide_radii: self.guide_radii.map(|g| GuideRadii {
                full_spar: g.full_spar * factor,
                intermediate_spar: g.intermediate_spar * factor,
            }),
            ..self
        }
    }

    /// Resolve the sleeve pair into a [`SleeveSpec`].
    fn sleeve_spec(&self) -> CalcResult<SleeveSpec> {
        match (self.spacer, self.sleeve_length) {
            (Some(e), None) => Ok(SleeveSpec::KnownSpacer(non_negative("e", e)?)),
            (None, Some(ls)) => Ok(SleeveSpec::KnownLs(non_negative("Ls", ls)?)),
            (Some(_), Some(_)) => Err(CalcError::configuration(
                "e/Ls",
                "Both spacer e and sleeve length Ls are given; exactly one must be left to solve",
            )),
            (None, None) => Err(CalcError::configuration(
                "e/Ls",
                "Neither spacer e nor sleeve length Ls is given; exactly one must be known",
            )),
        }
    }
}

/// Fully resolved parameters for one dish.
///
/// Built by [`resolve`] and read-only afterwards. Lengths are in `units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Preset this set was built from, if any
    pub site: Option<SiteId>,
    /// Display unit of every length
    pub units: LengthUnit,
    /// Digits after the decimal point in reports
    pub precision: usize,

    /// F: focal length
    pub focal_length: f64,
    /// D: dish diameter
    pub diameter: f64,
    /// ri: inner hub radius
    pub hub_inner_radius: f64,
    /// ro: outer hub radius
    pub hub_outer_radius: f64,
    /// rn: distance from center to nail
    pub nail_radius: f64,
    /// d: distance from nail to inner edge of sleeve
    pub nail_to_sleeve: f64,
    /// b: distance from hub top to sleeve top
    pub hub_to_sleeve_top: f64,
    /// s: outer diameter of sleeve
    pub sleeve_diameter: f64,
    /// t: wall thickness of sleeve
    pub sleeve_wall: f64,
    /// p: spar pipe outer diameter
    pub spar_diameter: f64,
    /// The fixed sleeve quantity (e or Ls)
    pub sleeve: SleeveSpec,
    /// g: distance between bottom of sleeve and top of horizontal support spar
    pub sleeve_to_horizontal: f64,
    /// q: 90 degree coupler offset
    pub coupler_offset: f64,
    /// Lh: horizontal support spar length
    pub horizontal_length: f64,
    /// rh: location of inner edge of horizontal support spar
    pub horizontal_radius: f64,
    /// Offset of the intermediate spar T
    pub intermediate_spar_offset: f64,
    /// Guide mark radii, if the site uses guide marks
    pub guide_radii: Option<GuideRadii>,
    /// Panel lengths, already converted to `units`
    pub panels: PanelLengths,
}

/// Resolve a site preset or explicit input into a [`ParameterSet`].
///
/// # Errors
///
/// `Configuration` when a required field is missing or not finite, when both
/// or neither of `e` and `Ls` are given, or when the panel lengths are invalid.
pub fn resolve(source: ParameterSource) -> CalcResult<ParameterSet> {
    let (site, input) = match source {
        ParameterSource::Site(site) => (Some(site), site.preset()),
        ParameterSource::Explicit(input) => (None, input),
    };
    let set = resolve_input(site, &input)?;
    debug!(
        site = ?set.site,
        units = %set.units,
        precision = set.precision,
        sleeve = ?set.sleeve,
        "resolved parameter set"
    );
    Ok(set)
}

/// Resolve a site preset with explicit overrides layered on top.
///
/// When the overrides switch to another unit, the preset's own lengths are
/// converted into it first; lengths named in `overrides` are taken as already
/// being in the new unit.
pub fn resolve_with_overrides(site: SiteId, overrides: ParameterInput) -> CalcResult<ParameterSet> {
    let preset = site.preset();
    let preset_units = preset.units.unwrap_or(LengthUnit::Millimetre);
    let preset = match overrides.units {
        Some(target) if target != preset_units => {
            debug!(from = %preset_units, to = %target, "converting preset lengths");
            preset.scaled_lengths(target.mm_factor() / preset_units.mm_factor())
        }
        _ => preset,
    };
    let input = preset.overlay(overrides);
    let mut set = resolve(ParameterSource::Explicit(input))?;
    set.site = Some(site);
    Ok(set)
}

fn resolve_input(site: Option<SiteId>, input: &ParameterInput) -> CalcResult<ParameterSet> {
    let units = input.units.unwrap_or(LengthUnit::Millimetre);
    let precision = input.precision.unwrap_or_else(|| units.default_precision());

    let panels = input.panels.unwrap_or_default();
    panels.validate()?;
    let panels = if units == LengthUnit::Millimetre {
        panels
    } else {
        panels.scaled(units.mm_factor())
    };

    let guide_radii = match input.guide_radii {
        Some(g) => Some(GuideRadii {
            full_spar: non_negative("guide_radii.full_spar", g.full_spar)?,
            intermediate_spar: non_negative("guide_radii.intermediate_spar", g.intermediate_spar)?,
        }),
        None => None,
    };

    Ok(ParameterSet {
        site,
        units,
        precision,
        focal_length: positive("F", required("F", input.focal_length)?)?,
        diameter: positive("D", required("D", input.diameter)?)?,
        hub_inner_radius: length("ri", input.hub_inner_radius)?,
        hub_outer_radius: length("ro", input.hub_outer_radius)?,
        nail_radius: length("rn", input.nail_radius)?,
        nail_to_sleeve: length("d", input.nail_to_sleeve)?,
        hub_to_sleeve_top: length("b", input.hub_to_sleeve_top)?,
        sleeve_diameter: length("s", input.sleeve_diameter)?,
        sleeve_wall: length("t", input.sleeve_wall)?,
        spar_diameter: length("p", input.spar_diameter)?,
        sleeve: input.sleeve_spec()?,
        sleeve_to_horizontal: length("g", input.sleeve_to_horizontal)?,
        coupler_offset: length("q", input.coupler_offset)?,
        horizontal_length: length("Lh", input.horizontal_length)?,
        horizontal_radius: length("rh", input.horizontal_radius)?,
        // Signed: moves the intermediate reference either way along the spar
        intermediate_spar_offset: required(
            "intermediate_spar_offset",
            input.intermediate_spar_offset,
        )?,
        guide_radii,
        panels,
    })
}

fn required(field: &str, value: Option<f64>) -> CalcResult<f64> {
    match value {
        Some(v) => finite(field, v),
        None => Err(CalcError::missing_field(field)),
    }
}

/// Required, finite and not negative
fn length(field: &str, value: Option<f64>) -> CalcResult<f64> {
    let value = required(field, value)?;
    non_negative(field, value)
}

fn non_negative(field: &str, value: f64) -> CalcResult<f64> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::configuration(
            field,
            format!("Length must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

fn positive(field: &str, value: f64) -> CalcResult<f64> {
    if value <= 0.0 {
        return Err(CalcError::configuration(
            field,
            format!("Value must be positive (got {})", value),
        ));
    }
    Ok(value)
}

fn finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::configuration(
            field,
            format!("Value must be a finite number (got {})", value),
        ))
    }
}
