//! # Metal Strips
//!
//! Panels B-E are joined by metal strips laid across the seams between them.
//! Each seam is located by its arc position along the spar, measured from the
//! vertex; the strip spans the chord between two spars 7.5° apart.
//!
//! ## Formulas
//!
//! ```text
//! sAB = s(ro) + (A - overlap/2)/cos 15°
//! sBC = sAB + (B - overlap)/cos 7.5°
//! sCD = sBC + (C - overlap)/cos 7.5°
//! sDE = sCD + (D - overlap)/cos 7.5°
//! sE  = sDE + E/cos 7.5°
//! mXY = 2·r(sXY)·sin 7.5° + p/cos 7.5°
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{parabola_arclength, radius_for_arclength, RootSearch};
use crate::errors::{ensure_non_negative, CalcResult};
use crate::params::ParameterSet;
use crate::units::{Degrees, Radians};

/// Angle between adjacent full spars
pub const CROSS_PITCH: Degrees = Degrees(15.0);

/// Angle between a full spar and its neighbouring intermediate spar
pub const SEAM_PITCH: Degrees = Degrees(7.5);

/// A seam that carries a metal strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seam {
    BC,
    CD,
    DE,
}

impl Seam {
    pub const ALL: [Seam; 3] = [Seam::BC, Seam::CD, Seam::DE];

    pub fn name(&self) -> &'static str {
        match self {
            Seam::BC => "BC",
            Seam::CD => "CD",
            Seam::DE => "DE",
        }
    }
}

/// Arc positions of the seams, measured from the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeamPositions {
    pub s_ab: f64,
    pub s_bc: f64,
    pub s_cd: f64,
    pub s_de: f64,
    /// Outer end of panel E
    pub s_e: f64,
}

impl SeamPositions {
    /// Position of a strip-carrying seam
    pub fn at(&self, seam: Seam) -> f64 {
        match seam {
            Seam::BC => self.s_bc,
            Seam::CD => self.s_cd,
            Seam::DE => self.s_de,
        }
    }
}

/// Strip lengths and the radius where the panels end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetalStrips {
    pub bc: f64,
    pub cd: f64,
    pub de: f64,
    /// Radius at the outer end of panel E
    pub r_end_of_e: f64,
    pub positions: SeamPositions,
}

impl MetalStrips {
    /// Strip length across a seam
    pub fn length(&self, seam: Seam) -> f64 {
        match seam {
            Seam::BC => self.bc,
            Seam::CD => self.cd,
            Seam::DE => self.de,
        }
    }
}

/// Lay the panels out along the spar from the outer hub edge.
pub fn seam_positions(params: &ParameterSet) -> SeamPositions {
    let cross = Radians::from(CROSS_PITCH).cos();
    let seam = Radians::from(SEAM_PITCH).cos();
    let panels = &params.panels;
    let overlap = panels.overlap;

    let s_ab = parabola_arclength(params.hub_outer_radius, params.focal_length)
        + (panels.a - overlap / 2.0) / cross;
    let s_bc = s_ab + (panels.b - overlap) / seam;
    let s_cd = s_bc + (panels.c - overlap) / seam;
    let s_de = s_cd + (panels.d - overlap) / seam;
    let s_e = s_de + panels.e / seam;

    SeamPositions {
        s_ab,
        s_bc,
        s_cd,
        s_de,
        s_e,
    }
}

/// Size the metal strips across seams BC, CD and DE.
///
/// # Errors
///
/// * `RootNotBracketed` - a seam position cannot be mapped back to a radius
/// * `Geometry` - a strip length or the end radius came out negative
pub fn metal_strips(params: &ParameterSet, search: RootSearch) -> CalcResult<MetalStrips> {
    let positions = seam_positions(params);
    let f = params.focal_length;
    let pitch = Radians::from(SEAM_PITCH);
    let strip = |seam: Seam| -> CalcResult<f64> {
        let r = radius_for_arclength(positions.at(seam), f, search)?;
        let length = 2.0 * r * pitch.sin() + params.spar_diameter / pitch.cos();
        ensure_non_negative(&format!("m{}", seam.name()), length)
    };

    let strips = MetalStrips {
        bc: strip(Seam::BC)?,
        cd: strip(Seam::CD)?,
        de: strip(Seam::DE)?,
        r_end_of_e: ensure_non_negative(
            "r_end_of_E",
            radius_for_arclength(positions.s_e, f, search)?,
        )?,
        positions,
    };
    debug!(
        m_bc = strips.bc,
        m_cd = strips.cd,
        m_de = strips.de,
        r_end_of_e = strips.r_end_of_e,
        "metal strips sized"
    );
    Ok(strips)
}
