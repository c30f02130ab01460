//! # Vertex Offset and Support Spar
//!
//! Locates the paraboloid relative to the top of the hub, then sizes the
//! vertical support spar that holds each spar up at the end of its
//! horizontal support.
//!
//! ## Offsets
//!
//! Heights are measured from the hub top, positive upward:
//!
//! - `vo = b + t + e + z(rs)` - hub top to the surface at the sleeve radius
//! - `zt(r) = z(r) - vo` - hub top to the top of the spar at radius r
//! - `zb(r) = zt(r) - p/cos θ(r)` - hub top to the bottom of the spar
//!
//! ## Support Spar
//!
//! - `rv = rh + Lh + q + p`
//! - `Lv = zb(rv) + b + s + g - q`
//! - `av = θ(rv)` in degrees

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sleeve::SleeveSolution;
use crate::equations::{parabola_arclength, parabola_height, parabola_tilt};
use crate::errors::{ensure_non_negative, CalcResult};
use crate::params::ParameterSet;
use crate::units::Degrees;

/// Height of the surface at the sleeve radius above the hub top: `vo = b + t + e + z(rs)`
pub fn vertex_offset(params: &ParameterSet, sleeve: &SleeveSolution) -> f64 {
    params.hub_to_sleeve_top
        + params.sleeve_wall
        + sleeve.spacer
        + parabola_height(sleeve.radius, params.focal_length)
}

/// Spar top and bottom heights relative to the hub top, for one solved dish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparOffsets {
    pub focal_length: f64,
    pub vertex_offset: f64,
    pub spar_diameter: f64,
}

impl SparOffsets {
    pub fn new(params: &ParameterSet, vertex_offset: f64) -> Self {
        SparOffsets {
            focal_length: params.focal_length,
            vertex_offset,
            spar_diameter: params.spar_diameter,
        }
    }

    /// Distance from the hub top to the top of the spar at radius r
    pub fn top(&self, r: f64) -> f64 {
        parabola_height(r, self.focal_length) - self.vertex_offset
    }

    /// Distance from the hub top to the bottom of the spar at radius r.
    ///
    /// The spar diameter is measured square to the tilted spar, so its
    /// vertical extent is `p/cos θ`.
    pub fn bottom(&self, r: f64) -> f64 {
        let theta = parabola_tilt(r, self.focal_length);
        self.top(r) - self.spar_diameter / theta.cos()
    }

    /// Straight-line distance from the inner hub edge at `inner_radius` to the
    /// spar top at radius r
    pub fn straight_line_from(&self, inner_radius: f64, r: f64) -> f64 {
        let dr = r - inner_radius;
        let dz = self.top(r);
        (dr * dr + dz * dz).sqrt()
    }
}

/// Vertical support spar.
///
/// ## JSON Example
///
/// ```json
/// { "radius": 3002.45, "length": 536.46, "angle": 18.45 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportSpar {
    /// rv: radius of the vertical support spar
    pub radius: f64,
    /// Lv: length of the vertical support spar
    pub length: f64,
    /// av: surface tilt at rv
    pub angle: Degrees,
}

/// Size the vertical support spar.
///
/// # Errors
///
/// * `Geometry` - `rv` or `Lv` came out negative
pub fn support_spar(params: &ParameterSet, vertex_offset: f64) -> CalcResult<SupportSpar> {
    let offsets = SparOffsets::new(params, vertex_offset);

    let radius = params.horizontal_radius
        + params.horizontal_length
        + params.coupler_offset
        + params.spar_diameter;
    ensure_non_negative("rv", radius)?;

    let length = offsets.bottom(radius)
        + params.hub_to_sleeve_top
        + params.sleeve_diameter
        + params.sleeve_to_horizontal
        - params.coupler_offset;
    ensure_non_negative("Lv", length)?;

    let angle = Degrees::from(parabola_tilt(radius, params.focal_length));

    debug!(rv = radius, lv = length, av = angle.value(), "support spar sized");
    Ok(SupportSpar {
        radius,
        length,
        angle,
    })
}

/// Arc length of a spar from the nail to the rim: `s(D/2) - s(rn)`
///
/// # Errors
///
/// * `Geometry` - the nail sits outside the rim
pub fn full_spar(params: &ParameterSet) -> CalcResult<f64> {
    let f = params.focal_length;
    let length =
        parabola_arclength(params.diameter / 2.0, f) - parabola_arclength(params.nail_radius, f);
    ensure_non_negative("fullSpar", length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sleeve::solve_sleeve;
    use crate::params::{resolve, ParameterSource, SiteId};
    use approx::assert_relative_eq;

    fn sa() -> (ParameterSet, f64) {
        let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
        let sleeve = solve_sleeve(&params).unwrap();
        let vo = vertex_offset(&params, &sleeve);
        (params, vo)
    }

    #[test]
    fn test_sa_vertex_offset() {
        let (_, vo) = sa();
        assert_relative_eq!(vo, 79.4422, epsilon = 1e-4);
    }

    #[test]
    fn test_sa_support_spar() {
        let (params, vo) = sa();
        let support = support_spar(&params, vo).unwrap();
        // rv = 213.45 + 2720 + 6 + 63
        assert_relative_eq!(support.radius, 3002.45, epsilon = 1e-9);
        assert_relative_eq!(support.length, 536.4616, epsilon = 1e-4);
        assert_relative_eq!(support.angle.value(), 18.449, epsilon = 1e-3);
    }

    #[test]
    fn test_uk_support_spar() {
        let params = resolve(ParameterSource::Site(SiteId::Uk)).unwrap();
        let sleeve = solve_sleeve(&params).unwrap();
        let vo = vertex_offset(&params, &sleeve);
        // 55 + 3 + 20.7 + 510²/18000
        assert_relative_eq!(vo, 93.15, epsilon = 1e-9);
        let support = support_spar(&params, vo).unwrap();
        assert_relative_eq!(support.radius, 3314.0);
        assert_relative_eq!(support.length, 610.4497, epsilon = 1e-4);
        assert_relative_eq!(support.angle.value(), 20.2148, epsilon = 1e-4);
    }

    #[test]
    fn test_offsets_at_sleeve_radius() {
        let (params, vo) = sa();
        let sleeve = solve_sleeve(&params).unwrap();
        let offsets = SparOffsets::new(&params, vo);
        // At rs the spar top sits b + t + e below the surface reference
        let expected = -(params.hub_to_sleeve_top + params.sleeve_wall + sleeve.spacer);
        assert_relative_eq!(offsets.top(sleeve.radius), expected, epsilon = 1e-9);
        assert!(offsets.bottom(sleeve.radius) < offsets.top(sleeve.radius) - params.spar_diameter);
    }

    #[test]
    fn test_straight_line_at_hub_edge() {
        let (params, vo) = sa();
        let offsets = SparOffsets::new(&params, vo);
        let ri = params.hub_inner_radius;
        assert_relative_eq!(offsets.straight_line_from(ri, ri), offsets.top(ri).abs());
        assert!(offsets.straight_line_from(ri, 3000.0) > 3000.0 - ri);
    }

    #[test]
    fn test_sa_full_spar() {
        let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
        assert_relative_eq!(full_spar(&params).unwrap(), 7423.4872, epsilon = 1e-3);
    }

    #[test]
    fn test_negative_support_length() {
        let (mut params, vo) = sa();
        params.sleeve_to_horizontal = -1000.0;
        let err = support_spar(&params, vo).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_nail_outside_rim() {
        let mut params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
        params.diameter = 200.0;
        assert!(full_spar(&params).is_err());
    }
}
