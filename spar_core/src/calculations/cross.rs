//! # Cross-Piece and Spar Marks
//!
//! A cross-piece braces each pair of adjacent full spars (15° apart) just
//! outside panel A. Its radius sets the reference point for the
//! intermediate spars, from which the metal-strip marks are measured.
//!
//! ## Formulas
//!
//! ```text
//! s           = s(ro) + (A - overlap/2 + p/2)/cos 15°
//! crossRadius = r(s)
//! crossLength = 2·crossRadius·sin 15° - p/cos 15°
//! sInter      = s(crossRadius·cos 15°) + intermediate_spar_offset
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::marks::{MarkCategory, SparMarks};
use super::strips::{MetalStrips, Seam, CROSS_PITCH};
use crate::equations::{parabola_arclength, radius_for_arclength, RootSearch};
use crate::errors::{ensure_non_negative, CalcResult};
use crate::params::ParameterSet;
use crate::units::Radians;

/// Cross-brace between adjacent full spars.
///
/// ## JSON Example
///
/// ```json
/// { "radius": 2093.57, "length": 1018.49, "target_arclength": 2112.05 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossPiece {
    /// Spar radius at the centre of the cross-piece
    pub radius: f64,
    /// Cut length of the cross-piece
    pub length: f64,
    /// Arc position along the spar the radius was searched for
    pub target_arclength: f64,
}

/// Locate and size the cross-piece.
///
/// # Errors
///
/// * `RootNotBracketed` - the target arc position cannot be mapped to a radius
/// * `Geometry` - the spars are too thick for the cross-piece to have length
pub fn cross_piece(params: &ParameterSet, search: RootSearch) -> CalcResult<CrossPiece> {
    let pitch = Radians::from(CROSS_PITCH);
    let f = params.focal_length;
    let p = params.spar_diameter;
    let panels = &params.panels;

    let target = parabola_arclength(params.hub_outer_radius, f)
        + (panels.a - panels.overlap / 2.0 + p / 2.0) / pitch.cos();
    let radius = radius_for_arclength(target, f, search)?;
    let length = ensure_non_negative("crossLength", 2.0 * radius * pitch.sin() - p / pitch.cos())?;

    debug!(target, cross_radius = radius, cross_length = length, "cross-piece sized");
    Ok(CrossPiece {
        radius,
        length,
        target_arclength: target,
    })
}

/// Arc position of the intermediate-spar reference: the point of a full spar
/// level with where the intermediate spar meets the cross-piece, moved out by
/// the intermediate-spar offset.
pub fn intermediate_reference(params: &ParameterSet, cross: &CrossPiece) -> f64 {
    let pitch = Radians::from(CROSS_PITCH);
    parabola_arclength(cross.radius * pitch.cos(), params.focal_length)
        + params.intermediate_spar_offset
}

/// Collect every mark measured along the spars.
///
/// Spar and metal marks are always present. Guide marks are added only when
/// the parameter set carries guide radii.
///
/// # Errors
///
/// * `Geometry` - a mark falls before the point it is measured from
pub fn spar_marks(
    params: &ParameterSet,
    cross: &CrossPiece,
    strips: &MetalStrips,
) -> CalcResult<SparMarks> {
    let f = params.focal_length;
    let pitch = Radians::from(CROSS_PITCH);
    let s_nail = parabola_arclength(params.nail_radius, f);
    let s_inter = intermediate_reference(params, cross);

    let mut marks = SparMarks::default();
    marks.insert(
        MarkCategory::Spar,
        "Cross-Piece",
        parabola_arclength(cross.radius, f) - params.spar_diameter / 2.0 * pitch.tan() - s_nail,
    );

    for seam in Seam::ALL {
        let s = strips.positions.at(seam);
        marks.insert(MarkCategory::Metal, &format!("{}-long", seam.name()), s - s_nail);
        marks.insert(MarkCategory::Metal, &format!("{}-inter", seam.name()), s - s_inter);
    }

    if let Some(guide) = params.guide_radii {
        marks.insert(
            MarkCategory::Guide,
            "Full-Spar",
            parabola_arclength(guide.full_spar, f) - s_nail,
        );
        marks.insert(
            MarkCategory::Guide,
            "Intermediate-Spar",
            parabola_arclength(guide.intermediate_spar, f) - s_inter,
        );
    }

    for (key, distance) in marks.iter() {
        ensure_non_negative(key, distance)?;
    }

    debug!(count = marks.len(), s_inter, "spar marks collected");
    Ok(marks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::strips::metal_strips;
    use crate::errors::CalcError;
    use crate::params::{resolve, GuideRadii, ParameterSource, SiteId};
    use approx::assert_relative_eq;

    fn site(id: SiteId) -> ParameterSet {
        resolve(ParameterSource::Site(id)).unwrap()
    }

    #[test]
    fn test_sa_cross_piece() {
        let cross = cross_piece(&site(SiteId::Sa), RootSearch::default()).unwrap();
        assert_relative_eq!(cross.target_arclength, 2112.0513, epsilon = 1e-3);
        assert_relative_eq!(cross.radius, 2093.5709, epsilon = 1e-3);
        assert_relative_eq!(cross.length, 1018.4896, epsilon = 1e-3);
    }

    #[test]
    fn test_cross_length_identity() {
        for id in [SiteId::Uk, SiteId::Sa] {
            let params = site(id);
            let cross = cross_piece(&params, RootSearch::default()).unwrap();
            let pitch = Radians::from(CROSS_PITCH);
            let lhs = cross.length + params.spar_diameter / pitch.cos();
            let rhs = 2.0 * cross.radius * pitch.sin();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cross_piece_too_short() {
        let mut params = site(SiteId::Sa);
        params.spar_diameter = 2000.0;
        let err = cross_piece(&params, RootSearch::default()).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_sa_marks() {
        let params = site(SiteId::Sa);
        let cross = cross_piece(&params, RootSearch::default()).unwrap();
        let strips = metal_strips(&params, RootSearch::default()).unwrap();
        let marks = spar_marks(&params, &cross, &strips).unwrap();

        assert_eq!(marks.len(), 7);
        assert_relative_eq!(marks.get("1Spar:Cross-Piece").unwrap(), 1874.8365, epsilon = 1e-3);
        assert_relative_eq!(marks.get("2Metal:BC-long").unwrap(), 4018.9677, epsilon = 1e-3);
        assert_relative_eq!(marks.get("2Metal:BC-inter").unwrap(), 2202.8688, epsilon = 1e-3);
        assert_relative_eq!(marks.get("2Metal:DE-inter").unwrap(), 4462.1977, epsilon = 1e-3);
        assert!(marks.get("3Guide:Full-Spar").is_none());
    }

    #[test]
    fn test_uk_guide_marks() {
        let params = site(SiteId::Uk);
        let cross = cross_piece(&params, RootSearch::default()).unwrap();
        let strips = metal_strips(&params, RootSearch::default()).unwrap();
        let marks = spar_marks(&params, &cross, &strips).unwrap();

        assert_eq!(marks.len(), 9);
        assert_relative_eq!(marks.get("3Guide:Full-Spar").unwrap(), 7185.5476, epsilon = 1e-3);
        assert_relative_eq!(
            marks.get("3Guide:Intermediate-Spar").unwrap(),
            5291.2195,
            epsilon = 1e-3
        );
        let last = marks.entries().last().unwrap();
        assert_eq!(last.category, MarkCategory::Guide);
    }

    #[test]
    fn test_negative_mark_rejected() {
        let mut params = site(SiteId::Uk);
        let cross = cross_piece(&params, RootSearch::default()).unwrap();
        let strips = metal_strips(&params, RootSearch::default()).unwrap();
        // A guide mark inside the nail radius lies behind the nail
        params.guide_radii = Some(GuideRadii {
            full_spar: 100.0,
            intermediate_spar: 6750.0,
        });
        let err = spar_marks(&params, &cross, &strips).unwrap_err();
        assert!(
            matches!(err, CalcError::Geometry { ref quantity, .. } if quantity == "3Guide:Full-Spar")
        );
    }

    #[test]
    fn test_inter_marks_shorter_than_long() {
        let params = site(SiteId::Sa);
        let cross = cross_piece(&params, RootSearch::default()).unwrap();
        let strips = metal_strips(&params, RootSearch::default()).unwrap();
        let marks = spar_marks(&params, &cross, &strips).unwrap();
        for seam in Seam::ALL {
            let long = marks.get(&MarkCategory::Metal.key(&format!("{}-long", seam.name())));
            let inter = marks.get(&MarkCategory::Metal.key(&format!("{}-inter", seam.name())));
            assert!(inter.unwrap() < long.unwrap());
        }
    }
}
