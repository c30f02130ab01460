//! # Parabola Formulas
//!
//! Surface height, tilt and arc length of the dish profile `z = r²/(4F)`, plus
//! the numeric inverse of the arc length.
//!
//! ## Notation
//!
//! - `F` = Focal length
//! - `r` = Radial distance from the dish axis
//! - `z` = Height of the surface above the vertex
//! - `θ` = Tilt of the surface tangent from horizontal
//! - `s` = Arc length along the surface measured from the vertex
//!
//! All lengths share one unit; nothing here knows which.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::{CalcError, CalcResult};
use crate::units::Radians;

/// Number of samples the default radius scan takes across its bracket.
pub const SCAN_SAMPLES: f64 = 10_000.0;

/// Default bracket width at which [`RootSearch::Bisection`] stops.
pub const DEFAULT_BISECTION_TOLERANCE: f64 = 1.0e-6;

/// Largest number of samples a caller-supplied scan step may ask for.
pub const MAX_SCAN_SAMPLES: f64 = 1.0e8;

/// Upper bound on bisection halvings; 200 halvings exhaust f64 resolution.
const MAX_BISECTION_STEPS: usize = 200;

// =============================================================================
// SURFACE
// =============================================================================

/// Height of the paraboloid surface above the vertex at radius r
///
/// # Formula
/// - z(r) = r²/(4F)
#[inline]
pub fn parabola_height(r: f64, f: f64) -> f64 {
    r * r / (4.0 * f)
}

/// Tilt of the surface tangent at radius r
///
/// # Formula
/// - θ(r) = atan(r/(2F))
#[inline]
pub fn parabola_tilt(r: f64, f: f64) -> Radians {
    Radians((r / (2.0 * f)).atan())
}

/// Arc length along the parabola from the vertex out to radius r
///
/// # Formula
/// With t = 2F and q = √(t² + r²):
/// - s(r) = (r·q/t + t·ln((r + q)/t)) / 2
///
/// s(0) = 0 and s is strictly increasing for r ≥ 0.
#[inline]
pub fn parabola_arclength(r: f64, f: f64) -> f64 {
    let t = 2.0 * f;
    let q = (t * t + r * r).sqrt();
    (r * q / t + t * ((r + q) / t).ln()) / 2.0
}

// =============================================================================
// INVERSE ARC LENGTH
// =============================================================================

/// Strategy for inverting [`parabola_arclength`].
///
/// Both strategies search the bracket `[s/2, 2s]` and return a radius on the
/// *overshoot* side of the target: a radius whose arc length is strictly
/// greater than `s`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RootSearch {
    /// Walk the bracket in fixed steps and return the first sample that
    /// overshoots. `step: None` uses `(2s - s/2) / 10000`.
    ///
    /// Printed cut lists depend on this exact sample, so it is the default.
    Sampled { step: Option<f64> },
    /// Halve the bracket until it is narrower than `tolerance`, then return
    /// its upper end.
    Bisection { tolerance: f64 },
}

impl Default for RootSearch {
    fn default() -> Self {
        RootSearch::Sampled { step: None }
    }
}

impl RootSearch {
    /// Bisection with [`DEFAULT_BISECTION_TOLERANCE`]
    pub fn bisection() -> Self {
        RootSearch::Bisection {
            tolerance: DEFAULT_BISECTION_TOLERANCE,
        }
    }

    /// Worst-case distance between the returned radius and the exact root for
    /// target arc length `s`.
    pub fn resolution(&self, s: f64) -> f64 {
        match *self {
            RootSearch::Sampled { step } => step.unwrap_or_else(|| default_scan_step(s)),
            RootSearch::Bisection { tolerance } => tolerance,
        }
    }
}

/// Radius search bracket `[s/2, 2s]` for target arc length s
#[inline]
pub fn arclength_bracket(s: f64) -> (f64, f64) {
    (s / 2.0, 2.0 * s)
}

/// Scan step giving [`SCAN_SAMPLES`] samples across the bracket for s
#[inline]
pub fn default_scan_step(s: f64) -> f64 {
    let (lower, upper) = arclength_bracket(s);
    (upper - lower) / SCAN_SAMPLES
}

/// Find the radius at which the arc length from the vertex reaches `s`.
///
/// There is no closed form, so the radius is searched for inside
/// `[s/2, 2s]`, which contains the root whenever the dish is shallower than
/// `s < 16F`. `s = 0` maps to the vertex.
///
/// # Errors
///
/// * `RootNotBracketed` - `s` is negative or not finite, the lower end of the
///   bracket already overshoots, or no sample/bisection point overshoots
/// * `Configuration` - the scan step or bisection tolerance is not positive, or
///   the step is so fine the scan would exceed [`MAX_SCAN_SAMPLES`]
pub fn radius_for_arclength(s: f64, f: f64, search: RootSearch) -> CalcResult<f64> {
    if s == 0.0 {
        return Ok(0.0);
    }
    let (lower, upper) = arclength_bracket(s);
    if !s.is_finite() || s < 0.0 {
        return Err(CalcError::root_not_bracketed(s, lower, upper));
    }
    if parabola_arclength(lower, f) > s {
        return Err(CalcError::root_not_bracketed(s, lower, upper));
    }

    match search {
        RootSearch::Sampled { step } => {
            let step = step.unwrap_or_else(|| default_scan_step(s));
            sampled_search(s, f, lower, upper, step)
        }
        RootSearch::Bisection { tolerance } => bisection_search(s, f, lower, upper, tolerance),
    }
}

/// First sample `lower + i·step` (i = 0, 1, ... while below `upper`) whose arc
/// length exceeds `target`.
fn sampled_search(target: f64, f: f64, lower: f64, upper: f64, step: f64) -> CalcResult<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Err(CalcError::configuration(
            "step",
            format!("Scan step must be a positive number (got {})", step),
        ));
    }

    let samples = ((upper - lower) / step).ceil();
    if samples > MAX_SCAN_SAMPLES {
        return Err(CalcError::configuration(
            "step",
            format!(
                "Scan step {} needs {} samples (at most {} allowed)",
                step, samples, MAX_SCAN_SAMPLES
            ),
        ));
    }
    let count = samples as usize;
    for i in 0..count {
        let r = lower + i as f64 * step;
        if parabola_arclength(r, f) > target {
            trace!(target, r, sample = i, "arc length scan overshoot");
            return Ok(r);
        }
    }
    Err(CalcError::root_not_bracketed(target, lower, upper))
}

fn bisection_search(target: f64, f: f64, lower: f64, upper: f64, tolerance: f64) -> CalcResult<f64> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(CalcError::configuration(
            "tolerance",
            format!("Bisection tolerance must be a positive number (got {})", tolerance),
        ));
    }
    if parabola_arclength(upper, f) <= target {
        return Err(CalcError::root_not_bracketed(target, lower, upper));
    }

    let (mut lo, mut hi) = (lower, upper);
    for _ in 0..MAX_BISECTION_STEPS {
        if hi - lo <= tolerance {
            break;
        }
        let mid = lo + (hi - lo) / 2.0;
        if parabola_arclength(mid, f) > target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    trace!(target, r = hi, width = hi - lo, "arc length bisection converged");
    Ok(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const F: f64 = 4500.0;
    const D: f64 = 14000.0;

    #[test]
    fn test_surface_height_and_tilt() {
        // z(2F) = 4F²/4F = F, and the tangent there sits at 45°
        assert_relative_eq!(parabola_height(2.0 * F, F), F);
        assert_relative_eq!(parabola_tilt(2.0 * F, F).0, std::f64::consts::FRAC_PI_4);
        assert_eq!(parabola_height(0.0, F), 0.0);
    }

    #[test]
    fn test_arclength_at_vertex_is_zero() {
        for f in [1.0, 250.0, 4500.0, 1.0e6] {
            assert_eq!(parabola_arclength(0.0, f), 0.0);
        }
    }

    #[test]
    fn test_arclength_known_value() {
        // At r = 2F: s = F(√2 + ln(1 + √2))
        let expected = F * (2.0_f64.sqrt() + (1.0 + 2.0_f64.sqrt()).ln());
        assert_relative_eq!(parabola_arclength(2.0 * F, F), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_arclength_close_to_radius_near_vertex() {
        // Nearly flat near the vertex: s ≈ r + r³/(24F²)
        let r: f64 = 100.0;
        let approx = r + r.powi(3) / (24.0 * F * F);
        assert_relative_eq!(parabola_arclength(r, F), approx, max_relative = 1e-9);
    }

    #[test]
    fn test_sampled_search_returns_first_overshoot() {
        let s = parabola_arclength(3000.0, F);
        let step = default_scan_step(s);
        let r = radius_for_arclength(s, F, RootSearch::default()).unwrap();

        assert!(parabola_arclength(r, F) > s);
        assert!(parabola_arclength(r - step, F) <= s);

        // Result is exactly one of the grid samples
        let (lower, _) = arclength_bracket(s);
        let index = ((r - lower) / step).round();
        assert_eq!(r, lower + index * step);
    }

    #[test]
    fn test_explicit_step() {
        let s = parabola_arclength(1234.5, F);
        let r = radius_for_arclength(s, F, RootSearch::Sampled { step: Some(1.0) }).unwrap();
        assert!(r > 1234.5 && r <= 1235.5 + 1e-9);
    }

    #[test]
    fn test_zero_arclength_is_vertex() {
        assert_eq!(radius_for_arclength(0.0, F, RootSearch::default()).unwrap(), 0.0);
        assert_eq!(radius_for_arclength(0.0, F, RootSearch::bisection()).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_or_nan_target_not_bracketed() {
        for s in [-10.0, f64::NAN, f64::INFINITY] {
            let err = radius_for_arclength(s, F, RootSearch::default()).unwrap_err();
            assert_eq!(err.error_code(), "ROOT_NOT_BRACKETED");
        }
    }

    #[test]
    fn test_too_deep_target_not_bracketed() {
        // Far past s = 16F the lower bracket end already overshoots
        let err = radius_for_arclength(100.0 * F, F, RootSearch::default()).unwrap_err();
        assert!(matches!(err, CalcError::RootNotBracketed { .. }));
    }

    #[test]
    fn test_scan_that_never_overshoots_is_an_error() {
        // A step wider than the whole bracket leaves only the lower end sampled
        let s = parabola_arclength(3000.0, F);
        let err = radius_for_arclength(s, F, RootSearch::Sampled { step: Some(10.0 * s) }).unwrap_err();
        assert!(matches!(err, CalcError::RootNotBracketed { .. }));
    }

    #[test]
    fn test_invalid_step_and_tolerance() {
        let s = parabola_arclength(3000.0, F);
        let err = radius_for_arclength(s, F, RootSearch::Sampled { step: Some(0.0) }).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        let err = radius_for_arclength(s, F, RootSearch::Bisection { tolerance: -1.0 }).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_step_too_fine_rejected() {
        let s = parabola_arclength(3000.0, F);
        let err = radius_for_arclength(s, F, RootSearch::Sampled { step: Some(1e-12) }).unwrap_err();
        assert!(matches!(err, CalcError::Configuration { ref field, .. } if field == "step"));

        // The default step stays well inside the cap
        assert!(radius_for_arclength(s, F, RootSearch::default()).is_ok());
    }

    #[test]
    fn test_bisection_agrees_with_scan() {
        let s = parabola_arclength(5321.0, F);
        let sampled = radius_for_arclength(s, F, RootSearch::default()).unwrap();
        let bisected = radius_for_arclength(s, F, RootSearch::bisection()).unwrap();
        assert!((sampled - bisected).abs() <= default_scan_step(s));
        assert!((bisected - 5321.0).abs() <= DEFAULT_BISECTION_TOLERANCE * 2.0);
        assert!(parabola_arclength(bisected, F) > s);
    }

    #[test]
    fn test_search_serialization() {
        let json = serde_json::to_string(&RootSearch::bisection()).unwrap();
        assert!(json.contains("\"mode\":\"bisection\""));
        let roundtrip: RootSearch = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, RootSearch::bisection());
    }

    proptest! {
        #[test]
        fn arclength_strictly_increasing(a in 0.0..D, b in 0.0..D) {
            prop_assume!((a - b).abs() > 1e-6);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(parabola_arclength(lo, F) < parabola_arclength(hi, F));
        }

        #[test]
        fn sampled_round_trip_within_step(r in 0.0..(D / 2.0)) {
            let s = parabola_arclength(r, F);
            let found = radius_for_arclength(s, F, RootSearch::default()).unwrap();
            let step = RootSearch::default().resolution(s);
            prop_assert!((found - r).abs() <= step * (1.0 + 1e-9) + 1e-9);
        }

        #[test]
        fn bisection_round_trip_within_tolerance(r in 1.0..(D / 2.0)) {
            let s = parabola_arclength(r, F);
            let found = radius_for_arclength(s, F, RootSearch::bisection()).unwrap();
            prop_assert!((found - r).abs() <= DEFAULT_BISECTION_TOLERANCE * 2.0);
        }
    }
}
