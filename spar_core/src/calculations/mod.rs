//! # Dish Calculations
//!
//! One forward pass turns a resolved [`ParameterSet`] into the
//! [`DerivedGeometry`] of a dish. Each stage reads only the parameters and
//! the stages before it:
//!
//! sleeve → vertex offset → support spar → full spar → cross-piece → metal
//! strips → spar marks
//!
//! ## Stages
//!
//! - [`sleeve`] - Sleeve radius, length and spacer
//! - [`support`] - Vertex offset, spar offsets, vertical support spar, full spar
//! - [`cross`] - Cross-piece and spar marks
//! - [`strips`] - Seam positions and metal strips
//! - [`marks`] - Sorted spar-mark map
//!
//! ## Example
//!
//! ```rust
//! use spar_core::calculations::solve;
//! use spar_core::params::{resolve, ParameterSource, SiteId};
//!
//! let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
//! let geometry = solve(&params).unwrap();
//! assert!((geometry.support.radius - 3002.45).abs() < 1e-9);
//! ```

pub mod cross;
pub mod marks;
pub mod sleeve;
pub mod strips;
pub mod support;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::RootSearch;
use crate::errors::CalcResult;
use crate::params::ParameterSet;

// Re-export commonly used types
pub use cross::{cross_piece, intermediate_reference, spar_marks, CrossPiece};
pub use marks::{MarkCategory, SparMark, SparMarks};
pub use sleeve::{sleeve_clearance, solve_sleeve, SleeveSolution};
pub use strips::{metal_strips, seam_positions, MetalStrips, Seam, SeamPositions};
pub use support::{full_spar, support_spar, vertex_offset, SparOffsets, SupportSpar};

/// Everything derived from one parameter set.
///
/// Built once by [`solve`] or [`solve_with`] and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedGeometry {
    /// vo: hub top to the surface at the sleeve radius
    pub vertex_offset: f64,
    pub sleeve: SleeveSolution,
    pub support: SupportSpar,
    /// Arc length of a spar from the nail to the rim
    pub full_spar: f64,
    pub cross: CrossPiece,
    pub spar_marks: SparMarks,
    pub strips: MetalStrips,
    /// Radius search the geometry was solved with
    pub search: RootSearch,
}

impl DerivedGeometry {
    /// Spar top and bottom offsets for this dish
    pub fn offsets(&self, params: &ParameterSet) -> SparOffsets {
        SparOffsets::new(params, self.vertex_offset)
    }

    /// Straight-line distance from the inner hub edge to the spar top at radius r
    pub fn straight_line_from_hub(&self, params: &ParameterSet, r: f64) -> f64 {
        self.offsets(params)
            .straight_line_from(params.hub_inner_radius, r)
    }
}

/// Solve a dish with the default sampled radius search.
pub fn solve(params: &ParameterSet) -> CalcResult<DerivedGeometry> {
    solve_with(params, RootSearch::default())
}

/// Solve a dish with an explicit radius search.
///
/// # Errors
///
/// * `Geometry` - a derived dimension is physically impossible
/// * `RootNotBracketed` - an arc position cannot be mapped back to a radius
/// * `Configuration` - the search step or tolerance is not positive
pub fn solve_with(params: &ParameterSet, search: RootSearch) -> CalcResult<DerivedGeometry> {
    debug!(site = ?params.site, ?search, "solving dish geometry");

    let sleeve = solve_sleeve(params)?;
    let vo = vertex_offset(params, &sleeve);
    debug!(vo, "vertex offset");
    let support = support_spar(params, vo)?;
    let full = full_spar(params)?;
    debug!(full_spar = full, "full spar");
    let cross = cross_piece(params, search)?;
    let strips = metal_strips(params, search)?;
    let marks = spar_marks(params, &cross, &strips)?;

    Ok(DerivedGeometry {
        vertex_offset: vo,
        sleeve,
        support,
        full_spar: full,
        cross,
        spar_marks: marks,
        strips,
        search,
    })
}
