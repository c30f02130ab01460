//! # Report View
//!
//! Read-only pairing of a [`ParameterSet`] with its [`DerivedGeometry`] that
//! hands every length out as a [`Measurement`] carrying the set's unit and
//! precision. Renderers (text, JSON, UI) format from here and never touch the
//! raw numbers.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::{resolve, solve, ReportView};
//! use spar_core::params::{ParameterSource, SiteId};
//!
//! let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
//! let geometry = solve(&params).unwrap();
//! let view = ReportView::new(&params, &geometry);
//! assert_eq!(view.sleeve_radius().to_string(), "546 mm");
//! ```

use serde::Serialize;

use crate::calculations::{DerivedGeometry, MarkCategory, Seam};
use crate::params::{ParameterSet, SiteId};
use crate::units::{Degrees, LengthUnit, Measurement};

/// One spar-mark row, in print order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkRow {
    pub category: MarkCategory,
    pub name: String,
    pub distance: Measurement,
}

/// Display view over a solved dish
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    params: &'a ParameterSet,
    geometry: &'a DerivedGeometry,
}

impl<'a> ReportView<'a> {
    pub fn new(params: &'a ParameterSet, geometry: &'a DerivedGeometry) -> Self {
        ReportView { params, geometry }
    }

    pub fn params(&self) -> &'a ParameterSet {
        self.params
    }

    pub fn geometry(&self) -> &'a DerivedGeometry {
        self.geometry
    }

    pub fn site(&self) -> Option<SiteId> {
        self.params.site
    }

    pub fn unit(&self) -> LengthUnit {
        self.params.units
    }

    pub fn precision(&self) -> usize {
        self.params.precision
    }

    /// Wrap a raw length in this view's unit and precision
    pub fn measure(&self, value: f64) -> Measurement {
        Measurement::new(value, self.params.precision, self.params.units)
    }

    // ------------------------------------------------------------------
    // Derived geometry
    // ------------------------------------------------------------------

    pub fn vertex_offset(&self) -> Measurement {
        self.measure(self.geometry.vertex_offset)
    }

    pub fn sleeve_length(&self) -> Measurement {
        self.measure(self.geometry.sleeve.length)
    }

    pub fn spacer(&self) -> Measurement {
        self.measure(self.geometry.sleeve.spacer)
    }

    pub fn sleeve_radius(&self) -> Measurement {
        self.measure(self.geometry.sleeve.radius)
    }

    pub fn support_length(&self) -> Measurement {
        self.measure(self.geometry.support.length)
    }

    pub fn support_radius(&self) -> Measurement {
        self.measure(self.geometry.support.radius)
    }

    /// Surface tilt at the vertical support
    pub fn support_angle(&self) -> Degrees {
        self.geometry.support.angle
    }

    pub fn full_spar(&self) -> Measurement {
        self.measure(self.geometry.full_spar)
    }

    pub fn cross_radius(&self) -> Measurement {
        self.measure(self.geometry.cross.radius)
    }

    pub fn cross_length(&self) -> Measurement {
        self.measure(self.geometry.cross.length)
    }

    pub fn strip_length(&self, seam: Seam) -> Measurement {
        self.measure(self.geometry.strips.length(seam))
    }

    /// Arc position of every seam, A-B through the outer end of E
    pub fn seam_positions(&self) -> [(&'static str, Measurement); 5] {
        let p = &self.geometry.strips.positions;
        [
            ("AB", self.measure(p.s_ab)),
            ("BC", self.measure(p.s_bc)),
            ("CD", self.measure(p.s_cd)),
            ("DE", self.measure(p.s_de)),
            ("E", self.measure(p.s_e)),
        ]
    }

    pub fn panel_e_end_radius(&self) -> Measurement {
        self.measure(self.geometry.strips.r_end_of_e)
    }

    /// Spar marks in sorted key order
    pub fn spar_marks(&self) -> Vec<MarkRow> {
        self.geometry
            .spar_marks
            .entries()
            .map(|mark| MarkRow {
                category: mark.category,
                name: mark.name.to_string(),
                distance: self.measure(mark.distance),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Echoed inputs
    // ------------------------------------------------------------------

    pub fn sleeve_diameter(&self) -> Measurement {
        self.measure(self.params.sleeve_diameter)
    }

    pub fn sleeve_wall(&self) -> Measurement {
        self.measure(self.params.sleeve_wall)
    }

    pub fn horizontal_length(&self) -> Measurement {
        self.measure(self.params.horizontal_length)
    }

    pub fn horizontal_radius(&self) -> Measurement {
        self.measure(self.params.horizontal_radius)
    }

    pub fn coupler_offset(&self) -> Measurement {
        self.measure(self.params.coupler_offset)
    }

    pub fn spar_diameter(&self) -> Measurement {
        self.measure(self.params.spar_diameter)
    }
}
