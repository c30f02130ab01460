//! # spar_core - Parabolic Dish Spar Geometry
//!
//! `spar_core` computes the cut lengths, positions and marks needed to build
//! the spars of a parabolic dish: the hub sleeves, the vertical supports, the
//! cross-pieces between spars and the metal strips across the panel seams.
//! Inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: a parameter set goes in, a derived geometry comes out
//! - **JSON-First**: all inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: structured error types naming the quantity at fault
//!
//! ## Quick Start
//!
//! ```rust
//! use spar_core::{resolve, solve, ReportView};
//! use spar_core::params::{ParameterSource, SiteId};
//!
//! let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
//! let geometry = solve(&params).unwrap();
//!
//! let view = ReportView::new(&params, &geometry);
//! println!("Lv = {}", view.support_length());
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Site presets, explicit input and parameter resolution
//! - [`calculations`] - The solve pipeline and its stages
//! - [`equations`] - Parabola formulas and the equation registry
//! - [`report`] - Unit-aware read-only view of a solved dish
//! - [`units`] - Length units, angles and display measurements
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod params;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{solve, solve_with, DerivedGeometry};
pub use equations::RootSearch;
pub use errors::{CalcError, CalcResult};
pub use params::{resolve, ParameterInput, ParameterSet, ParameterSource, SiteId};
pub use report::ReportView;
pub use units::{LengthUnit, Measurement};
