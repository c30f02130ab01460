//! # Dish Geometry Equations
//!
//! The fundamental formulas of the dish profile, kept in one place so they
//! can be checked against the registry and reused by every calculation.
//!
//! ## Modules
//!
//! - [`parabola`] - Surface height, tilt, arc length and its numeric inverse
//! - [`registry`] - Equation metadata and markdown reference generation
//!
//! ## Conventions
//!
//! - **Radius**: measured horizontally from the dish axis
//! - **Height**: positive upward from the vertex
//! - **Arc length**: measured along the surface from the vertex

pub mod parabola;
pub mod registry;

// Re-export commonly used items
pub use parabola::{
    arclength_bracket,
    default_scan_step,
    parabola_arclength,
    parabola_height,
    parabola_tilt,
    radius_for_arclength,
    RootSearch,
    DEFAULT_BISECTION_TOLERANCE,
    MAX_SCAN_SAMPLES,
    SCAN_SAMPLES,
};

pub use registry::{
    generate_equations_markdown,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
};
