//! # Equation Registry
//!
//! Central registry of every formula used to size the spar hardware. Each
//! equation carries its formula, variable definitions and the function that
//! implements it, so a cut list can be audited line by line.
//!
//! ## Usage
//!
//! ```rust
//! use spar_core::equations::registry::{Equation, EquationCategory};
//!
//! let meta = Equation::ParabolaArclength.metadata();
//! assert_eq!(meta.category, EquationCategory::Parabola);
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Surface height, tilt and arc length of the dish profile
    Parabola,
    /// Sleeve length and spacer size
    Sleeve,
    /// Vertex offset and vertical support spar
    SupportSpar,
    /// Cross-brace position, chord and spar marks
    CrossPiece,
    /// Metal strips across panel seams
    MetalStrips,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Parabola => "Parabola",
            EquationCategory::Sleeve => "Sleeve",
            EquationCategory::SupportSpar => "Support Spar",
            EquationCategory::CrossPiece => "Cross Piece",
            EquationCategory::MetalStrips => "Metal Strips",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Parabola => 1,
            EquationCategory::Sleeve => 2,
            EquationCategory::SupportSpar => 3,
            EquationCategory::CrossPiece => 4,
            EquationCategory::MetalStrips => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "F", "rn", "Ls")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str) -> Self {
        Self { symbol, description }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one geometry equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All geometry equations used by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// z = r²/(4F)
    ParabolaHeight,
    /// θ = atan(r/(2F))
    ParabolaTilt,
    /// Closed-form arc length from the vertex
    ParabolaArclength,
    /// Numeric inverse of the arc length
    RadiusForArclength,

    /// a = s - 2t - p
    SleeveClearance,
    /// rs and e from a known sleeve length
    SleeveFromLength,
    /// rs and Ls from a known spacer
    SleeveFromSpacer,

    /// vo = b + t + e + z(rs)
    VertexOffset,
    /// zt and zb below the hub top
    SparOffsets,
    /// rv, Lv and av
    SupportSpar,
    /// Arc length from nail to rim
    FullSpar,
    /// Straight line from inner hub edge to the spar top
    StraightLineFromHub,

    /// Cross-piece centre radius
    CrossRadius,
    /// Cross-piece chord
    CrossLength,
    /// Cross-piece mark and intermediate reference
    CrossPieceMark,

    /// Arc positions of the panel seams
    SeamPositions,
    /// Strip chord across a seam
    StripLength,
}

/// Every registered equation, in document order.
pub const ALL_EQUATIONS: &[Equation] = &[
    Equation::ParabolaHeight,
    Equation::ParabolaTilt,
    Equation::ParabolaArclength,
    Equation::RadiusForArclength,
    Equation::SleeveClearance,
    Equation::SleeveFromLength,
    Equation::SleeveFromSpacer,
    Equation::VertexOffset,
    Equation::SparOffsets,
    Equation::SupportSpar,
    Equation::FullSpar,
    Equation::StraightLineFromHub,
    Equation::CrossRadius,
    Equation::CrossLength,
    Equation::CrossPieceMark,
    Equation::SeamPositions,
    Equation::StripLength,
];

impl Equation {
    /// Full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::ParabolaHeight => EquationMetadata {
                name: "Surface Height",
                description: "Height of the paraboloid above the vertex at radius r",
                formula_plain: "z(r) = r^2 / (4F)",
                variables: vec![
                    Variable::new("r", "Radial distance from the dish axis"),
                    Variable::new("F", "Focal length"),
                ],
                assumptions: vec!["Ideal paraboloid of revolution"],
                category: EquationCategory::Parabola,
                source_module: "equations/parabola.rs",
                source_function: "parabola_height",
            },
            Equation::ParabolaTilt => EquationMetadata {
                name: "Surface Tilt",
                description: "Angle of the surface tangent from horizontal at radius r",
                formula_plain: "theta(r) = atan(r / (2F))",
                variables: vec![
                    Variable::new("r", "Radial distance from the dish axis"),
                    Variable::new("F", "Focal length"),
                ],
                assumptions: vec![],
                category: EquationCategory::Parabola,
                source_module: "equations/parabola.rs",
                source_function: "parabola_tilt",
            },
            Equation::ParabolaArclength => EquationMetadata {
                name: "Arc Length",
                description: "Distance along the surface from the vertex out to radius r",
                formula_plain: "s(r) = (r*q/t + t*ln((r + q)/t)) / 2, t = 2F, q = sqrt(t^2 + r^2)",
                variables: vec![
                    Variable::new("r", "Radial distance from the dish axis"),
                    Variable::new("F", "Focal length"),
                    Variable::new("s", "Arc length from the vertex"),
                ],
                assumptions: vec!["s(0) = 0", "Strictly increasing for r >= 0"],
                category: EquationCategory::Parabola,
                source_module: "equations/parabola.rs",
                source_function: "parabola_arclength",
            },
            Equation::RadiusForArclength => EquationMetadata {
                name: "Radius for Arc Length",
                description: "Radius at which the arc length reaches s, searched inside [s/2, 2s]",
                formula_plain: "r(s) = first r_i = s/2 + i*step with s(r_i) > s, step = 1.5s/10000",
                variables: vec![
                    Variable::new("s", "Target arc length"),
                    Variable::new("step", "Scan step (or bisection tolerance)"),
                ],
                assumptions: vec![
                    "Bracket valid while s < 16F",
                    "Returns the overshoot sample, not an interpolated root",
                ],
                category: EquationCategory::Parabola,
                source_module: "equations/parabola.rs",
                source_function: "radius_for_arclength",
            },
            Equation::SleeveClearance => EquationMetadata {
                name: "Sleeve Clearance",
                description: "Radial room inside the sleeve once wall and spar are subtracted",
                formula_plain: "a = s - 2t - p",
                variables: vec![
                    Variable::new("s", "Outer diameter of sleeve"),
                    Variable::new("t", "Sleeve wall thickness"),
                    Variable::new("p", "Spar pipe outer diameter"),
                ],
                assumptions: vec![],
                category: EquationCategory::Sleeve,
                source_module: "calculations/sleeve.rs",
                source_function: "sleeve_clearance",
            },
            Equation::SleeveFromLength => EquationMetadata {
                name: "Spacer from Sleeve Length",
                description: "Sleeve radius and spacer size when the sleeve length is fixed",
                formula_plain: "rs = rn - d + Ls, e = a - rs(rs - rn)/(2F)",
                variables: vec![
                    Variable::new("rn", "Distance from center to nail"),
                    Variable::new("d", "Distance from nail to inner edge of sleeve"),
                    Variable::new("Ls", "Sleeve length"),
                    Variable::new("e", "Sleeve spacer size"),
                ],
                assumptions: vec!["e must come out non-negative"],
                category: EquationCategory::Sleeve,
                source_module: "calculations/sleeve.rs",
                source_function: "solve_sleeve",
            },
            Equation::SleeveFromSpacer => EquationMetadata {
                name: "Sleeve Length from Spacer",
                description: "Positive root of rs^2 - rn*rs - 2aF = 0 when the spacer is fixed",
                formula_plain: "rs = (rn + sqrt(rn^2 + 8aF)) / 2, Ls = rs - rn + d",
                variables: vec![
                    Variable::new("rn", "Distance from center to nail"),
                    Variable::new("a", "Sleeve clearance"),
                    Variable::new("F", "Focal length"),
                ],
                assumptions: vec!["Discriminant rn^2 + 8aF must be non-negative"],
                category: EquationCategory::Sleeve,
                source_module: "calculations/sleeve.rs",
                source_function: "solve_sleeve",
            },
            Equation::VertexOffset => EquationMetadata {
                name: "Vertex Offset",
                description: "Distance from hub top to the paraboloid at the sleeve radius",
                formula_plain: "vo = b + t + e + z(rs)",
                variables: vec![
                    Variable::new("b", "Distance from hub top to sleeve top"),
                    Variable::new("t", "Sleeve wall thickness"),
                    Variable::new("e", "Sleeve spacer size"),
                    Variable::new("rs", "Sleeve outer radius"),
                ],
                assumptions: vec![],
                category: EquationCategory::SupportSpar,
                source_module: "calculations/support.rs",
                source_function: "vertex_offset",
            },
            Equation::SparOffsets => EquationMetadata {
                name: "Spar Top and Bottom Offsets",
                description: "Height of the spar top and bottom relative to the hub top",
                formula_plain: "zt(r) = z(r) - vo, zb(r) = zt(r) - p/cos(theta(r))",
                variables: vec![
                    Variable::new("vo", "Vertex offset"),
                    Variable::new("p", "Spar pipe outer diameter"),
                ],
                assumptions: vec!["Spar diameter measured along the tilted axis"],
                category: EquationCategory::SupportSpar,
                source_module: "calculations/support.rs",
                source_function: "SparOffsets::bottom",
            },
            Equation::SupportSpar => EquationMetadata {
                name: "Vertical Support Spar",
                description: "Radius, length and angle of the vertical support spar",
                formula_plain: "rv = rh + Lh + q + p, Lv = zb(rv) + b + s + g - q, av = theta(rv)",
                variables: vec![
                    Variable::new("rh", "Inner edge of horizontal support spar"),
                    Variable::new("Lh", "Horizontal support spar length"),
                    Variable::new("q", "90 degree coupler offset"),
                    Variable::new("g", "Sleeve bottom to horizontal spar top"),
                ],
                assumptions: vec![],
                category: EquationCategory::SupportSpar,
                source_module: "calculations/support.rs",
                source_function: "support_spar",
            },
            Equation::FullSpar => EquationMetadata {
                name: "Full Spar Length",
                description: "Arc length along the surface from the nail to the rim",
                formula_plain: "fullSpar = s(D/2) - s(rn)",
                variables: vec![
                    Variable::new("D", "Dish diameter"),
                    Variable::new("rn", "Distance from center to nail"),
                ],
                assumptions: vec![],
                category: EquationCategory::SupportSpar,
                source_module: "calculations/support.rs",
                source_function: "full_spar",
            },
            Equation::StraightLineFromHub => EquationMetadata {
                name: "Straight Line from Hub",
                description: "Chord from the inner hub edge to the spar top at radius r",
                formula_plain: "L(r) = sqrt((r - ri)^2 + zt(r)^2)",
                variables: vec![
                    Variable::new("ri", "Inner hub radius"),
                    Variable::new("zt", "Spar top offset below the hub top"),
                ],
                assumptions: vec![],
                category: EquationCategory::SupportSpar,
                source_module: "calculations/support.rs",
                source_function: "SparOffsets::straight_line_from",
            },
            Equation::CrossRadius => EquationMetadata {
                name: "Cross-Piece Radius",
                description: "Spar radius at the centre of the cross-brace on the outer edge of panel A",
                formula_plain: "crossRadius = r(s(ro) + (A - overlap/2 + p/2)/cos(15))",
                variables: vec![
                    Variable::new("ro", "Outer hub radius"),
                    Variable::new("A", "Length of panel A"),
                    Variable::new("overlap", "Panel overlap"),
                ],
                assumptions: vec!["Adjacent spars 15 degrees apart"],
                category: EquationCategory::CrossPiece,
                source_module: "calculations/cross.rs",
                source_function: "cross_piece",
            },
            Equation::CrossLength => EquationMetadata {
                name: "Cross-Piece Length",
                description: "Chord of the cross-brace between adjacent spars",
                formula_plain: "crossLength = 2*crossRadius*sin(15) - p/cos(15)",
                variables: vec![
                    Variable::new("crossRadius", "Cross-piece radius"),
                    Variable::new("p", "Spar pipe outer diameter"),
                ],
                assumptions: vec![],
                category: EquationCategory::CrossPiece,
                source_module: "calculations/cross.rs",
                source_function: "cross_piece",
            },
            Equation::CrossPieceMark => EquationMetadata {
                name: "Cross-Piece Mark",
                description: "Arc distance from the nail to the cross-piece mark, and the intermediate reference",
                formula_plain: "mark = s(crossRadius) - (p/2)tan(15) - s(rn), sInter = s(crossRadius*cos(15)) + offset",
                variables: vec![
                    Variable::new("rn", "Distance from center to nail"),
                    Variable::new("offset", "Intermediate spar offset"),
                ],
                assumptions: vec![],
                category: EquationCategory::CrossPiece,
                source_module: "calculations/cross.rs",
                source_function: "spar_marks",
            },
            Equation::SeamPositions => EquationMetadata {
                name: "Seam Arc Positions",
                description: "Arc positions of successive panel seams, A to E",
                formula_plain: "sAB = s(ro) + (A - overlap/2)/cos(15), sXY = sPrev + (X - overlap)/cos(7.5), sE = sDE + E/cos(7.5)",
                variables: vec![
                    Variable::new("A..E", "Panel lengths"),
                    Variable::new("overlap", "Panel overlap"),
                ],
                assumptions: vec!["Cross-brace pitch 15 degrees, seam pitch 7.5 degrees"],
                category: EquationCategory::MetalStrips,
                source_module: "calculations/strips.rs",
                source_function: "seam_positions",
            },
            Equation::StripLength => EquationMetadata {
                name: "Metal Strip Length",
                description: "Chord of the strip across a seam",
                formula_plain: "mXY = 2*r(sXY)*sin(7.5) + p/cos(7.5)",
                variables: vec![
                    Variable::new("sXY", "Seam arc position"),
                    Variable::new("p", "Spar pipe outer diameter"),
                ],
                assumptions: vec![],
                category: EquationCategory::MetalStrips,
                source_module: "calculations/strips.rs",
                source_function: "metal_strips",
            },
        }
    }

    /// Get all equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Parabola, Sleeve, SupportSpar, CrossPiece, MetalStrips];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// Render the equation reference as markdown.
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Spar Geometry Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula used to size the spar, sleeve, cross-piece and metal strips.
All lengths share the unit of the parameter set they are evaluated with.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description |\n");
                output.push_str("|--------|-------------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} |\n", var.symbol, var.description));
                }
                output.push('\n');
            }

            output.push_str(&format!(
                "**Source:** [`{}`](src/{})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 17);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        let sleeve = Equation::SleeveFromSpacer.metadata();
        assert!(sleeve.formula_plain.contains("sqrt(rn^2 + 8aF)"));
    }

    #[test]
    fn test_every_category_populated() {
        for category in Equation::all_categories() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_markdown_generation() {
        let md = generate_equations_markdown();
        assert!(md.starts_with("# Spar Geometry Equations Reference"));
        assert!(md.contains("## Sleeve"));
        assert!(md.contains("### Cross-Piece Length"));
        assert!(md.contains("**Total Equations:** 17"));

        // Categories appear in sort order
        let parabola = md.find("## Parabola").unwrap();
        let strips = md.find("## Metal Strips").unwrap();
        assert!(parabola < strips);
    }
}
