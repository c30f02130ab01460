//! Plain-text report of a solved dish.

use std::fmt;

use spar_core::calculations::Seam;
use spar_core::ReportView;

/// Cut list in the workshop layout: sleeve, support spar, full spar, cross
/// spar, spar marks, metal strips.
pub struct TextReport<'a>(pub ReportView<'a>);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = &self.0;
        let unit = view.unit();

        if let Some(site) = view.site() {
            writeln!(f, "Site: {} ({})", site.display_name(), site)?;
        }
        writeln!(f, "vo = {}", view.vertex_offset())?;

        writeln!(f, "Sleeve")?;
        writeln!(f, "\tLs = {}", view.sleeve_length())?;
        writeln!(f, "\te  = {}", view.spacer())?;
        writeln!(f, "\trs = {}", view.sleeve_radius())?;
        writeln!(
            f,
            "\t(s,t = {}, {} {})",
            view.sleeve_diameter().formatted_value(),
            view.sleeve_wall().formatted_value(),
            unit
        )?;

        writeln!(f, "Support spar")?;
        writeln!(f, "\tLv = {}", view.support_length())?;
        writeln!(f, "\trv = {}", view.support_radius())?;
        writeln!(f, "\tangle at vertical support = {:.1}", view.support_angle().value())?;
        writeln!(
            f,
            "\t(Lh,rh,q = {}, {}, {} {})",
            view.horizontal_length().formatted_value(),
            view.horizontal_radius().formatted_value(),
            view.coupler_offset().formatted_value(),
            unit
        )?;

        writeln!(f, "fullSpar = {}", view.full_spar())?;
        writeln!(f, "\tp = {}", view.spar_diameter())?;

        writeln!(f, "Cross spar")?;
        writeln!(f, "\tradius for cross piece = {}", view.cross_radius())?;
        writeln!(f, "\tlength of cross piece = {}", view.cross_length())?;

        writeln!(f, "Spar marks:")?;
        for row in view.spar_marks() {
            writeln!(
                f,
                "\t{:<18} ({:<5}): {}",
                row.name,
                row.category.word(),
                row.distance
            )?;
        }

        writeln!(f, "Metal strip lengths:")?;
        for seam in Seam::ALL {
            writeln!(f, "\t{}: = {}", seam.name(), view.strip_length(seam))?;
        }
        write!(f, "Panel E ends at r={}", view.panel_e_end_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spar_core::params::{ParameterSource, SiteId};
    use spar_core::{resolve, solve};

    #[test]
    fn test_sa_report_layout() {
        let params = resolve(ParameterSource::Site(SiteId::Sa)).unwrap();
        let geometry = solve(&params).unwrap();
        let text = TextReport(ReportView::new(&params, &geometry)).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Site: South Africa (sa)");
        assert_eq!(lines[1], "vo = 79 mm");
        assert_eq!(lines[2], "Sleeve");
        assert_eq!(lines[3], "\tLs = 332 mm");
        assert_eq!(lines[5], "\trs = 546 mm");
        assert_eq!(lines[6], "\t(s,t = 90, 4 mm)");
        assert_eq!(lines[8], "\tLv = 536 mm");
        assert_eq!(lines[10], "\tangle at vertical support = 18.4");
        assert!(text.contains("\tCross-Piece        (Spar ): 1875 mm"));
        assert!(text.contains("\tBC: = 1136 mm"));
        assert_eq!(*lines.last().unwrap(), "Panel E ends at r=7068 mm");
    }

    #[test]
    fn test_guide_marks_listed_last() {
        let params = resolve(ParameterSource::Site(SiteId::Uk)).unwrap();
        let geometry = solve(&params).unwrap();
        let text = TextReport(ReportView::new(&params, &geometry)).to_string();

        let guide = text.find("Intermediate-Spar  (Guide)").unwrap();
        let metal = text.find("DE-long").unwrap();
        assert!(metal < guide);
    }
}
