use super::ranking::standings;
use crate::dto::standings::RankingCriterion;
use crate::models::{Division, WeightClass};
use crate::repository::Roster;

pub const NO_COMPETITORS: &str = "No competitors present.";
pub const DIVISION_SEPARATOR: &str = "--------------------------------------------------------";

/// Renders the end-of-meet results over every division and weight class of
/// the fixed enumerations.
pub fn render_full_meet_report(roster: &Roster) -> String {
    render_meet_report(roster, &Division::ALL, &WeightClass::ALL)
}

/// One section per division, each holding one subsection per weight class in
/// the order given. Groups are ranked by total; empty or absent groups get a
/// placeholder line.
pub fn render_meet_report(
    roster: &Roster,
    divisions: &[Division],
    weight_classes: &[WeightClass],
) -> String {
    let mut report = String::new();

    for division in divisions {
        report.push_str(&format!("Division: {}\n", division));

        for weight_class in weight_classes {
            report.push_str(&format!("Class: {}\n\n", weight_class));

            let group = roster.group_for(*weight_class, *division);
            if group.is_empty() {
                report.push_str(&format!("{}\n\n", NO_COMPETITORS));
            } else {
                for (idx, competitor) in standings(group, RankingCriterion::Total)
                    .into_iter()
                    .enumerate()
                {
                    report.push_str(&format!("{} {}\n\n", idx + 1, competitor));
                }
            }
            report.push('\n');
        }

        report.push_str(DIVISION_SEPARATOR);
        report.push('\n');
    }

    report
}
