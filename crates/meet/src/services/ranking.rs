use crate::dto::standings::{RankingCriterion, StandingEntry};
use crate::models::Competitor;

/// Orders `group` best first by `criterion`.
///
/// Selection sort: each pass picks the largest remaining element, and a later
/// element only takes over when strictly greater, so equal scores keep the
/// order they were entered in.
pub fn rank(group: &mut [&Competitor], criterion: RankingCriterion) {
    let len = group.len();
    for i in 0..len.saturating_sub(1) {
        let mut best = i;
        for j in (i + 1)..len {
            if criterion.score(group[j]) > criterion.score(group[best]) {
                best = j;
            }
        }
        if best > i {
            group.swap(i, best);
        }
    }
}

/// Ranks a private list of references, leaving the roster's order alone.
pub fn standings(group: &[Competitor], criterion: RankingCriterion) -> Vec<&Competitor> {
    let mut ranked: Vec<&Competitor> = group.iter().collect();
    rank(&mut ranked, criterion);
    ranked
}

pub fn standing_entries(group: &[Competitor], criterion: RankingCriterion) -> Vec<StandingEntry> {
    standings(group, criterion)
        .into_iter()
        .enumerate()
        .map(|(idx, competitor)| StandingEntry::new(idx + 1, competitor))
        .collect()
}
