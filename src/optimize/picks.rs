//! Mapping draft picks onto scoring table rows.

use std::collections::{BTreeMap, BTreeSet};

use super::table::ScoringTable;
use crate::cli::types::{PlayerId, RosterId};

/// Translate each team's picks into table row indices.
///
/// Players missing from the table are skipped and repeated picks collapse.
/// A team with no picks still gets an (empty) entry.
pub fn roster_to_team_picks_idx_map<P: AsRef<PlayerId>>(
    table: &ScoringTable,
    rosters: &BTreeMap<RosterId, Vec<P>>,
) -> BTreeMap<RosterId, BTreeSet<usize>> {
    rosters
        .iter()
        .map(|(&roster_id, picks)| {
            let indices = picks
                .iter()
                .filter_map(|pick| table.index_of(pick.as_ref()))
                .collect();
            (roster_id, indices)
        })
        .collect()
}

/// Every drafted row across the league.
pub fn all_picks_idx(team_picks: &BTreeMap<RosterId, BTreeSet<usize>>) -> BTreeSet<usize> {
    team_picks.values().flatten().copied().collect()
}
