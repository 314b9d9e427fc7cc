//! Roster composition rules derived from league settings.

use std::collections::BTreeMap;
use tracing::warn;

use crate::cli::types::{Position, PositionBound, RosterSlot};

/// Target roster size plus per-position `[min, max]` counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRules {
    pub roster_size: usize,
    pub min_pos: BTreeMap<Position, usize>,
    pub max_pos: BTreeMap<Position, usize>,
}

impl RosterRules {
    /// Derive rules from Sleeper's `roster_positions` list.
    ///
    /// Every recognised slot counts toward the roster size. A position's
    /// minimum is its dedicated starter slots; its maximum adds every flex and
    /// bench slot it is eligible for. Slots no offensive position can fill
    /// (IDP `DL`, `LB`, ...) are dropped with a warning.
    ///
    /// ```rust
    /// use sleeper_ffl::{optimize::RosterRules, Position};
    ///
    /// let slots: Vec<String> = ["QB", "RB", "FLEX", "BN"].iter().map(|s| s.to_string()).collect();
    /// let rules = RosterRules::from_roster_positions(&slots);
    /// assert_eq!(rules.roster_size, 4);
    /// assert_eq!(rules.min_pos[&Position::RB], 1);
    /// assert_eq!(rules.max_pos[&Position::RB], 3);
    /// ```
    pub fn from_roster_positions(roster_positions: &[String]) -> Self {
        let mut min_pos: BTreeMap<Position, usize> =
            Position::ALL.iter().map(|&p| (p, 0)).collect();
        let mut max_pos = min_pos.clone();

        let mut roster_size = 0;
        let mut dropped = Vec::new();
        for raw in roster_positions {
            let slot = match raw.parse::<RosterSlot>() {
                Ok(RosterSlot::Other(_)) | Err(_) => {
                    dropped.push(raw.as_str());
                    continue;
                }
                Ok(slot) => slot,
            };
            roster_size += 1;
            if let RosterSlot::Starter(pos) = slot {
                *min_pos.entry(pos).or_insert(0) += 1;
            }
            for pos in slot.eligible_positions() {
                *max_pos.entry(*pos).or_insert(0) += 1;
            }
        }

        if !dropped.is_empty() {
            warn!(slots = ?dropped, "ignoring roster slots no supported position can fill");
        }

        Self {
            roster_size,
            min_pos,
            max_pos,
        }
    }

    /// Replace individual bounds, e.g. from `--min QB=1 --max K=1`.
    pub fn with_overrides(mut self, mins: &[PositionBound], maxs: &[PositionBound]) -> Self {
        for bound in mins {
            self.min_pos.insert(bound.position, bound.count);
            self.max_pos.entry(bound.position).or_insert(bound.count);
        }
        for bound in maxs {
            self.max_pos.insert(bound.position, bound.count);
            self.min_pos.entry(bound.position).or_insert(0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_league_rules() {
        let rules = RosterRules::from_roster_positions(&slots(&[
            "QB", "RB", "RB", "WR", "WR", "TE", "FLEX", "K", "DEF", "BN", "BN", "BN", "BN", "BN",
            "BN",
        ]));

        assert_eq!(rules.roster_size, 15);
        assert_eq!(rules.min_pos[&Position::QB], 1);
        assert_eq!(rules.min_pos[&Position::RB], 2);
        assert_eq!(rules.min_pos[&Position::K], 1);
        assert_eq!(rules.max_pos[&Position::QB], 7);
        assert_eq!(rules.max_pos[&Position::RB], 9);
        assert_eq!(rules.max_pos[&Position::TE], 8);
        assert_eq!(rules.max_pos[&Position::DEF], 7);
    }

    #[test]
    fn test_superflex_and_idp_slots() {
        let rules =
            RosterRules::from_roster_positions(&slots(&["QB", "SUPER_FLEX", "DL", "LB", "BN"]));

        // the IDP slots are not counted
        assert_eq!(rules.roster_size, 3);
        assert_eq!(rules.min_pos[&Position::QB], 1);
        assert_eq!(rules.max_pos[&Position::QB], 3);
        assert_eq!(rules.max_pos[&Position::K], 1);
        assert_eq!(rules.min_pos[&Position::DEF], 0);
    }

    #[test]
    fn test_every_position_has_both_bounds() {
        let rules = RosterRules::from_roster_positions(&slots(&["QB"]));
        for pos in Position::ALL {
            assert!(rules.min_pos.contains_key(&pos));
            assert!(rules.max_pos.contains_key(&pos));
        }
    }

    #[test]
    fn test_overrides() {
        let rules = RosterRules::from_roster_positions(&slots(&["QB", "K", "BN", "BN"]))
            .with_overrides(
                &["QB=2".parse().unwrap()],
                &["K=1".parse().unwrap(), "DEF=0".parse().unwrap()],
            );

        assert_eq!(rules.min_pos[&Position::QB], 2);
        assert_eq!(rules.max_pos[&Position::K], 1);
        assert_eq!(rules.max_pos[&Position::DEF], 0);
        assert_eq!(rules.max_pos[&Position::QB], 3);
    }
}
