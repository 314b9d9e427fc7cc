//! Draft order and pick bookkeeping.
//!
//! A [`Draft`] is an immutable snapshot of a draft's state: the full pick
//! order plus the picks made so far. Fetch a new one whenever the draft
//! moves on.

use std::collections::BTreeMap;

use crate::cli::types::{DraftId, RosterId};

use super::types::{DraftMeta, DraftPick, DraftType};

/// Full pick order for a snake draft.
///
/// Rounds alternate direction: 0-indexed even rounds follow `round_order`,
/// odd rounds reverse it.
///
/// ```rust
/// use sleeper_ffl::{sleeper::draft::snake_order, RosterId};
///
/// let order = snake_order(&[RosterId(1), RosterId(2)], 2);
/// assert_eq!(order, vec![RosterId(1), RosterId(2), RosterId(2), RosterId(1)]);
/// ```
pub fn snake_order(round_order: &[RosterId], rounds: u32) -> Vec<RosterId> {
    let mut order = Vec::with_capacity(round_order.len() * rounds as usize);
    for round in 0..rounds {
        if round % 2 == 0 {
            order.extend(round_order.iter().copied());
        } else {
            order.extend(round_order.iter().rev().copied());
        }
    }
    order
}

/// Full pick order when every round runs in the same direction.
pub fn linear_order(round_order: &[RosterId], rounds: u32) -> Vec<RosterId> {
    let mut order = Vec::with_capacity(round_order.len() * rounds as usize);
    for _ in 0..rounds {
        order.extend(round_order.iter().copied());
    }
    order
}

#[derive(Debug, Clone)]
pub struct Draft {
    pub draft_id: DraftId,
    pub draft_type: DraftType,
    pub teams: u32,
    pub rounds: u32,
    /// Team order within the first round
    pub round_order: Vec<RosterId>,
    /// Team on the clock for every pick of the draft
    pub order: Vec<RosterId>,
    /// Picks made so far, sorted by overall pick number
    pub picks: Vec<DraftPick>,
}

impl Draft {
    /// Build a draft snapshot from its metadata and the picks made so far.
    ///
    /// Slots missing from `slot_to_roster_id` fall back to roster id == slot.
    pub fn from_meta(meta: &DraftMeta, mut picks: Vec<DraftPick>) -> Self {
        let teams = meta.settings.teams;
        let round_order: Vec<RosterId> = (1..=teams)
            .map(|slot| {
                meta.slot_to_roster_id
                    .as_ref()
                    .and_then(|slots| slots.get(&slot.to_string()).copied())
                    .unwrap_or(RosterId(slot))
            })
            .collect();

        let order = match meta.draft_type {
            DraftType::Linear => linear_order(&round_order, meta.settings.rounds),
            _ => snake_order(&round_order, meta.settings.rounds),
        };

        picks.sort_by_key(|p| p.pick_no);

        Self {
            draft_id: meta.draft_id.clone(),
            draft_type: meta.draft_type,
            teams,
            rounds: meta.settings.rounds,
            round_order,
            order,
            picks,
        }
    }

    /// Team on the clock, or `None` once every pick has been made.
    pub fn next_pick(&self) -> Option<RosterId> {
        self.order.get(self.picks.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.picks.len() >= self.order.len()
    }

    /// Picks grouped by team, in pick order.
    ///
    /// Every team appears, with an empty list if it has not picked yet. A
    /// pick is credited to its own `roster_id` when Sleeper reports one,
    /// otherwise to the team whose turn it was.
    pub fn rosters(&self) -> BTreeMap<RosterId, Vec<DraftPick>> {
        let mut rosters: BTreeMap<RosterId, Vec<DraftPick>> = self
            .round_order
            .iter()
            .map(|&team| (team, Vec::new()))
            .collect();

        for (i, pick) in self.picks.iter().enumerate() {
            let Some(team) = pick.roster_id.or_else(|| self.order.get(i).copied()) else {
                break;
            };
            rosters.entry(team).or_default().push(pick.clone());
        }
        rosters
    }
}
