//! Typed Sleeper API payloads.
//!
//! Responses are deserialized straight into these structs; anything the
//! optimizer needs is validated here so loosely shaped JSON never reaches
//! the storage or optimization layers.

use crate::cli::types::{DraftId, LeagueId, PlayerId, Position, RosterId, Season, Week};
use crate::storage::{PlayerRecord, ProjectionRecord};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};


fn de_empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// One entry of `GET /players/nfl` (a map keyed by player id).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SleeperPlayer {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub team: Option<String>,
    pub active: Option<bool>,
    pub status: Option<String>,
}

impl SleeperPlayer {
    /// Display name; team defenses only carry first/last (e.g. "Denver" "Broncos").
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.full_name.as_ref().filter(|n| !n.trim().is_empty()) {
            return Some(name.clone());
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

/// Convert the players map into snapshot rows.
///
/// Players without a name or without a draftable fantasy position are dropped.
pub fn players_to_records(players: HashMap<String, SleeperPlayer>) -> Vec<PlayerRecord> {
    let mut records: Vec<PlayerRecord> = players
        .into_iter()
        .filter_map(|(id, player)| {
            let position = player.position.as_deref()?.parse::<Position>().ok()?;
            Some(PlayerRecord {
                player_id: PlayerId::new(id),
                full_name: player.display_name()?,
                position,
                team: player.team.clone(),
                active: player.active.unwrap_or(false),
                status: player.status.clone(),
            })
        })
        .collect();
    records.sort_by(|a, b| a.player_id.cmp(&b.player_id));
    records
}

/// Points columns of one player's weekly projection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectionStats {
    pub pts_ppr: Option<f64>,
    pub pts_half_ppr: Option<f64>,
    pub pts_std: Option<f64>,
}

impl ProjectionStats {
    fn is_empty(&self) -> bool {
        self.pts_ppr.is_none() && self.pts_half_ppr.is_none() && self.pts_std.is_none()
    }
}

/// Convert a weekly projections map into snapshot rows, skipping players
/// with no points projection at all.
pub fn projections_to_records(
    season: Season,
    week: Week,
    projections: HashMap<String, ProjectionStats>,
) -> Vec<ProjectionRecord> {
    let mut records: Vec<ProjectionRecord> = projections
        .into_iter()
        .filter(|(_, stats)| !stats.is_empty())
        .map(|(id, stats)| ProjectionRecord {
            player_id: PlayerId::new(id),
            season,
            week,
            pts_ppr: stats.pts_ppr.unwrap_or(0.0),
            pts_half_ppr: stats.pts_half_ppr.unwrap_or(0.0),
            pts_std: stats.pts_std.unwrap_or(0.0),
        })
        .collect();
    records.sort_by(|a, b| a.player_id.cmp(&b.player_id));
    records
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringSettings {
    /// Points per reception
    #[serde(default)]
    pub rec: f64,
}

/// `GET /league/{league_id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    pub name: Option<String>,
    pub season: Option<String>,
    pub draft_id: Option<DraftId>,
    pub total_rosters: u32,
    pub roster_positions: Vec<String>,
    #[serde(default)]
    pub scoring_settings: ScoringSettings,
}

impl League {
    pub fn roster_size(&self) -> usize {
        self.roster_positions.len()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserMetadata {
    pub team_name: Option<String>,
}

/// `GET /league/{league_id}/users`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueUser {
    pub user_id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

impl LeagueUser {
    pub fn team_name(&self) -> Option<&str> {
        self.metadata.as_ref()?.team_name.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    Snake,
    Linear,
    Auction,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftSettings {
    pub teams: u32,
    pub rounds: u32,
}

/// `GET /draft/{draft_id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftMeta {
    pub draft_id: DraftId,
    #[serde(rename = "type")]
    pub draft_type: DraftType,
    pub status: Option<String>,
    pub settings: DraftSettings,
    /// Draft slot ("1".."n") to roster id; null until the order is set
    #[serde(default)]
    pub slot_to_roster_id: Option<BTreeMap<String, RosterId>>,
    /// User id to draft slot
    #[serde(default)]
    pub draft_order: Option<BTreeMap<String, u32>>,
}

/// One element of `GET /draft/{draft_id}/picks`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftPick {
    pub round: u32,
    pub draft_slot: u32,
    pub pick_no: u32,
    pub player_id: PlayerId,
    #[serde(default, deserialize_with = "de_empty_string_as_none")]
    pub picked_by: Option<String>,
    #[serde(default)]
    pub roster_id: Option<RosterId>,
}

impl AsRef<PlayerId> for DraftPick {
    fn as_ref(&self) -> &PlayerId {
        &self.player_id
    }
}
