//! HTTP client for the public Sleeper API.
//!
//! Every fetch has a `_with_base_url` twin so tests can point it at a mock
//! server.

use crate::{
    cli::types::{DraftId, LeagueId, Season, Week},
    Result,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use super::types::{DraftMeta, DraftPick, League, LeagueUser, ProjectionStats, SleeperPlayer};


/// Base path for the Sleeper v1 API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("sleeper-ffl/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    debug!(url, "GET");
    let value = CLIENT
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?;
    Ok(value)
}

/// All NFL players keyed by player id.
pub async fn get_players() -> Result<HashMap<String, SleeperPlayer>> {
    get_players_with_base_url(SLEEPER_BASE_URL).await
}

pub(crate) async fn get_players_with_base_url(
    base_url: &str,
) -> Result<HashMap<String, SleeperPlayer>> {
    get_json(&format!("{}/players/nfl", base_url)).await
}

/// Regular-season projections for one week, keyed by player id.
pub async fn get_weekly_projections(
    season: Season,
    week: Week,
) -> Result<HashMap<String, ProjectionStats>> {
    get_weekly_projections_with_base_url(SLEEPER_BASE_URL, season, week).await
}

pub(crate) async fn get_weekly_projections_with_base_url(
    base_url: &str,
    season: Season,
    week: Week,
) -> Result<HashMap<String, ProjectionStats>> {
    let url = format!(
        "{}/projections/nfl/regular/{}/{}",
        base_url,
        season.as_u16(),
        week.as_u16()
    );
    get_json(&url).await
}

pub async fn get_league(league_id: &LeagueId) -> Result<League> {
    get_league_with_base_url(SLEEPER_BASE_URL, league_id).await
}

pub(crate) async fn get_league_with_base_url(base_url: &str, league_id: &LeagueId) -> Result<League> {
    get_json(&format!("{}/league/{}", base_url, league_id)).await
}

pub async fn get_league_users(league_id: &LeagueId) -> Result<Vec<LeagueUser>> {
    get_league_users_with_base_url(SLEEPER_BASE_URL, league_id).await
}

pub(crate) async fn get_league_users_with_base_url(
    base_url: &str,
    league_id: &LeagueId,
) -> Result<Vec<LeagueUser>> {
    get_json(&format!("{}/league/{}/users", base_url, league_id)).await
}

pub async fn get_draft(draft_id: &DraftId) -> Result<DraftMeta> {
    get_draft_with_base_url(SLEEPER_BASE_URL, draft_id).await
}

pub(crate) async fn get_draft_with_base_url(base_url: &str, draft_id: &DraftId) -> Result<DraftMeta> {
    get_json(&format!("{}/draft/{}", base_url, draft_id)).await
}

/// Picks made so far, in whatever order Sleeper returns them.
pub async fn get_draft_picks(draft_id: &DraftId) -> Result<Vec<DraftPick>> {
    get_draft_picks_with_base_url(SLEEPER_BASE_URL, draft_id).await
}

pub(crate) async fn get_draft_picks_with_base_url(
    base_url: &str,
    draft_id: &DraftId,
) -> Result<Vec<DraftPick>> {
    get_json(&format!("{}/draft/{}/picks", base_url, draft_id)).await
}
