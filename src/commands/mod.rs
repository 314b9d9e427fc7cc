//! Command implementations for the Sleeper draft CLI

pub mod league_info;
pub mod recommend;
pub mod refresh_data;

#[cfg(test)]
mod tests;

use crate::{cli::types::LeagueId, error::SleeperError, Result, LEAGUE_ID_ENV_VAR};

/// Use the given league id, falling back to `SLEEPER_LEAGUE_ID`.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    league_id
        .or_else(|| {
            std::env::var(LEAGUE_ID_ENV_VAR)
                .ok()
                .and_then(|s| s.parse::<LeagueId>().ok())
        })
        .ok_or_else(|| SleeperError::MissingLeagueId {
            env_var: LEAGUE_ID_ENV_VAR.to_string(),
        })
}
