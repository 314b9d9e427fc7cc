//! League and draft order commands

use std::collections::BTreeMap;

use crate::{
    cli::types::{LeagueId, RosterId, ScoringFormat},
    error::SleeperError,
    sleeper::{
        http::{get_draft, get_draft_picks, get_league, get_league_users},
        types::{DraftMeta, League, LeagueUser},
        Draft,
    },
    Result,
};

use super::resolve_league_id;

/// Display label for every team in the draft: the owner's team name when
/// set, else their display name, else `Team <roster id>`.
pub fn team_labels(meta: &DraftMeta, users: &[LeagueUser]) -> BTreeMap<RosterId, String> {
    let mut labels = BTreeMap::new();
    let (Some(slots), Some(draft_order)) = (&meta.slot_to_roster_id, &meta.draft_order) else {
        return labels;
    };

    for user in users {
        let Some(slot) = draft_order.get(&user.user_id) else {
            continue;
        };
        let Some(&roster_id) = slots.get(&slot.to_string()) else {
            continue;
        };
        let label = user
            .team_name()
            .or(user.display_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Team {}", roster_id));
        labels.insert(roster_id, label);
    }
    labels
}

pub fn label_for(labels: &BTreeMap<RosterId, String>, roster_id: RosterId) -> String {
    labels
        .get(&roster_id)
        .cloned()
        .unwrap_or_else(|| format!("Team {}", roster_id))
}

/// League, its draft metadata and the picks made so far.
pub(crate) async fn load_draft(league_id: &LeagueId) -> Result<(League, DraftMeta, Draft)> {
    let league = get_league(league_id).await?;
    let draft_id = league.draft_id.clone().ok_or(SleeperError::NoData)?;
    let (meta, picks) = tokio::try_join!(get_draft(&draft_id), get_draft_picks(&draft_id))?;
    let draft = Draft::from_meta(&meta, picks);
    Ok((league, meta, draft))
}

/// Handle `league info`
pub async fn handle_league_info(league_id: Option<LeagueId>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let (league, users) = tokio::try_join!(get_league(&league_id), get_league_users(&league_id))?;

    println!(
        "{} ({})",
        league.name.as_deref().unwrap_or("Unnamed league"),
        league.league_id
    );
    if let Some(season) = &league.season {
        println!("Season:   {}", season);
    }
    println!("Teams:    {}", league.total_rosters);
    println!(
        "Scoring:  {}",
        ScoringFormat::from_reception_points(league.scoring_settings.rec)
    );
    println!(
        "Roster:   {} ({} slots)",
        league.roster_positions.join(", "),
        league.roster_size()
    );
    if let Some(draft_id) = &league.draft_id {
        println!("Draft:    {}", draft_id);
    }

    println!("\nManagers:");
    for user in &users {
        match user.team_name() {
            Some(team) => println!(
                "  {} ({})",
                team,
                user.display_name.as_deref().unwrap_or(&user.user_id)
            ),
            None => println!("  {}", user.display_name.as_deref().unwrap_or(&user.user_id)),
        }
    }
    Ok(())
}

/// Handle `draft order`
pub async fn handle_draft_order(league_id: Option<LeagueId>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let (_, meta, draft) = load_draft(&league_id).await?;
    let users = get_league_users(&league_id).await?;
    let labels = team_labels(&meta, &users);

    println!(
        "Draft {} ({:?}, {} teams x {} rounds), {} of {} picks made",
        draft.draft_id,
        draft.draft_type,
        draft.teams,
        draft.rounds,
        draft.picks.len(),
        draft.order.len()
    );
    if draft.is_complete() {
        println!("✓ Draft complete");
    }

    let per_round = draft.teams.max(1) as usize;
    for (round, teams) in draft.order.chunks(per_round).enumerate() {
        println!("\nRound {}:", round + 1);
        for (slot, &roster_id) in teams.iter().enumerate() {
            let overall = round * per_round + slot;
            let marker = if overall == draft.picks.len() {
                "  <- on the clock"
            } else {
                ""
            };
            let player = draft
                .picks
                .get(overall)
                .map(|p| format!(" {}", p.player_id))
                .unwrap_or_default();
            println!(
                "  {:>3}. {}{}{}",
                overall + 1,
                label_for(&labels, roster_id),
                player,
                marker
            );
        }
    }
    Ok(())
}
