//! Snapshot refresh and status commands.
//!
//! Players and weekly projections are fetched from Sleeper and written to
//! the local snapshot store, which `draft recommend` reads from.

use futures_util::future::try_join_all;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::{
    cli::types::{Season, Week},
    core::{with_retries, RetryPolicy},
    error::SleeperError,
    sleeper::{
        http::{get_players_with_base_url, get_weekly_projections_with_base_url, SLEEPER_BASE_URL},
        types::{players_to_records, projections_to_records},
    },
    storage::{PlayerRecord, ProjectionRecord, Snapshot, SnapshotStore},
    Result,
};

/// Rows written per snapshot; `None` when the snapshot was kept as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub players: Option<usize>,
    pub projections: Option<usize>,
}

/// Refresh the `players` and `weekly_projections` snapshots.
///
/// Unless `force` is set, an existing players snapshot is kept, and so are
/// projections that already cover every requested week of `season`. Each
/// fetch is retried per [`RetryPolicy::default`]; the weekly fetches run
/// concurrently and nothing is written unless all of them succeed.
pub async fn refresh_snapshots(
    store: &mut SnapshotStore,
    season: Season,
    weeks: &[Week],
    force: bool,
) -> Result<RefreshSummary> {
    refresh_snapshots_with_base_url(
        SLEEPER_BASE_URL,
        RetryPolicy::default(),
        store,
        season,
        weeks,
        force,
    )
    .await
}

pub(crate) async fn refresh_snapshots_with_base_url(
    base_url: &str,
    policy: RetryPolicy,
    store: &mut SnapshotStore,
    season: Season,
    weeks: &[Week],
    force: bool,
) -> Result<RefreshSummary> {
    let mut summary = RefreshSummary::default();

    if force || !store.exists(PlayerRecord::NAME)? {
        let players =
            with_retries("players", policy, || get_players_with_base_url(base_url)).await?;
        if players.is_empty() {
            return Err(SleeperError::NoData);
        }
        let records = players_to_records(players);
        summary.players = Some(store.write(&records)?);
    } else {
        info!(snapshot = PlayerRecord::NAME, "snapshot exists, skipping");
    }

    let stored = store.projected_weeks(season)?;
    let covered = weeks.iter().all(|week| stored.contains(week));
    if force || !covered {
        let fetches = weeks.iter().map(|&week| async move {
            let label = format!("projections week {}", week);
            let stats = with_retries(&label, policy, || {
                get_weekly_projections_with_base_url(base_url, season, week)
            })
            .await?;
            Ok::<_, SleeperError>(projections_to_records(season, week, stats))
        });
        let records: Vec<ProjectionRecord> =
            try_join_all(fetches).await?.into_iter().flatten().collect();
        summary.projections = Some(store.write(&records)?);
    } else {
        info!(
            snapshot = ProjectionRecord::NAME,
            %season,
            weeks = weeks.len(),
            "snapshot covers requested weeks, skipping"
        );
    }

    Ok(summary)
}

/// Handle `data refresh`
pub async fn handle_data_refresh(
    season: Season,
    weeks: Vec<Week>,
    force: bool,
    verbose: bool,
) -> Result<()> {
    let mut store = SnapshotStore::new()?;

    if verbose {
        println!(
            "Refreshing Sleeper data for season {} ({} weeks)...",
            season,
            weeks.len()
        );
    }

    let summary = refresh_snapshots(&mut store, season, &weeks, force).await?;

    for (name, written) in [
        (PlayerRecord::NAME, summary.players),
        (ProjectionRecord::NAME, summary.projections),
    ] {
        match written {
            Some(rows) => println!("✓ {} refreshed ({} rows)", name, rows),
            None => println!("✓ {} already up to date (use --force to refetch)", name),
        }
    }
    Ok(())
}

/// Handle `data status`
pub fn handle_data_status() -> Result<()> {
    let store = SnapshotStore::new()?;
    let catalog = store.catalog()?;

    if catalog.is_empty() {
        println!("No snapshots yet. Run `sleeper-ffl data refresh` first.");
        return Ok(());
    }

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    for info in catalog {
        println!(
            "{:<20} {:>8} rows   written {}",
            info.name,
            info.row_count,
            format_age(now.saturating_sub(info.written_at))
        );
    }
    Ok(())
}

fn format_age(secs: u64) -> String {
    match secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", secs / 60),
        3_600..=86_399 => format!("{}h ago", secs / 3_600),
        _ => format!("{}d ago", secs / 86_400),
    }
}
