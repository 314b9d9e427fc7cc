//! Entry point: parse CLI and dispatch to command handlers.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sleeper_ffl::{
    cli::{Commands, DataCmd, DraftCmd, LeagueCmd, SleeperCli},
    commands::{
        league_info::{handle_draft_order, handle_league_info},
        recommend::{handle_recommend, RecommendParams},
        refresh_data::{handle_data_refresh, handle_data_status},
    },
};

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sleeper_ffl=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let app = SleeperCli::parse();

    match app.command {
        Commands::Data { cmd } => match cmd {
            DataCmd::Refresh {
                season,
                weeks,
                force,
                verbose,
            } => handle_data_refresh(season, weeks.into_weeks(), force, verbose)
                .await
                .context("data refresh failed")?,
            DataCmd::Status => handle_data_status().context("reading snapshot store")?,
        },

        Commands::League { cmd } => match cmd {
            LeagueCmd::Info { league } => handle_league_info(league.league_id)
                .await
                .context("loading league")?,
        },

        Commands::Draft { cmd } => match cmd {
            DraftCmd::Order { league } => handle_draft_order(league.league_id)
                .await
                .context("loading draft order")?,
            DraftCmd::Recommend(args) => handle_recommend(RecommendParams {
                league_id: args.league.league_id,
                roster_id: args.roster_id,
                season: args.season,
                weeks: args.weeks.into_weeks(),
                scoring: args.scoring,
                min: args.min,
                max: args.max,
                pool: args.pool,
                budget: Duration::from_secs(args.budget_secs),
                all_teams: args.all_teams,
                as_json: args.json,
                verbose: args.verbose,
            })
            .await
            .context("draft recommendation failed")?,
        },
    }

    Ok(())
}
