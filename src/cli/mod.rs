//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{LeagueId, PositionBound, RosterId, ScoringFormat, Season, WeekSpec};

use crate::{
    commands::recommend::{DEFAULT_BUDGET_SECS, DEFAULT_HORIZON_WEEKS, DEFAULT_POOL_PER_POSITION},
    LEAGUE_ID_ENV_VAR,
};

/// League selection shared by every command that talks to a league.
#[derive(Debug, Args)]
pub struct LeagueArgs {
    /// Sleeper league ID (or set `SLEEPER_LEAGUE_ID`).
    #[clap(long, short, env = LEAGUE_ID_ENV_VAR)]
    pub league_id: Option<LeagueId>,
}

#[derive(Debug, Subcommand)]
pub enum DataCmd {
    /// Fetch players and weekly projections into the local snapshot store
    Refresh {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Weeks to fetch: `1-18`, `1-4,6`, ...
        #[clap(long, short, default_value_t = WeekSpec::default())]
        weeks: WeekSpec,

        /// Refetch even if snapshots already exist.
        #[clap(long)]
        force: bool,

        #[clap(long)]
        verbose: bool,
    },

    /// List stored snapshots with row counts and age
    Status,
}

#[derive(Debug, Subcommand)]
pub enum LeagueCmd {
    /// Show league settings, roster slots and managers
    Info {
        #[clap(flatten)]
        league: LeagueArgs,
    },
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    #[clap(flatten)]
    pub league: LeagueArgs,

    /// Team to optimize for; defaults to the team on the clock.
    #[clap(long, short)]
    pub roster_id: Option<RosterId>,

    /// Projection season; defaults to the league's season.
    #[clap(long, short)]
    pub season: Option<Season>,

    /// Weeks whose minimum total is maximized.
    #[clap(long, short, default_value_t = WeekSpec::through(DEFAULT_HORIZON_WEEKS))]
    pub weeks: WeekSpec,

    /// Points column; defaults from the league's points per reception.
    #[clap(long, value_enum)]
    pub scoring: Option<ScoringFormat>,

    /// Override a position minimum, e.g. `--min QB=1` (repeatable).
    #[clap(long = "min", value_name = "POS=N")]
    pub min: Vec<PositionBound>,

    /// Override a position maximum, e.g. `--max K=1` (repeatable).
    #[clap(long = "max", value_name = "POS=N")]
    pub max: Vec<PositionBound>,

    /// Undrafted players kept per position.
    #[clap(long, default_value_t = DEFAULT_POOL_PER_POSITION)]
    pub pool: usize,

    /// Give up on the solve after this many seconds.
    #[clap(long, default_value_t = DEFAULT_BUDGET_SECS)]
    pub budget_secs: u64,

    /// Recommend for every team instead of one.
    #[clap(long)]
    pub all_teams: bool,

    /// Output results as JSON.
    #[clap(long)]
    pub json: bool,

    #[clap(long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum DraftCmd {
    /// Print the full pick order and who is on the clock
    Order {
        #[clap(flatten)]
        league: LeagueArgs,
    },

    /// Recommend the picks that maximize the team's weakest projected week
    Recommend(RecommendArgs),
}

#[derive(Debug, Parser)]
#[clap(
    name = "sleeper-ffl",
    version,
    about = "Sleeper fantasy football draft optimizer"
)]
pub struct SleeperCli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage locally stored Sleeper data
    Data {
        #[clap(subcommand)]
        cmd: DataCmd,
    },
    /// Inspect a league
    League {
        #[clap(subcommand)]
        cmd: LeagueCmd,
    },
    /// Draft order and roster recommendations
    Draft {
        #[clap(subcommand)]
        cmd: DraftCmd,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Position;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        SleeperCli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = SleeperCli::try_parse_from([
            "sleeper-ffl",
            "draft",
            "recommend",
            "--league-id",
            "784512",
            "--weeks",
            "1-4",
            "--scoring",
            "half",
            "--min",
            "QB=1",
            "--max",
            "K=1",
            "--max",
            "DEF=1",
            "--all-teams",
        ])
        .unwrap();

        let Commands::Draft {
            cmd: DraftCmd::Recommend(args),
        } = cli.command
        else {
            panic!("expected draft recommend");
        };
        assert_eq!(args.league.league_id.unwrap().as_str(), "784512");
        assert_eq!(args.weeks.weeks().len(), 4);
        assert_eq!(args.scoring, Some(ScoringFormat::Half));
        assert_eq!(args.min[0].position, Position::QB);
        assert_eq!(args.max.len(), 2);
        assert_eq!(args.pool, DEFAULT_POOL_PER_POSITION);
        assert!(args.all_teams);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_refresh_defaults() {
        let cli = SleeperCli::try_parse_from(["sleeper-ffl", "data", "refresh", "--force"]).unwrap();
        let Commands::Data {
            cmd: DataCmd::Refresh { weeks, force, .. },
        } = cli.command
        else {
            panic!("expected data refresh");
        };
        assert_eq!(weeks, WeekSpec::default());
        assert!(force);
    }

    #[test]
    fn test_parse_recommend_defaults() {
        let cli = SleeperCli::try_parse_from(["sleeper-ffl", "draft", "recommend"]).unwrap();
        let Commands::Draft {
            cmd: DraftCmd::Recommend(args),
        } = cli.command
        else {
            panic!("expected draft recommend");
        };
        assert_eq!(args.weeks, WeekSpec::through(DEFAULT_HORIZON_WEEKS));
        assert_eq!(args.weeks.weeks().len(), 4);
        assert_eq!(args.pool, DEFAULT_POOL_PER_POSITION);
        assert_eq!(args.budget_secs, DEFAULT_BUDGET_SECS);
        assert!(!args.all_teams);
    }

    #[test]
    fn test_rejects_bad_bound() {
        let result =
            SleeperCli::try_parse_from(["sleeper-ffl", "draft", "recommend", "--min", "QB"]);
        assert!(result.is_err());
    }
}
