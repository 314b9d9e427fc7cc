//! `draft recommend`: the roster completion that maximizes the weakest week.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::info;

use crate::{
    cli::types::{
        LeagueId, PlayerId, Position, PositionBound, RosterId, ScoringFormat, Season, Week,
    },
    error::SleeperError,
    optimize::{
        all_picks_idx, roster_to_team_picks_idx_map, RosterOptimizer, RosterOutcome, RosterRules,
        ScoringTable, TableBuilder,
    },
    sleeper::http::get_league_users,
    storage::{PlayerRecord, ProjectionRecord, SnapshotStore},
    Result,
};

use super::{
    league_info::{label_for, load_draft, team_labels},
    resolve_league_id,
};

/// Default size of the undrafted pool kept per position.
pub const DEFAULT_POOL_PER_POSITION: usize = 40;

/// Default wall-clock budget for one solve.
pub const DEFAULT_BUDGET_SECS: u64 = 30;

/// Default horizon is weeks `1..=DEFAULT_HORIZON_WEEKS`. Longer horizons
/// make the 0/1 program much harder for the pure-Rust solver.
pub const DEFAULT_HORIZON_WEEKS: u16 = 4;

#[derive(Debug, Clone)]
pub struct RecommendParams {
    pub league_id: Option<LeagueId>,
    pub roster_id: Option<RosterId>,
    pub season: Option<Season>,
    pub weeks: Vec<Week>,
    pub scoring: Option<ScoringFormat>,
    pub min: Vec<PositionBound>,
    pub max: Vec<PositionBound>,
    pub pool: usize,
    pub budget: Duration,
    pub all_teams: bool,
    pub as_json: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLine {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekTotal {
    pub week: Week,
    pub points: f64,
}

/// One team's recommendation, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub roster_id: RosterId,
    pub team: String,
    pub optimal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub floor: Option<f64>,
    pub weekly_totals: Vec<WeekTotal>,
    pub current: Vec<PlayerLine>,
    pub recommended: Vec<PlayerLine>,
}

impl Recommendation {
    pub fn from_outcome(
        table: &ScoringTable,
        roster_id: RosterId,
        team: String,
        team_picks: &BTreeSet<usize>,
        outcome: &RosterOutcome,
    ) -> Self {
        let lines = |indices: &BTreeSet<usize>| -> Vec<PlayerLine> {
            indices
                .iter()
                .filter_map(|&idx| table.row(idx))
                .map(|row| PlayerLine {
                    player_id: row.player_id.clone(),
                    name: row.name.clone(),
                    position: row.position,
                    total: row.total(),
                })
                .collect()
        };

        let columns: Vec<usize> = (0..table.weeks().len()).collect();
        let weekly_totals = table
            .weeks()
            .iter()
            .zip(table.weekly_totals(outcome.roster(), &columns))
            .map(|(&week, points)| WeekTotal { week, points })
            .collect();

        let reason = match outcome {
            RosterOutcome::Degraded { reason, .. } => Some(reason.to_string()),
            RosterOutcome::Optimal { .. } => None,
        };

        Self {
            roster_id,
            team,
            optimal: outcome.is_optimal(),
            reason,
            floor: outcome.floor(),
            weekly_totals,
            current: lines(team_picks),
            recommended: lines(&outcome.new_picks(team_picks)),
        }
    }

    pub fn print(&self) {
        println!("{} (roster {})", self.team, self.roster_id);
        match (&self.reason, self.floor) {
            (Some(reason), _) => println!("⚠ No recommendation: {}", reason),
            (None, Some(floor)) => println!("✓ Weakest projected week: {:.1} pts", floor),
            (None, None) => {}
        }

        if !self.current.is_empty() {
            println!("\nCurrent roster:");
            for line in &self.current {
                println!("  {:<4} {:<28} {:>7.1}", line.position, line.name, line.total);
            }
        }
        if !self.recommended.is_empty() {
            println!("\nRecommended picks:");
            for line in &self.recommended {
                println!("  {:<4} {:<28} {:>7.1}", line.position, line.name, line.total);
            }
        }

        let weeks: Vec<String> = self
            .weekly_totals
            .iter()
            .map(|w| format!("{}:{:.1}", w.week, w.points))
            .collect();
        println!("\nWeekly totals: {}", weeks.join("  "));
    }
}

/// Handle `draft recommend`
pub async fn handle_recommend(params: RecommendParams) -> Result<()> {
    let league_id = resolve_league_id(params.league_id.clone())?;
    let (league, meta, draft) = load_draft(&league_id).await?;
    let users = get_league_users(&league_id).await?;
    let labels = team_labels(&meta, &users);

    let season = params
        .season
        .or_else(|| league.season.as_deref().and_then(|s| s.parse().ok()))
        .unwrap_or_default();
    let format = params
        .scoring
        .unwrap_or_else(|| ScoringFormat::from_reception_points(league.scoring_settings.rec));
    let rules = RosterRules::from_roster_positions(&league.roster_positions)
        .with_overrides(&params.min, &params.max);

    if params.verbose {
        println!(
            "Season {}, {} scoring, {} weeks, roster of {}",
            season,
            format,
            params.weeks.len(),
            rules.roster_size
        );
    }

    let store = SnapshotStore::new()?;
    let players = store.read::<PlayerRecord>()?;
    let projections = store.read::<ProjectionRecord>()?;

    let table = TableBuilder::new(season, params.weeks.clone(), format)
        .pool_per_position(params.pool)
        .keep(draft.picks.iter().map(|p| p.player_id.clone()))
        .build(&players, &projections)?;
    info!(players = table.len(), picks = draft.picks.len(), "scoring table built");

    let team_picks = roster_to_team_picks_idx_map(&table, &draft.rosters());
    let all_picks = all_picks_idx(&team_picks);
    let optimizer = RosterOptimizer::from_rules(params.weeks.clone(), rules)?;

    let recommendations: Vec<Recommendation> = if params.all_teams {
        let outcomes = optimizer
            .optimal_rosters_for_league_within(&table, &team_picks, &all_picks, params.budget)
            .await?;
        outcomes
            .iter()
            .map(|(&roster_id, outcome)| {
                Recommendation::from_outcome(
                    &table,
                    roster_id,
                    label_for(&labels, roster_id),
                    &team_picks[&roster_id],
                    outcome,
                )
            })
            .collect()
    } else {
        let roster_id = params
            .roster_id
            .or_else(|| draft.next_pick())
            .ok_or_else(|| SleeperError::DraftComplete {
                draft_id: draft.draft_id.to_string(),
            })?;
        let empty = BTreeSet::new();
        let picks = team_picks.get(&roster_id).unwrap_or(&empty);

        if params.verbose {
            println!(
                "Optimizing for roster {} with {} of {} players drafted league-wide",
                roster_id,
                all_picks.len(),
                table.len()
            );
        }
        let outcome = optimizer
            .optimal_roster_within(&table, picks, &all_picks, params.budget)
            .await?;
        vec![Recommendation::from_outcome(
            &table,
            roster_id,
            label_for(&labels, roster_id),
            picks,
            &outcome,
        )]
    };

    if params.as_json {
        let out: BTreeMap<String, &Recommendation> = recommendations
            .iter()
            .map(|r| (r.roster_id.to_string(), r))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (i, rec) in recommendations.iter().enumerate() {
            if i > 0 {
                println!("\n{}", "-".repeat(48));
            }
            rec.print();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveFailure;
    use crate::optimize::TableRow;

    fn table() -> ScoringTable {
        let row = |id: &str, position, points: &[f64]| TableRow {
            player_id: PlayerId::new(id),
            name: id.to_uppercase(),
            position,
            points: points.to_vec(),
        };
        ScoringTable::new(
            vec![Week::new(1), Week::new(2)],
            vec![
                row("rb1", Position::RB, &[10.0, 8.0]),
                row("wr1", Position::WR, &[7.0, 7.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_recommendation_from_optimal_outcome() {
        let table = table();
        let team: BTreeSet<usize> = [0].into_iter().collect();
        let outcome = RosterOutcome::Optimal {
            roster: [0, 1].into_iter().collect(),
            floor: 15.0,
        };

        let rec = Recommendation::from_outcome(&table, RosterId(4), "Team 4".into(), &team, &outcome);

        assert!(rec.optimal);
        assert_eq!(rec.floor, Some(15.0));
        assert_eq!(rec.current.len(), 1);
        assert_eq!(rec.recommended[0].name, "WR1");
        assert_eq!(rec.recommended[0].total, 14.0);
        assert_eq!(
            rec.weekly_totals,
            vec![
                WeekTotal { week: Week::new(1), points: 17.0 },
                WeekTotal { week: Week::new(2), points: 15.0 },
            ]
        );
    }

    #[test]
    fn test_recommendation_from_degraded_outcome() {
        let table = table();
        let team: BTreeSet<usize> = [1].into_iter().collect();
        let outcome = RosterOutcome::Degraded {
            roster: team.clone(),
            reason: SolveFailure::Infeasible,
        };

        let rec = Recommendation::from_outcome(&table, RosterId(1), "Team 1".into(), &team, &outcome);

        assert!(!rec.optimal);
        assert!(rec.recommended.is_empty());
        assert!(rec.reason.unwrap().contains("cannot be satisfied"));
    }

    #[test]
    fn test_recommendation_json_shape() {
        let table = table();
        let outcome = RosterOutcome::Optimal {
            roster: [1].into_iter().collect(),
            floor: 7.0,
        };
        let rec = Recommendation::from_outcome(
            &table,
            RosterId(2),
            "Team 2".into(),
            &BTreeSet::new(),
            &outcome,
        );

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["roster_id"], 2);
        assert_eq!(json["recommended"][0]["position"], "WR");
        assert_eq!(json["weekly_totals"][1]["week"], 2);
        assert!(json.get("reason").is_none());
    }
}
