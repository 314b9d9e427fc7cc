//! Maximin roster optimizer.
//!
//! Picks the remaining roster so that the team's weakest projected week is
//! as strong as possible. The model is a 0/1 program with one binary per
//! undrafted player and a free floor variable `t`:
//!
//! ```text
//! maximise   t
//! subject to t <= sum_i points[i][w] * x_i + locked[w]    for every week w
//!            sum_i x_i = roster_size - |team_picks|
//!            min[p] - have[p] <= sum_{i in p} x_i <= max[p] - have[p]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use futures_util::future::try_join_all;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use rayon::prelude::*;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::{rules::RosterRules, table::ScoringTable};
use crate::{
    cli::types::{Position, RosterId, Week},
    error::{SleeperError, SolveFailure},
    Result,
};

/// Result of one optimization attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterOutcome {
    /// The solver produced an assignment. `floor` is the lowest weekly total
    /// of the full roster over the horizon.
    Optimal { roster: BTreeSet<usize>, floor: f64 },
    /// The solver produced nothing usable; `roster` is the team's current picks.
    Degraded {
        roster: BTreeSet<usize>,
        #[serde(serialize_with = "failure_as_string")]
        reason: SolveFailure,
    },
}

fn failure_as_string<S: serde::Serializer>(
    reason: &SolveFailure,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

impl RosterOutcome {
    pub fn roster(&self) -> &BTreeSet<usize> {
        match self {
            Self::Optimal { roster, .. } | Self::Degraded { roster, .. } => roster,
        }
    }

    pub fn into_roster(self) -> BTreeSet<usize> {
        match self {
            Self::Optimal { roster, .. } | Self::Degraded { roster, .. } => roster,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal { .. })
    }

    pub fn floor(&self) -> Option<f64> {
        match self {
            Self::Optimal { floor, .. } => Some(*floor),
            Self::Degraded { .. } => None,
        }
    }

    /// Recommended players not already on the team.
    pub fn new_picks(&self, team_picks: &BTreeSet<usize>) -> BTreeSet<usize> {
        self.roster().difference(team_picks).copied().collect()
    }
}

impl From<ResolutionError> for SolveFailure {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => SolveFailure::Infeasible,
            ResolutionError::Unbounded => SolveFailure::Unbounded,
            other => SolveFailure::Solver(other.to_string()),
        }
    }
}

/// Roster optimizer configured once per draft and reused for every pick.
#[derive(Debug, Clone)]
pub struct RosterOptimizer {
    weeks: Vec<Week>,
    roster_size: usize,
    min_pos: BTreeMap<Position, usize>,
    max_pos: BTreeMap<Position, usize>,
}

impl RosterOptimizer {
    /// Configure the optimizer.
    ///
    /// `min_pos` and `max_pos` must bound the same set of positions and the
    /// week horizon must not be empty.
    pub fn new(
        weeks: Vec<Week>,
        roster_size: usize,
        min_pos: BTreeMap<Position, usize>,
        max_pos: BTreeMap<Position, usize>,
    ) -> Result<Self> {
        if weeks.is_empty() {
            return Err(SleeperError::InvalidRosterRules {
                message: "week horizon is empty".to_string(),
            });
        }
        let min_keys: BTreeSet<&Position> = min_pos.keys().collect();
        let max_keys: BTreeSet<&Position> = max_pos.keys().collect();
        if min_keys != max_keys {
            let unmatched: Vec<String> = min_keys
                .symmetric_difference(&max_keys)
                .map(|p| p.to_string())
                .collect();
            return Err(SleeperError::InvalidRosterRules {
                message: format!(
                    "positions bounded on one side only: {}",
                    unmatched.join(", ")
                ),
            });
        }

        Ok(Self {
            weeks,
            roster_size,
            min_pos,
            max_pos,
        })
    }

    pub fn from_rules(weeks: Vec<Week>, rules: RosterRules) -> Result<Self> {
        Self::new(weeks, rules.roster_size, rules.min_pos, rules.max_pos)
    }

    /// Best completion of `team_picks` given everything already drafted.
    ///
    /// Solver failures never surface as `Err`: they come back as
    /// [`RosterOutcome::Degraded`] holding `team_picks` unchanged. `Err` is
    /// reserved for inconsistent inputs.
    pub fn optimal_roster(
        &self,
        table: &ScoringTable,
        team_picks: &BTreeSet<usize>,
        all_picks: &BTreeSet<usize>,
        verbose: bool,
    ) -> Result<RosterOutcome> {
        let columns = self.check_call(table, team_picks, all_picks)?;

        let outcome = match self.solve(table, &columns, team_picks, all_picks, verbose) {
            Ok(selected) => {
                let roster: BTreeSet<usize> = selected.union(team_picks).copied().collect();
                let floor = table
                    .weekly_totals(&roster, &columns)
                    .into_iter()
                    .fold(f64::INFINITY, f64::min);
                RosterOutcome::Optimal { roster, floor }
            }
            Err(reason) => self.degrade(team_picks, all_picks, reason),
        };
        Ok(outcome)
    }

    /// [`optimal_roster`](Self::optimal_roster) on a detached thread, giving
    /// up after `budget`. An exceeded budget degrades like a solver that
    /// stopped without an incumbent. The abandoned thread is never joined,
    /// so it cannot delay runtime shutdown or process exit.
    pub async fn optimal_roster_within(
        &self,
        table: &ScoringTable,
        team_picks: &BTreeSet<usize>,
        all_picks: &BTreeSet<usize>,
        budget: Duration,
    ) -> Result<RosterOutcome> {
        self.check_call(table, team_picks, all_picks)?;
        self.solve_detached(
            Arc::new(table.clone()),
            team_picks,
            Arc::new(all_picks.clone()),
            budget,
        )
        .await
    }

    /// Optimize every team's roster independently against the shared
    /// `all_picks`. Teams are solved in parallel.
    pub fn optimal_rosters_for_league(
        &self,
        table: &ScoringTable,
        team_picks: &BTreeMap<RosterId, BTreeSet<usize>>,
        all_picks: &BTreeSet<usize>,
    ) -> Result<BTreeMap<RosterId, RosterOutcome>> {
        team_picks
            .par_iter()
            .map(|(&roster_id, picks)| {
                self.optimal_roster(table, picks, all_picks, false)
                    .map(|outcome| (roster_id, outcome))
            })
            .collect()
    }

    /// League-wide view where every team's solve gets its own `budget`.
    /// The solves run concurrently, so the whole call returns within about
    /// one budget.
    pub async fn optimal_rosters_for_league_within(
        &self,
        table: &ScoringTable,
        team_picks: &BTreeMap<RosterId, BTreeSet<usize>>,
        all_picks: &BTreeSet<usize>,
        budget: Duration,
    ) -> Result<BTreeMap<RosterId, RosterOutcome>> {
        for picks in team_picks.values() {
            self.check_call(table, picks, all_picks)?;
        }

        let table = Arc::new(table.clone());
        let all_picks = Arc::new(all_picks.clone());
        let solves = team_picks.iter().map(|(&roster_id, picks)| {
            let table = Arc::clone(&table);
            let all_picks = Arc::clone(&all_picks);
            async move {
                self.solve_detached(table, picks, all_picks, budget)
                    .await
                    .map(|outcome| (roster_id, outcome))
            }
        });
        Ok(try_join_all(solves).await?.into_iter().collect())
    }

    async fn solve_detached(
        &self,
        table: Arc<ScoringTable>,
        team_picks: &BTreeSet<usize>,
        all_picks: Arc<BTreeSet<usize>>,
        budget: Duration,
    ) -> Result<RosterOutcome> {
        let (tx, rx) = oneshot::channel();
        let optimizer = self.clone();
        let owned_team = team_picks.clone();
        let shared_all = Arc::clone(&all_picks);
        let spawned = thread::Builder::new()
            .name("roster-solve".to_string())
            .spawn(move || {
                // the receiver is gone once the budget has expired
                let _ = tx.send(optimizer.optimal_roster(&table, &owned_team, &shared_all, false));
            });
        if let Err(err) = spawned {
            return Ok(self.degrade(team_picks, &all_picks, SolveFailure::Solver(err.to_string())));
        }

        match tokio::time::timeout(budget, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Ok(self.degrade(
                team_picks,
                &all_picks,
                SolveFailure::Solver("solver thread exited without a result".to_string()),
            )),
            Err(_) => {
                warn!(budget_ms = budget.as_millis() as u64, "solve exceeded time budget");
                Ok(self.degrade(team_picks, &all_picks, SolveFailure::NoIncumbent))
            }
        }
    }

    /// Validate the call and resolve configured weeks to table columns.
    fn check_call(
        &self,
        table: &ScoringTable,
        team_picks: &BTreeSet<usize>,
        all_picks: &BTreeSet<usize>,
    ) -> Result<Vec<usize>> {
        if team_picks.len() > self.roster_size {
            return Err(SleeperError::InvalidPicks {
                message: format!(
                    "team already has {} players but the roster holds {}",
                    team_picks.len(),
                    self.roster_size
                ),
            });
        }
        if let Some(idx) = team_picks.iter().find(|idx| !all_picks.contains(idx)) {
            return Err(SleeperError::InvalidPicks {
                message: format!("team pick {} is missing from the drafted set", idx),
            });
        }
        if let Some(&idx) = all_picks.iter().next_back().filter(|&&idx| idx >= table.len()) {
            return Err(SleeperError::InvalidPicks {
                message: format!("pick {} is outside a table of {} players", idx, table.len()),
            });
        }

        self.weeks
            .iter()
            .map(|&week| {
                table
                    .week_column(week)
                    .ok_or_else(|| SleeperError::InvalidRosterRules {
                        message: format!("week {} is not a column of the scoring table", week),
                    })
            })
            .collect()
    }

    fn degrade(
        &self,
        team_picks: &BTreeSet<usize>,
        all_picks: &BTreeSet<usize>,
        reason: SolveFailure,
    ) -> RosterOutcome {
        warn!(
            %reason,
            team_picks = team_picks.len(),
            all_picks = all_picks.len(),
            roster_size = self.roster_size,
            "optimization failed, keeping current roster"
        );
        RosterOutcome::Degraded {
            roster: team_picks.clone(),
            reason,
        }
    }

    fn solve(
        &self,
        table: &ScoringTable,
        columns: &[usize],
        team_picks: &BTreeSet<usize>,
        all_picks: &BTreeSet<usize>,
        verbose: bool,
    ) -> std::result::Result<BTreeSet<usize>, SolveFailure> {
        // ascending, so variable i is the i-th smallest undrafted row
        let available: Vec<usize> = (0..table.len()).filter(|i| !all_picks.contains(i)).collect();
        let locked = table.weekly_totals(team_picks, columns);
        let have = table.position_counts(team_picks);
        let open_slots = (self.roster_size - team_picks.len()) as f64;

        if verbose {
            info!(
                available = available.len(),
                team_picks = team_picks.len(),
                open_slots,
                weeks = columns.len(),
                "building roster model"
            );
        }

        let mut vars = ProblemVariables::new();
        let picks: Vec<Variable> = available
            .iter()
            .map(|_| vars.add(variable().binary()))
            .collect();
        let floor = vars.add(variable());

        let mut model = vars.maximise(floor).using(microlp);

        if picks.is_empty() {
            if open_slots > 0.0 {
                return Err(SolveFailure::Infeasible);
            }
        } else {
            let drafted: Expression = picks.iter().copied().sum();
            model = model.with(constraint!(drafted == open_slots));
        }

        for (pos, &min) in &self.min_pos {
            let max = self.max_pos[pos];
            let already = have.get(pos).copied().unwrap_or(0) as f64;
            let lower = min as f64 - already;
            let upper = max as f64 - already;

            let at_pos: Vec<Variable> = available
                .iter()
                .zip(&picks)
                .filter(|&(&idx, _)| table.rows()[idx].position == *pos)
                .map(|(_, &var)| var)
                .collect();
            if at_pos.is_empty() {
                // nothing to choose from: the bound holds iff 0 fits in it
                if lower > 0.0 || upper < 0.0 {
                    return Err(SolveFailure::Infeasible);
                }
                continue;
            }

            let count: Expression = at_pos.into_iter().sum();
            model = model.with(constraint!(count.clone() >= lower));
            model = model.with(constraint!(count <= upper));
        }

        for (col_pos, &col) in columns.iter().enumerate() {
            let base = locked[col_pos];
            let week_points: Expression = available
                .iter()
                .zip(&picks)
                .map(|(&idx, &var)| table.points(idx, col) * var)
                .sum();
            model = model.with(constraint!(floor <= week_points + base));
        }

        let solution = model.solve()?;

        let selected: BTreeSet<usize> = available
            .iter()
            .zip(&picks)
            .filter(|&(_, var)| solution.value(*var).round() >= 1.0)
            .map(|(&idx, _)| idx)
            .collect();

        if verbose {
            info!(
                selected = selected.len(),
                floor = solution.value(floor),
                "roster model solved"
            );
        } else {
            debug!(selected = selected.len(), "roster model solved");
        }
        Ok(selected)
    }
}
