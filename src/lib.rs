//! Sleeper Fantasy Football Draft Optimizer
//!
//! Recommends draft picks for a Sleeper league by solving a small 0/1
//! program: complete the roster so that its weakest projected week over a
//! chosen horizon is as strong as possible, within the league's roster and
//! position limits.
//!
//! ## Features
//!
//! - **Roster Optimization**: maximin weekly floor with per-position bounds,
//!   failing soft when the solver cannot produce an assignment
//! - **Draft Tracking**: snake and linear pick orders, picks grouped by team
//! - **Local Snapshots**: players and weekly projections stored in SQLite
//! - **Sleeper API**: typed access to leagues, drafts and projections
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::{BTreeMap, BTreeSet};
//! use sleeper_ffl::{
//!     optimize::{RosterOptimizer, ScoringTable, TableRow},
//!     PlayerId, Position, Week,
//! };
//!
//! let row = |id: &str, position, points: &[f64]| TableRow {
//!     player_id: PlayerId::new(id),
//!     name: id.to_string(),
//!     position,
//!     points: points.to_vec(),
//! };
//! let weeks = vec![Week::new(1), Week::new(2)];
//! let table = ScoringTable::new(
//!     weeks.clone(),
//!     vec![
//!         row("rb1", Position::RB, &[10.0, 8.0]),
//!         row("wr1", Position::WR, &[7.0, 7.0]),
//!     ],
//! )?;
//!
//! let bounds: BTreeMap<Position, usize> = [(Position::RB, 1), (Position::WR, 1)].into();
//! let optimizer = RosterOptimizer::new(weeks, 2, bounds.clone(), bounds)?;
//! let outcome = optimizer.optimal_roster(&table, &BTreeSet::new(), &BTreeSet::new(), false)?;
//!
//! assert_eq!(outcome.floor(), Some(15.0));
//! # Ok::<(), sleeper_ffl::SleeperError>(())
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export SLEEPER_LEAGUE_ID=784512
//! export SLEEPER_FFL_DB=~/drafts/snapshots.db   # optional
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod optimize;
pub mod sleeper;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    DraftId, LeagueId, PlayerId, Position, RosterId, ScoringFormat, Season, Week, WeekSpec,
};
pub use error::{Result, SleeperError, SolveFailure};
pub use optimize::{RosterOptimizer, RosterOutcome};

pub const LEAGUE_ID_ENV_VAR: &str = "SLEEPER_LEAGUE_ID";
