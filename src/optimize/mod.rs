//! Draft roster optimization.
//!
//! - [`table`]: the players-by-weeks scoring table and its builder
//! - [`rules`]: roster size and position bounds from league settings
//! - [`optimizer`]: the maximin 0/1 program and its fail-soft outcome
//! - [`picks`]: draft picks to table row indices

pub mod optimizer;
pub mod picks;
pub mod rules;
pub mod table;


pub use optimizer::{RosterOptimizer, RosterOutcome};
pub use picks::{all_picks_idx, roster_to_team_picks_idx_map};
pub use rules::RosterRules;
pub use table::{ScoringTable, TableBuilder, TableRow};
