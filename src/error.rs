//! Error types for the Sleeper draft optimizer

use thiserror::Error;


pub type Result<T> = std::result::Result<T, SleeperError>;

#[derive(Error, Debug)]
pub enum SleeperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Invalid identifier: {value:?}")]
    InvalidId { value: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid week spec {spec:?}: {reason}")]
    InvalidWeekSpec { spec: String, reason: String },

    #[error("Invalid position bound {bound:?}, expected POS=N")]
    InvalidBound { bound: String },

    #[error("Invalid roster rules: {message}")]
    InvalidRosterRules { message: String },

    #[error("Invalid scoring table: {message}")]
    InvalidTable { message: String },

    #[error("Invalid pick sets: {message}")]
    InvalidPicks { message: String },

    #[error("Snapshot {name:?} has not been written yet (run `sleeper-ffl data refresh`)")]
    SnapshotMissing { name: String },

    #[error("Draft {draft_id} is complete; pass --roster-id to choose a team")]
    DraftComplete { draft_id: String },

    #[error("Sleeper API returned no data")]
    NoData,
}

/// Why an optimization attempt produced no usable assignment.
///
/// These never propagate out of the optimizer; they are carried inside
/// [`crate::optimize::RosterOutcome::Degraded`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveFailure {
    #[error("constraints cannot be satisfied with the current picks and rules")]
    Infeasible,

    #[error("objective is unbounded")]
    Unbounded,

    #[error("solver failed: {0}")]
    Solver(String),

    #[error("solver stopped without a feasible assignment")]
    NoIncumbent,
}
