//! Type-safe wrappers and enums for Sleeper fantasy football data.

pub mod ids;
pub mod position;
pub mod scoring;
pub mod time;

pub use ids::{DraftId, LeagueId, PlayerId, RosterId};
pub use position::{Position, PositionBound, RosterSlot};
pub use scoring::ScoringFormat;
pub use time::{Season, Week, WeekSpec, LAST_REGULAR_WEEK};
