//! Snapshot row types and their SQLite mapping

use crate::cli::types::{PlayerId, Position, Season, Week};
use rusqlite::{params, types::Type, Row, Statement};
use serde::{Deserialize, Serialize};

/// A table that can be stored as a named point-in-time snapshot.
///
/// `NAME` is both the logical snapshot name and the SQLite table name.
pub trait Snapshot: Sized {
    const NAME: &'static str;
    const INSERT_SQL: &'static str;
    const SELECT_SQL: &'static str;

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<()>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Player information from the `players` snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub full_name: String,
    pub position: Position,
    pub team: Option<String>,
    pub active: bool,
    pub status: Option<String>,
}

impl Snapshot for PlayerRecord {
    const NAME: &'static str = "players";
    const INSERT_SQL: &'static str =
        "INSERT INTO players (player_id, full_name, position, team, active, status)
         VALUES (?, ?, ?, ?, ?, ?)";
    const SELECT_SQL: &'static str =
        "SELECT player_id, full_name, position, team, active, status
         FROM players ORDER BY player_id";

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<()> {
        stmt.execute(params![
            self.player_id.as_str(),
            self.full_name,
            self.position.to_string(),
            self.team,
            self.active,
            self.status
        ])?;
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let position: String = row.get(2)?;
        Ok(Self {
            player_id: PlayerId::new(row.get::<_, String>(0)?),
            full_name: row.get(1)?,
            position: position
                .parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
            team: row.get(3)?,
            active: row.get(4)?,
            status: row.get(5)?,
        })
    }
}

/// One player's projected points for one week, from the
/// `weekly_projections` snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub player_id: PlayerId,
    pub season: Season,
    pub week: Week,
    pub pts_ppr: f64,
    pub pts_half_ppr: f64,
    pub pts_std: f64,
}

impl Snapshot for ProjectionRecord {
    const NAME: &'static str = "weekly_projections";
    const INSERT_SQL: &'static str =
        "INSERT OR REPLACE INTO weekly_projections
         (player_id, season, week, pts_ppr, pts_half_ppr, pts_std)
         VALUES (?, ?, ?, ?, ?, ?)";
    const SELECT_SQL: &'static str =
        "SELECT player_id, season, week, pts_ppr, pts_half_ppr, pts_std
         FROM weekly_projections ORDER BY season, week, player_id";

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<()> {
        stmt.execute(params![
            self.player_id.as_str(),
            self.season.as_u16(),
            self.week.as_u16(),
            self.pts_ppr,
            self.pts_half_ppr,
            self.pts_std
        ])?;
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: PlayerId::new(row.get::<_, String>(0)?),
            season: Season::new(row.get(1)?),
            week: Week::new(row.get(2)?),
            pts_ppr: row.get(3)?,
            pts_half_ppr: row.get(4)?,
            pts_std: row.get(5)?,
        })
    }
}

/// Catalog entry describing one stored snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub name: String,
    pub row_count: u64,
    pub written_at: u64,
}
