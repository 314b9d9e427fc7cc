//! Database schema and connection management

use crate::{core::paths::database_path, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// SQLite-backed store of named table snapshots
pub struct SnapshotStore {
    pub(crate) conn: Connection,
}

impl SnapshotStore {
    /// Open the store at the default location and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&database_path())
    }

    /// Open (or create) a store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening snapshot store");

        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// In-memory store, mostly useful for tests
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                name TEXT PRIMARY KEY,
                row_count INTEGER NOT NULL,
                written_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                position TEXT NOT NULL,
                team TEXT,
                active INTEGER NOT NULL,
                status TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS weekly_projections (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                pts_ppr REAL NOT NULL,
                pts_half_ppr REAL NOT NULL,
                pts_std REAL NOT NULL,
                PRIMARY KEY (player_id, season, week)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_projections_season_week
             ON weekly_projections(season, week)",
            [],
        )?;

        Ok(())
    }
}
