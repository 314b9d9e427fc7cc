//! Snapshot read/write operations

use super::{models::*, schema::SnapshotStore};
use crate::{
    cli::types::{Season, Week},
    error::SleeperError,
    Result,
};
use rusqlite::params;
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

impl SnapshotStore {
    /// Whether a snapshot named `name` has ever been written
    pub fn exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM snapshots WHERE name = ?",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Replace the snapshot for `T` with `rows`.
    ///
    /// The old rows are removed and the new ones inserted in one
    /// transaction, so readers never see a half-written snapshot.
    pub fn write<T: Snapshot>(&mut self, rows: &[T]) -> Result<usize> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DELETE FROM {}", T::NAME), [])?;
        {
            let mut stmt = tx.prepare(T::INSERT_SQL)?;
            for row in rows {
                row.insert(&mut stmt)?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO snapshots (name, row_count, written_at) VALUES (?, ?, ?)",
            params![T::NAME, rows.len() as i64, now],
        )?;
        tx.commit()?;

        info!(snapshot = T::NAME, rows = rows.len(), "snapshot written");
        Ok(rows.len())
    }

    /// Read every row of the snapshot for `T`
    pub fn read<T: Snapshot>(&self) -> Result<Vec<T>> {
        if !self.exists(T::NAME)? {
            return Err(SleeperError::SnapshotMissing {
                name: T::NAME.to_string(),
            });
        }

        let mut stmt = self.conn.prepare(T::SELECT_SQL)?;
        let rows = stmt.query_map([], |row| T::from_row(row))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Weeks of `season` with at least one stored projection
    pub fn projected_weeks(&self, season: Season) -> Result<BTreeSet<Week>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT week FROM weekly_projections WHERE season = ? ORDER BY week",
        )?;
        let rows = stmt.query_map(params![season.as_u16()], |row| {
            Ok(Week::new(row.get(0)?))
        })?;

        let mut out = BTreeSet::new();
        for row in rows {
            out.insert(row?);
        }
        Ok(out)
    }

    /// All snapshots written so far, by name
    pub fn catalog(&self) -> Result<Vec<SnapshotInfo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, row_count, written_at FROM snapshots ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(SnapshotInfo {
                name: row.get(0)?,
                row_count: row.get::<_, i64>(1)? as u64,
                written_at: row.get::<_, i64>(2)? as u64,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
