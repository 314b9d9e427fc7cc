//! The players-by-weeks scoring table the optimizer works on.
//!
//! Row order is the zero-based index the optimizer and the pick sets use.
//! That index is a handle into one table instance only; rebuilding the
//! table (different snapshot, weeks or pool) invalidates it.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::{
    cli::types::{PlayerId, Position, ScoringFormat, Season, Week},
    error::SleeperError,
    storage::{PlayerRecord, ProjectionRecord},
    Result,
};

/// One candidate player and their projected points per week column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub points: Vec<f64>,
}

impl TableRow {
    pub fn total(&self) -> f64 {
        self.points.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct ScoringTable {
    weeks: Vec<Week>,
    rows: Vec<TableRow>,
    by_id: HashMap<PlayerId, usize>,
}

impl ScoringTable {
    /// Build a table, checking that week columns are unique, every row has
    /// one value per week, and player ids are unique.
    pub fn new(weeks: Vec<Week>, rows: Vec<TableRow>) -> Result<Self> {
        let invalid = |message: String| SleeperError::InvalidTable { message };

        let distinct: HashSet<&Week> = weeks.iter().collect();
        if distinct.len() != weeks.len() {
            return Err(invalid("duplicate week column".to_string()));
        }

        let mut by_id = HashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if row.points.len() != weeks.len() {
                return Err(invalid(format!(
                    "player {} has {} weekly values for {} weeks",
                    row.player_id,
                    row.points.len(),
                    weeks.len()
                )));
            }
            if by_id.insert(row.player_id.clone(), idx).is_some() {
                return Err(invalid(format!("duplicate player {}", row.player_id)));
            }
        }

        Ok(Self { weeks, rows, by_id })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&TableRow> {
        self.rows.get(idx)
    }

    /// Column position of `week`, if the table carries it.
    pub fn week_column(&self, week: Week) -> Option<usize> {
        self.weeks.iter().position(|&w| w == week)
    }

    /// Row index of a player, matched by external identifier.
    pub fn index_of(&self, player_id: &PlayerId) -> Option<usize> {
        self.by_id.get(player_id).copied()
    }

    pub fn points(&self, idx: usize, column: usize) -> f64 {
        self.rows[idx].points[column]
    }

    /// Per-column point totals of the given rows.
    pub fn weekly_totals<'a>(
        &self,
        indices: impl IntoIterator<Item = &'a usize>,
        columns: &[usize],
    ) -> Vec<f64> {
        let mut totals = vec![0.0; columns.len()];
        for &idx in indices {
            for (total, &col) in totals.iter_mut().zip(columns) {
                *total += self.points(idx, col);
            }
        }
        totals
    }

    /// How many of the given rows play each position.
    pub fn position_counts<'a>(
        &self,
        indices: impl IntoIterator<Item = &'a usize>,
    ) -> BTreeMap<Position, usize> {
        let mut counts = BTreeMap::new();
        for &idx in indices {
            *counts.entry(self.rows[idx].position).or_insert(0) += 1;
        }
        counts
    }
}

/// Joins the `players` and `weekly_projections` snapshots into a
/// [`ScoringTable`] for one season and week horizon.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    season: Season,
    weeks: Vec<Week>,
    format: ScoringFormat,
    pool_per_position: Option<usize>,
    keep: HashSet<PlayerId>,
}

impl TableBuilder {
    pub fn new(season: Season, weeks: Vec<Week>, format: ScoringFormat) -> Self {
        Self {
            season,
            weeks,
            format,
            pool_per_position: None,
            keep: HashSet::new(),
        }
    }

    /// Keep at most `n` undrafted players per position, best horizon total first.
    pub fn pool_per_position(mut self, n: usize) -> Self {
        self.pool_per_position = Some(n);
        self
    }

    /// Players that must stay in the table regardless of pool or activity
    /// (everyone already drafted).
    pub fn keep<I: IntoIterator<Item = PlayerId>>(mut self, ids: I) -> Self {
        self.keep.extend(ids);
        self
    }

    fn pick_points(&self, rec: &ProjectionRecord) -> f64 {
        match self.format {
            ScoringFormat::Ppr => rec.pts_ppr,
            ScoringFormat::Half => rec.pts_half_ppr,
            ScoringFormat::Std => rec.pts_std,
        }
    }

    pub fn build(
        &self,
        players: &[PlayerRecord],
        projections: &[ProjectionRecord],
    ) -> Result<ScoringTable> {
        let columns: HashMap<Week, usize> = self
            .weeks
            .iter()
            .enumerate()
            .map(|(col, &week)| (week, col))
            .collect();

        let mut points: HashMap<&PlayerId, Vec<f64>> = HashMap::new();
        for rec in projections.iter().filter(|r| r.season == self.season) {
            if let Some(&col) = columns.get(&rec.week) {
                points
                    .entry(&rec.player_id)
                    .or_insert_with(|| vec![0.0; self.weeks.len()])[col] = self.pick_points(rec);
            }
        }

        let mut kept = Vec::new();
        let mut candidates: BTreeMap<Position, Vec<TableRow>> = BTreeMap::new();
        for player in players {
            let row = TableRow {
                player_id: player.player_id.clone(),
                name: player.full_name.clone(),
                position: player.position,
                points: points
                    .get(&player.player_id)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.weeks.len()]),
            };
            if self.keep.contains(&player.player_id) {
                kept.push(row);
            } else if player.active && row.total() > 0.0 {
                candidates.entry(row.position).or_default().push(row);
            }
        }

        let mut rows = kept;
        for (_, mut group) in candidates {
            group.sort_by(by_total_desc);
            if let Some(n) = self.pool_per_position {
                group.truncate(n);
            }
            rows.extend(group);
        }
        rows.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| by_total_desc(a, b)));

        let table = ScoringTable::new(self.weeks.clone(), rows)?;
        let missing = self
            .keep
            .iter()
            .filter(|id| table.index_of(id).is_none())
            .count();
        if missing > 0 {
            debug!(missing, "drafted players absent from the players snapshot");
        }
        Ok(table)
    }
}

fn by_total_desc(a: &TableRow, b: &TableRow) -> Ordering {
    b.total()
        .total_cmp(&a.total())
        .then_with(|| a.player_id.cmp(&b.player_id))
}
