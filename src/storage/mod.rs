//! Storage layer for point-in-time snapshots
//!
//! This module provides a thin abstraction over SQLite:
//! - `models`: snapshot row types and the `Snapshot` trait
//! - `schema`: connection and schema management
//! - `queries`: exists/write/read of named snapshots

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::SnapshotStore;
