//! File-system locations for persisted data.

use std::path::PathBuf;

/// Environment variable overriding the snapshot database path.
pub const DB_PATH_ENV_VAR: &str = "SLEEPER_FFL_DB";

/// Base directory: `~/.cache/sleeper-ffl` (or `./.cache/sleeper-ffl`
/// when no cache or home directory can be determined).
pub fn data_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("sleeper-ffl")
}

/// Path of the snapshot database, honoring `SLEEPER_FFL_DB`.
pub fn database_path() -> PathBuf {
    match std::env::var(DB_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("snapshots.db"),
    }
}
