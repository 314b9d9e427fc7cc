//! Core utilities shared across commands
//!
//! - `paths`: where snapshots live on disk
//! - `retry`: bounded retries for network fetches

pub mod paths;
pub mod retry;

pub use paths::{data_dir, database_path, DB_PATH_ENV_VAR};
pub use retry::{with_retries, RetryPolicy};
