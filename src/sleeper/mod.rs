//! Sleeper API access and draft bookkeeping
//!
//! - `http`: fetch functions for players, projections, leagues and drafts
//! - `types`: typed payloads and their conversion into snapshot rows
//! - `draft`: snake/linear pick order and pick-to-team grouping

pub mod draft;
pub mod http;
pub mod types;

pub use draft::{linear_order, snake_order, Draft};
