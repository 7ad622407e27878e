//! Season data adapter for the Sleeper fantasy platform.
//!
//! - `http`: REST endpoints
//! - `types`: raw wire payloads
//! - `adapter`: raw payloads → [`SeasonData`](crate::league::models::SeasonData)
//! - `snapshot`: on-disk season snapshots and load-or-fetch

pub mod adapter;
pub mod http;
pub mod snapshot;
pub mod types;

pub use snapshot::{load_or_fetch_season, load_snapshot, save_snapshot, FetchOptions};
