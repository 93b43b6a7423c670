// crates/client/src/lib.rs
//! Dashboard data layer for the outreach stats API.
//!
//! [`FilterContext`] holds the selected user, date range and project;
//! [`StatsClient`] fetches the three stats endpoints; [`CachedStatsClient`]
//! adds per-query caching; [`views`] turns responses into chart-ready data.

pub mod cache;
pub mod client;
pub mod error;
pub mod filters;
pub mod views;

pub use cache::{CachePolicy, CachedStatsClient, QueryCache};
pub use client::{ClientConfig, StatsClient, API_URL_ENV};
pub use error::{ClientError, ClientResult};
pub use filters::{DateRange, FilterContext, RangePreset};
