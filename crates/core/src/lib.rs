// crates/core/src/lib.rs
//! Outreach response-rate statistics: domain types, rate arithmetic and the
//! aggregation service.

pub mod daily;
pub mod error;
pub mod rates;
pub mod service;
pub mod source;
pub mod types;
pub mod window;

pub use daily::{complete_counts, fill_calendar, group_by_day};
pub use error::*;
pub use rates::{compare_tallies, response_rate, round2, Tally};
pub use service::StatsService;
pub use source::{PeriodQuery, StatsSource, MAX_PROJECTS};
pub use types::*;
pub use window::{parse_date, StatsWindow};
