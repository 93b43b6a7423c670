// crates/core/src/window.rs
//! Stats windows: request dates resolved to local-time instants.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::error::{StatsError, StatsResult};

/// Parse a `YYYY-MM-DD` request date.
pub fn parse_date(value: &str) -> StatsResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| StatsError::invalid_date(value))
}

/// Resolve a local wall-clock time, taking the earliest instant when the
/// clock is ambiguous (DST fall-back).
fn local_instant(date: NaiveDate, time: NaiveTime) -> StatsResult<DateTime<Local>> {
    let naive = date.and_time(time);
    if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
        return Ok(dt);
    }
    // Midnight inside a DST gap: the day starts at the first valid instant.
    (1..=3)
        .filter_map(|h| {
            Local
                .from_local_datetime(&(naive + Duration::hours(h)))
                .earliest()
        })
        .next()
        .ok_or(StatsError::UnrepresentableDate { date })
}

/// An inclusive time window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl StatsWindow {
    /// Window from local midnight of `start` through 23:59:59.999 of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> StatsResult<Self> {
        if start > end {
            return Err(StatsError::InvertedRange { start, end });
        }
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or(StatsError::UnrepresentableDate { date: end })?;
        Ok(Self {
            start: local_instant(start, NaiveTime::MIN)?,
            end: local_instant(end, end_of_day)?,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The window of identical duration ending 1ms before this one starts.
    pub fn previous(&self) -> Self {
        let end = self.start - Duration::milliseconds(1);
        Self {
            start: end - self.duration(),
            end,
        }
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}
