// crates/core/src/error.rs
use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while computing outreach statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("start_date {start} is after end_date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Local time for {date} cannot be represented")]
    UnrepresentableDate { date: NaiveDate },

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("Data access error: {source}")]
    DataAccess {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StatsError {
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn data_access(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::DataAccess {
            source: Box::new(source),
        }
    }

    /// Whether the caller supplied bad input (as opposed to a backend failure).
    pub fn is_validation(&self) -> bool {
        !matches!(self, StatsError::DataAccess { .. })
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
