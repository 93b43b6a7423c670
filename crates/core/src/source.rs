// crates/core/src/source.rs
use async_trait::async_trait;

use crate::error::StatsResult;
use crate::types::{DailyTypeCounts, ProjectCount, StatsFilters, TypeCounts};
use crate::window::StatsWindow;

/// Upper bound on the number of projects returned to the dashboard.
pub const MAX_PROJECTS: u32 = 50;

/// One aggregation request: whose entries, over which window, in which project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    pub user_id: String,
    pub window: StatsWindow,
    pub project_id: Option<String>,
}

impl PeriodQuery {
    pub fn from_filters(filters: &StatsFilters) -> StatsResult<Self> {
        Ok(Self {
            user_id: filters.user_id.clone(),
            window: StatsWindow::from_dates(filters.start_date, filters.end_date)?,
            project_id: filters.project_id.clone(),
        })
    }

    /// The same query shifted to the preceding window of equal length.
    pub fn previous(&self) -> Self {
        Self {
            window: self.window.previous(),
            ..self.clone()
        }
    }
}

/// Read interface over live outbound history entries.
///
/// Implementations only count; all rate and comparison arithmetic lives in
/// [`crate::service::StatsService`].
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Sent/replied counts grouped by message type. Types with no matching
    /// entries may be omitted.
    async fn type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<TypeCounts>>;

    /// Sent/replied counts grouped by local calendar date and message type,
    /// ordered by date ascending.
    async fn daily_type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<DailyTypeCounts>>;

    /// Entry counts per non-null external thread id, largest first.
    async fn project_counts(&self, user_id: &str, limit: u32) -> StatsResult<Vec<ProjectCount>>;
}
