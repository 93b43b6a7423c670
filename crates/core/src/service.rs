// crates/core/src/service.rs
//! Statistics orchestration over a [`StatsSource`].

use tracing::debug;

use crate::daily::{complete_counts, group_by_day};
use crate::error::StatsResult;
use crate::rates::{compare_tallies, Tally};
use crate::source::{PeriodQuery, StatsSource, MAX_PROJECTS};
use crate::types::{
    DailyStats, MessageTypeStats, Period, PeriodComparison, Project, StatsFilters, StatsResponse,
    TypeComparison, TypeCounts,
};

/// Computes response-rate statistics from the counts a source provides.
#[derive(Debug, Clone)]
pub struct StatsService<S> {
    source: S,
}

impl<S: StatsSource> StatsService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Counts for all three types in canonical order, zero-filled.
    async fn counts(&self, query: &PeriodQuery) -> StatsResult<[TypeCounts; 3]> {
        let rows = self.source.type_counts(query).await?;
        Ok(complete_counts(rows))
    }

    /// Per-type statistics for one period.
    pub async fn period_stats(&self, query: &PeriodQuery) -> StatsResult<Vec<MessageTypeStats>> {
        let counts = self.counts(query).await?;
        Ok(counts.into_iter().map(MessageTypeStats::from_counts).collect())
    }

    /// Per-day statistics for the dates that had activity, ascending.
    pub async fn daily_stats(&self, query: &PeriodQuery) -> StatsResult<Vec<DailyStats>> {
        let rows = self.source.daily_type_counts(query).await?;
        Ok(group_by_day(rows))
    }

    /// Overall comparison against the preceding period of equal length.
    ///
    /// When `current` is supplied it is used as-is and only the previous
    /// period is queried. `None` means the previous period had no sends.
    pub async fn comparison(
        &self,
        query: &PeriodQuery,
        current: Option<&[MessageTypeStats]>,
    ) -> StatsResult<Option<PeriodComparison>> {
        let previous_query = query.previous();
        let (current, previous) = match current {
            Some(stats) => {
                let current = Tally::total(stats.iter().map(MessageTypeStats::counts));
                (current, Tally::total(self.counts(&previous_query).await?))
            }
            None => {
                let (current, previous) =
                    tokio::try_join!(self.counts(query), self.counts(&previous_query))?;
                (Tally::total(current), Tally::total(previous))
            }
        };
        Ok(compare_tallies(current, previous))
    }

    /// Full response for the dashboard, optionally compared against the
    /// preceding period.
    pub async fn complete_stats(
        &self,
        filters: &StatsFilters,
        include_comparison: bool,
    ) -> StatsResult<StatsResponse> {
        let query = PeriodQuery::from_filters(filters)?;

        let (current, previous) = if include_comparison {
            let previous_query = query.previous();
            debug!(
                user_id = %query.user_id,
                previous_start = %previous_query.window.start,
                previous_end = %previous_query.window.end,
                "Fetching current and previous period counts"
            );
            let (current, previous) =
                tokio::try_join!(self.counts(&query), self.counts(&previous_query))?;
            (current, Some(previous))
        } else {
            (self.counts(&query).await?, None)
        };

        let mut stats_by_type: Vec<MessageTypeStats> = current
            .into_iter()
            .map(MessageTypeStats::from_counts)
            .collect();

        let comparison = match previous {
            Some(previous) => {
                // Only types with sends in the current period carry a trend.
                for (stat, prev) in stats_by_type.iter_mut().zip(previous) {
                    if stat.total_sent > 0 {
                        stat.comparison =
                            compare_tallies(Tally::from(stat.counts()), Tally::from(prev))
                                .map(TypeComparison::from);
                    }
                }
                compare_tallies(Tally::total(current), Tally::total(previous))
            }
            None => None,
        };

        let total = Tally::total(current);
        Ok(StatsResponse {
            period: Period {
                start_date: filters.start_date,
                end_date: filters.end_date,
            },
            stats_by_type,
            comparison,
            total_messages: total.sent,
            overall_response_rate: total.rate(),
        })
    }

    /// Up to 50 projects for the user, most active first.
    pub async fn available_projects(&self, user_id: &str) -> StatsResult<Vec<Project>> {
        let rows = self.source.project_counts(user_id, MAX_PROJECTS).await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}
