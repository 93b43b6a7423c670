// crates/db/src/source.rs
use async_trait::async_trait;
use outreach_stats_core::{
    DailyTypeCounts, PeriodQuery, ProjectCount, StatsResult, StatsSource, TypeCounts,
};

use crate::Database;

#[async_trait]
impl StatsSource for Database {
    async fn type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<TypeCounts>> {
        Ok(self.history_type_counts(query).await?)
    }

    async fn daily_type_counts(&self, query: &PeriodQuery) -> StatsResult<Vec<DailyTypeCounts>> {
        Ok(self.history_daily_type_counts(query).await?)
    }

    async fn project_counts(&self, user_id: &str, limit: u32) -> StatsResult<Vec<ProjectCount>> {
        Ok(self.history_project_counts(user_id, limit).await?)
    }
}
