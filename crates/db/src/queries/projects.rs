// crates/db/src/queries/projects.rs
// Distinct external threads, used as the dashboard's project list.

use outreach_stats_core::ProjectCount;

use super::outbound_types_sql;
use crate::{Database, DbResult};

impl Database {
    /// Live outbound entry counts per external thread id for a user, largest
    /// first. Entries without a thread id are not part of any project.
    pub async fn history_project_counts(
        &self,
        user_id: &str,
        limit: u32,
    ) -> DbResult<Vec<ProjectCount>> {
        let sql = format!(
            r#"
            SELECT external_thread_id, COUNT(*) AS message_count
            FROM history_entries
            WHERE user_id = ?1
              AND deleted_at IS NULL
              AND external_thread_id IS NOT NULL
              AND entry_type IN ({types})
            GROUP BY external_thread_id
            ORDER BY message_count DESC, external_thread_id ASC
            LIMIT ?2
            "#,
            types = outbound_types_sql()
        );

        let rows: Vec<(String, i64)> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(external_thread_id, message_count)| ProjectCount {
                external_thread_id,
                message_count,
            })
            .collect())
    }
}
