// crates/db/src/queries/stats.rs
// Grouped sent/replied counts over live outbound entries.

use chrono::NaiveDate;
use outreach_stats_core::{DailyTypeCounts, PeriodQuery, TypeCounts};

use super::{outbound_types_sql, parse_message_type};
use crate::{Database, DbError, DbResult};

impl Database {
    /// Sent/replied counts per message type for one period.
    ///
    /// Only types with at least one matching entry are returned.
    pub async fn history_type_counts(&self, query: &PeriodQuery) -> DbResult<Vec<TypeCounts>> {
        // Bind indices: ?1 = user_id, ?2/?3 = window millis, ?4 = optional project.
        let sql = format!(
            r#"
            SELECT
                entry_type,
                COUNT(*) AS total_sent,
                COUNT(CASE WHEN trigger_has_been_replied_to = 1 THEN 1 END) AS total_replied
            FROM history_entries
            WHERE user_id = ?1
              AND created_at >= ?2
              AND created_at <= ?3
              AND entry_type IN ({types})
              AND deleted_at IS NULL
              AND (?4 IS NULL OR external_thread_id = ?4)
            GROUP BY entry_type
            "#,
            types = outbound_types_sql()
        );

        let rows: Vec<(String, i64, i64)> = sqlx::query_as(&sql)
            .bind(&query.user_id)
            .bind(query.window.start_millis())
            .bind(query.window.end_millis())
            .bind(query.project_id.as_deref())
            .fetch_all(self.pool())
            .await?;

        rows.into_iter()
            .map(|(entry_type, sent, replied)| {
                Ok(TypeCounts {
                    message_type: parse_message_type(&entry_type)?,
                    sent,
                    replied,
                })
            })
            .collect()
    }

    /// Sent/replied counts per local calendar day and message type, ordered
    /// by day ascending. Days without entries are not returned.
    pub async fn history_daily_type_counts(
        &self,
        query: &PeriodQuery,
    ) -> DbResult<Vec<DailyTypeCounts>> {
        let sql = format!(
            r#"
            SELECT
                date(created_at / 1000, 'unixepoch', 'localtime') AS day,
                entry_type,
                COUNT(*) AS total_sent,
                COUNT(CASE WHEN trigger_has_been_replied_to = 1 THEN 1 END) AS total_replied
            FROM history_entries
            WHERE user_id = ?1
              AND created_at >= ?2
              AND created_at <= ?3
              AND entry_type IN ({types})
              AND deleted_at IS NULL
              AND (?4 IS NULL OR external_thread_id = ?4)
            GROUP BY day, entry_type
            ORDER BY day ASC, entry_type ASC
            "#,
            types = outbound_types_sql()
        );

        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(&sql)
            .bind(&query.user_id)
            .bind(query.window.start_millis())
            .bind(query.window.end_millis())
            .bind(query.project_id.as_deref())
            .fetch_all(self.pool())
            .await?;

        rows.into_iter()
            .map(|(day, entry_type, sent, replied)| {
                let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                    .map_err(|e| DbError::InvalidRow(format!("day {day}: {e}")))?;
                Ok(DailyTypeCounts {
                    date,
                    counts: TypeCounts {
                        message_type: parse_message_type(&entry_type)?,
                        sent,
                        replied,
                    },
                })
            })
            .collect()
    }
}
