// crates/db/src/queries/history.rs
// History entry inserts. Entries are written by the outreach pipeline; this
// module exists for fixtures, seeding and tests.

use chrono::{DateTime, Local};
use outreach_stats_core::MessageType;

use crate::{Database, DbResult};

/// A history entry to insert.
///
/// `entry_type` is a raw string so inbound types (`EMAIL_RECEIVED`, ...) can
/// be written as well; stats queries ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub user_id: String,
    pub entry_type: String,
    pub created_at: DateTime<Local>,
    pub deleted_at: Option<DateTime<Local>>,
    pub external_thread_id: Option<String>,
    pub replied: bool,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl NewHistoryEntry {
    /// An unreplied outbound message with no thread.
    pub fn sent(user_id: &str, message_type: MessageType, created_at: DateTime<Local>) -> Self {
        Self::of_type(user_id, message_type.as_str(), created_at)
    }

    pub fn of_type(user_id: &str, entry_type: &str, created_at: DateTime<Local>) -> Self {
        Self {
            user_id: user_id.to_string(),
            entry_type: entry_type.to_string(),
            created_at,
            deleted_at: None,
            external_thread_id: None,
            replied: false,
            subject: None,
            message: None,
        }
    }

    pub fn replied(mut self) -> Self {
        self.replied = true;
        self
    }

    pub fn in_thread(mut self, thread_id: &str) -> Self {
        self.external_thread_id = Some(thread_id.to_string());
        self
    }

    pub fn deleted_at(mut self, at: DateTime<Local>) -> Self {
        self.deleted_at = Some(at);
        self
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }
}

impl Database {
    /// Insert one history entry and return its generated id.
    pub async fn insert_history_entry(&self, entry: &NewHistoryEntry) -> DbResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = entry.created_at.timestamp_millis();

        sqlx::query(
            r#"
            INSERT INTO history_entries (
                id, user_id, entry_type, created_at, updated_at, deleted_at,
                subject, message, external_thread_id, trigger_has_been_replied_to
            ) VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&id)
        .bind(&entry.user_id)
        .bind(&entry.entry_type)
        .bind(created_at)
        .bind(entry.deleted_at.map(|at| at.timestamp_millis()))
        .bind(entry.subject.as_deref())
        .bind(entry.message.as_deref())
        .bind(entry.external_thread_id.as_deref())
        .bind(entry.replied)
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    /// Insert several entries in one transaction.
    pub async fn insert_history_entries(&self, entries: &[NewHistoryEntry]) -> DbResult<usize> {
        let mut tx = self.pool().begin().await?;
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO history_entries (
                    id, user_id, entry_type, created_at, updated_at, deleted_at,
                    subject, message, external_thread_id, trigger_has_been_replied_to
                ) VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&entry.user_id)
            .bind(&entry.entry_type)
            .bind(entry.created_at.timestamp_millis())
            .bind(entry.deleted_at.map(|at| at.timestamp_millis()))
            .bind(entry.subject.as_deref())
            .bind(entry.message.as_deref())
            .bind(entry.external_thread_id.as_deref())
            .bind(entry.replied)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(entries.len())
    }
}
