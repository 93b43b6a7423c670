// crates/db/src/queries/mod.rs
// Read queries over history entries, plus fixture inserts.

pub mod history;
mod projects;
mod stats;

use outreach_stats_core::MessageType;

use crate::DbError;

/// `'EMAIL_SENT', 'LINKEDIN_MESSAGE_SENT', 'LINKEDIN_INMAIL_SENT'` for use in
/// an `IN (...)` clause. Built from enum constants only.
fn outbound_types_sql() -> String {
    MessageType::ALL
        .iter()
        .map(|t| format!("'{}'", t.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_message_type(value: &str) -> Result<MessageType, DbError> {
    value
        .parse()
        .map_err(|_| DbError::InvalidRow(format!("unexpected entry_type {value}")))
}
