/// Inline SQL migrations for the outreach-stats database schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: reference table of valid history entry types
    r#"
CREATE TABLE IF NOT EXISTS history_entry_types (
    value TEXT PRIMARY KEY NOT NULL
);
"#,
    // Migration 2: seed outbound and inbound types
    r#"
INSERT OR IGNORE INTO history_entry_types (value) VALUES
    ('EMAIL_SENT'),
    ('LINKEDIN_MESSAGE_SENT'),
    ('LINKEDIN_INMAIL_SENT'),
    ('EMAIL_RECEIVED'),
    ('LINKEDIN_MESSAGE_RECEIVED'),
    ('LINKEDIN_INMAIL_RECEIVED');
"#,
    // Migration 3: history entries (timestamps are Unix milliseconds)
    r#"
CREATE TABLE IF NOT EXISTS history_entries (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    entry_type TEXT NOT NULL REFERENCES history_entry_types(value) ON UPDATE CASCADE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER,
    subject TEXT,
    message TEXT,
    external_thread_id TEXT,
    trigger_has_been_replied_to BOOLEAN
);
"#,
    // Migration 4: index for user + time-window filters
    r#"
CREATE INDEX IF NOT EXISTS idx_history_user_created ON history_entries(user_id, created_at);
"#,
    // Migration 5: index for project (thread) filters
    r#"
CREATE INDEX IF NOT EXISTS idx_history_user_thread ON history_entries(user_id, external_thread_id);
"#,
];
