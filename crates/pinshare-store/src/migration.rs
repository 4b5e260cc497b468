//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL
//! string that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Get current version
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Apply migrations
    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Content references: append-only per owner, position preserves order
        CREATE TABLE content_refs (
            owner TEXT NOT NULL,              -- opaque identity string
            position INTEGER NOT NULL,        -- 1-based within the owner's sequence
            content TEXT NOT NULL,            -- locator string, stored verbatim
            added_at INTEGER NOT NULL,        -- Unix ms at append
            PRIMARY KEY (owner, position)
        );

        -- Audit chain: one hash-linked trail per actor
        CREATE TABLE audit_log (
            actor TEXT NOT NULL,
            seq INTEGER NOT NULL,             -- 1-based within the actor's chain
            timestamp INTEGER NOT NULL,       -- Unix ms claimed by the record
            event_code INTEGER NOT NULL,      -- AuditEvent code as u16
            subject TEXT NOT NULL,            -- content ref or grantee the event names
            prev_hash BLOB,                   -- 32 bytes, NULL for seq=1
            record_hash BLOB NOT NULL,        -- 32 bytes, Blake3 over canonical encoding
            PRIMARY KEY (actor, seq)
        );
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
