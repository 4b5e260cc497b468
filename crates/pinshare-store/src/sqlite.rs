//! SQLite implementation of the ContentStore trait.
//!
//! This is the primary storage backend for the pinshare registry. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use pinshare_core::{AuditEvent, AuditHash, AuditRecord, ContentRef, Identity};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::ContentStore;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime. The connection mutex also gives
/// each owner's append sequence its mutual exclusion: position assignment
/// and insert happen in one transaction under the lock.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening registry database");
        let mut conn = Connection::open(&path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Map a poisoned connection mutex to a store error.
fn lock_poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

/// Map a failed spawn_blocking join to a store error.
fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn append(&self, owner: &Identity, content: &ContentRef) -> Result<u64> {
        let owner = owner.clone();
        let content = content.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(lock_poisoned)?;
            let tx = conn.transaction()?;

            // Position assignment and insert are one transaction, so
            // concurrent appends for the same owner cannot collide.
            let last: i64 = tx.query_row(
                "SELECT COALESCE(MAX(position), 0) FROM content_refs WHERE owner = ?1",
                params![owner.as_str()],
                |row| row.get(0),
            )?;
            let position = last + 1;

            tx.execute(
                "INSERT INTO content_refs (owner, position, content, added_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![owner.as_str(), position, content.as_str(), now_millis()],
            )?;

            tx.commit()?;
            Ok(position as u64)
        })
        .await
        .map_err(join_failed)?
    }

    async fn list(&self, owner: &Identity) -> Result<Vec<ContentRef>> {
        let owner = owner.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let mut stmt = conn.prepare(
                "SELECT content FROM content_refs WHERE owner = ?1 ORDER BY position",
            )?;

            let raw: Vec<String> = stmt
                .query_map(params![owner.as_str()], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            raw.into_iter()
                .map(|s| {
                    ContentRef::new(s)
                        .map_err(|e| StoreError::InvalidData(format!("stored content ref: {}", e)))
                })
                .collect()
        })
        .await
        .map_err(join_failed)?
    }

    async fn count(&self, owner: &Identity) -> Result<u64> {
        let owner = owner.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM content_refs WHERE owner = ?1",
                params![owner.as_str()],
                |row| row.get(0),
            )?;

            Ok(count as u64)
        })
        .await
        .map_err(join_failed)?
    }

    async fn append_audit(&self, record: &AuditRecord) -> Result<()> {
        let record = record.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let hash = record.compute_hash();

            conn.execute(
                "INSERT INTO audit_log (
                    actor, seq, timestamp, event_code, subject, prev_hash, record_hash
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.actor.as_str(),
                    record.seq as i64,
                    record.timestamp,
                    record.event.code() as i64,
                    record.event.subject(),
                    record.prev.as_ref().map(|h| h.0.as_slice()),
                    hash.0.as_slice(),
                ],
            )?;

            Ok(())
        })
        .await
        .map_err(join_failed)?
    }

    async fn audit_head(&self, actor: &Identity) -> Result<Option<(u64, AuditHash)>> {
        let actor = actor.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let row: Option<(i64, Vec<u8>)> = conn
                .query_row(
                    "SELECT seq, record_hash FROM audit_log
                     WHERE actor = ?1 ORDER BY seq DESC LIMIT 1",
                    params![actor.as_str()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let Some((seq, hash_bytes)) = row else {
                return Ok(None);
            };

            let hash = AuditHash::try_from(hash_bytes.as_slice())
                .map_err(|_| StoreError::InvalidData("stored audit hash length".into()))?;

            Ok(Some((seq as u64, hash)))
        })
        .await
        .map_err(join_failed)?
    }

    async fn list_audit(&self, actor: &Identity) -> Result<Vec<AuditRecord>> {
        let actor = actor.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let mut stmt = conn.prepare(
                "SELECT seq, timestamp, event_code, subject, prev_hash
                 FROM audit_log WHERE actor = ?1 ORDER BY seq",
            )?;

            let raw: Vec<(i64, i64, i64, String, Option<Vec<u8>>)> = stmt
                .query_map(params![actor.as_str()], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            raw.into_iter()
                .map(|(seq, timestamp, code, subject, prev_bytes)| {
                    let event = AuditEvent::from_parts(code as u16, &subject).ok_or_else(|| {
                        StoreError::InvalidData(format!(
                            "audit event code {} at seq {}",
                            code, seq
                        ))
                    })?;

                    let prev = prev_bytes
                        .map(|b| AuditHash::try_from(b.as_slice()))
                        .transpose()
                        .map_err(|_| StoreError::InvalidData("stored audit hash length".into()))?;

                    Ok(AuditRecord {
                        actor: actor.clone(),
                        seq: seq as u64,
                        timestamp,
                        event,
                        prev,
                    })
                })
                .collect()
        })
        .await
        .map_err(join_failed)?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
