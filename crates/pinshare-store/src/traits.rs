//! ContentStore trait: the abstract interface for content persistence.
//!
//! This trait allows the registry to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use pinshare_core::{AuditHash, AuditRecord, ContentRef, Identity};

use crate::error::Result;

/// The ContentStore trait: async interface for content persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Append-only**: references are never mutated or deleted once stored.
///   Duplicates are allowed; ordering is the invariant.
/// - **No validation, no authorization**: inputs arrive pre-validated and
///   the authorization gate sits in the registry layer above. A store
///   answers `list` for any owner it is asked about.
/// - **Per-owner independence**: appends for different owners must not
///   block each other; appends for one owner must serialize so no append
///   is lost and order is preserved.
/// - **Audit trail**: each actor's audit records live next to its content,
///   in one consistency domain per actor.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Content Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a reference to the owner's sequence, creating the record if
    /// this is the owner's first append.
    ///
    /// Returns the 1-based position of the appended reference.
    async fn append(&self, owner: &Identity, content: &ContentRef) -> Result<u64>;

    /// The owner's references in insertion order.
    ///
    /// Returns an empty sequence (not an error) for an unknown owner.
    async fn list(&self, owner: &Identity) -> Result<Vec<ContentRef>>;

    /// Number of references the owner has appended.
    async fn count(&self, owner: &Identity) -> Result<u64>;

    // ─────────────────────────────────────────────────────────────────────────
    // Audit Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an audit record to its actor's chain.
    ///
    /// The record arrives fully chained (seq and prev already set); the
    /// store only persists it.
    async fn append_audit(&self, record: &AuditRecord) -> Result<()>;

    /// The (seq, hash) of the actor's latest audit record, for chaining
    /// the next one. None for an empty chain.
    async fn audit_head(&self, actor: &Identity) -> Result<Option<(u64, AuditHash)>>;

    /// The actor's audit chain in seq order; empty for an unknown actor.
    async fn list_audit(&self, actor: &Identity) -> Result<Vec<AuditRecord>>;
}
