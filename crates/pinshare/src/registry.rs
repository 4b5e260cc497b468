//! The Registry: unified API for the pinshare system.
//!
//! The Registry brings together the content store and the access ledger
//! into a cohesive interface, and is the single source of truth for "can
//! requester R see owner O's content?". Every read that crosses an
//! identity boundary passes the authorization gate before it touches
//! storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use pinshare_core::{verify_chain, AuditEvent, AuditRecord, ContentRef, Identity};
use pinshare_ledger::AccessLedger;
use pinshare_store::ContentStore;

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whether to append an audit record for every mutation.
    pub record_audit: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { record_audit: true }
    }
}

/// The main Registry struct.
///
/// Provides a unified API for:
/// - Appending content references per owner
/// - Listing an owner's content, gated by authorization
/// - Granting and revoking viewer access
/// - Reading and verifying the tamper-evident audit trail
///
/// Inputs arrive as [`Identity`] and [`ContentRef`] values, whose
/// constructors already rejected malformed strings; the registry trusts
/// the identities it is handed (authentication is the calling layer's
/// responsibility).
pub struct Registry<S: ContentStore> {
    /// The storage backend.
    store: Arc<S>,
    /// The grant relation.
    ledger: AccessLedger,
    /// Configuration.
    config: RegistryConfig,
    /// Per-identity mutation locks. Mutations for one identity serialize
    /// (append order and audit chaining stay race-free); mutations for
    /// different identities never contend.
    mutation_locks: RwLock<HashMap<Identity, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: ContentStore> Registry<S> {
    /// Create a new registry instance.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            ledger: AccessLedger::new(),
            config,
            mutation_locks: RwLock::new(HashMap::new()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The mutation lock for one identity, created on first use.
    fn mutation_lock(&self, actor: &Identity) -> Arc<tokio::sync::Mutex<()>> {
        if let Some(lock) = self.mutation_locks.read().unwrap().get(actor) {
            return Arc::clone(lock);
        }
        let mut locks = self.mutation_locks.write().unwrap();
        Arc::clone(locks.entry(actor.clone()).or_default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a content reference to the owner's list.
    ///
    /// No authorization: an identity may always add its own content. The
    /// owner's record is created on first append. Returns the 1-based
    /// position of the new reference.
    pub async fn add_content(&self, owner: &Identity, content: &ContentRef) -> Result<u64> {
        let lock = self.mutation_lock(owner);
        let _guard = lock.lock().await;

        let position = self.store.append(owner, content).await?;
        tracing::info!(owner = %owner, position, "content reference appended");

        self.record(
            owner,
            AuditEvent::ContentAdded {
                content: content.clone(),
            },
        )
        .await?;

        Ok(position)
    }

    /// List the target's content references, in insertion order.
    ///
    /// The authorization gate runs first: unless the requester is the
    /// target itself or holds a grant from it, the call fails with
    /// [`RegistryError::Unauthorized`] and performs no read. The denial is
    /// identical whether the target is unknown or merely private.
    pub async fn list_content(
        &self,
        requester: &Identity,
        target: &Identity,
    ) -> Result<Vec<ContentRef>> {
        if !self.ledger.is_authorized(target, requester) {
            tracing::warn!(requester = %requester, target = %target, "content list denied");
            return Err(RegistryError::Unauthorized);
        }

        tracing::debug!(requester = %requester, target = %target, "content list served");
        Ok(self.store.list(target).await?)
    }

    /// Number of references the owner itself has appended.
    ///
    /// Same gate as [`Registry::list_content`].
    pub async fn content_count(&self, requester: &Identity, target: &Identity) -> Result<u64> {
        if !self.ledger.is_authorized(target, requester) {
            return Err(RegistryError::Unauthorized);
        }
        Ok(self.store.count(target).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Authorize `grantee` to read `grantor`'s content list.
    ///
    /// Idempotent: re-granting is a no-op success and leaves no duplicate
    /// audit record. A self-grant is rejected with
    /// [`RegistryError::InvalidInput`] before any state changes.
    pub async fn grant(&self, grantor: &Identity, grantee: &Identity) -> Result<()> {
        let lock = self.mutation_lock(grantor);
        let _guard = lock.lock().await;

        let inserted = self.ledger.grant(grantor, grantee)?;
        if inserted {
            tracing::info!(grantor = %grantor, grantee = %grantee, "access granted");
            self.record(
                grantor,
                AuditEvent::AccessGranted {
                    grantee: grantee.clone(),
                },
            )
            .await?;
        }

        Ok(())
    }

    /// Remove `grantee` from `grantor`'s grant set; no-op if absent.
    ///
    /// Takes effect for every query issued after this call returns;
    /// in-flight reads may complete under the old authorization.
    pub async fn revoke(&self, grantor: &Identity, grantee: &Identity) -> Result<()> {
        let lock = self.mutation_lock(grantor);
        let _guard = lock.lock().await;

        let removed = self.ledger.revoke(grantor, grantee)?;
        if removed {
            tracing::info!(grantor = %grantor, grantee = %grantee, "access revoked");
            self.record(
                grantor,
                AuditEvent::AccessRevoked {
                    grantee: grantee.clone(),
                },
            )
            .await?;
        }

        Ok(())
    }

    /// Can `requester` read `grantor`'s content list right now?
    pub fn is_authorized(&self, grantor: &Identity, requester: &Identity) -> bool {
        self.ledger.is_authorized(grantor, requester)
    }

    /// The grantor's current grant set, in sorted order.
    ///
    /// A grantor may always see its own list; anyone else is denied.
    pub async fn list_grantees(
        &self,
        requester: &Identity,
        grantor: &Identity,
    ) -> Result<Vec<Identity>> {
        if requester != grantor {
            tracing::warn!(requester = %requester, "grant list denied");
            return Err(RegistryError::Unauthorized);
        }
        Ok(self.ledger.grantees(grantor))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Audit Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The actor's audit chain, in seq order.
    ///
    /// Self-only, like the grant list: the trail names every grantee the
    /// actor ever touched.
    pub async fn audit_log(
        &self,
        requester: &Identity,
        actor: &Identity,
    ) -> Result<Vec<AuditRecord>> {
        if requester != actor {
            return Err(RegistryError::Unauthorized);
        }
        Ok(self.store.list_audit(actor).await?)
    }

    /// Re-walk the actor's audit chain and verify every link.
    pub async fn verify_audit(&self, requester: &Identity, actor: &Identity) -> Result<()> {
        if requester != actor {
            return Err(RegistryError::Unauthorized);
        }

        let records = self.store.list_audit(actor).await?;
        verify_chain(actor, &records).map_err(|source| RegistryError::AuditCorrupt {
            actor: actor.clone(),
            source,
        })
    }

    /// Append an audit record for a mutation the caller just performed.
    ///
    /// Callers hold the actor's mutation lock, which makes the
    /// head-fetch/append pair race-free.
    async fn record(&self, actor: &Identity, event: AuditEvent) -> Result<()> {
        if !self.config.record_audit {
            return Ok(());
        }

        let head = self.store.audit_head(actor).await?;
        let record = AuditRecord::follow(actor.clone(), event, now_millis(), head);
        self.store.append_audit(&record).await?;
        Ok(())
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
