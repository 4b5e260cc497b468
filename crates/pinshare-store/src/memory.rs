//! In-memory implementation of the ContentStore trait.
//!
//! This is primarily for testing and embedded use. It has the same
//! semantics as SQLite but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use pinshare_core::{AuditHash, AuditRecord, ContentRef, Identity};

use crate::error::Result;
use crate::traits::ContentStore;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Each owner's data sits
/// behind its own lock, so appends for different owners never contend
/// while appends for one owner serialize.
#[derive(Debug, Default)]
pub struct MemoryStore {
    shards: RwLock<HashMap<Identity, Arc<RwLock<OwnerShard>>>>,
}

/// One owner's slice of the store: its content sequence and audit chain.
#[derive(Debug, Default)]
struct OwnerShard {
    refs: Vec<ContentRef>,
    audit: Vec<AuditRecord>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for one owner's shard, created on first use.
    fn shard(&self, owner: &Identity) -> Arc<RwLock<OwnerShard>> {
        if let Some(shard) = self.shards.read().unwrap().get(owner) {
            return Arc::clone(shard);
        }
        let mut shards = self.shards.write().unwrap();
        Arc::clone(shards.entry(owner.clone()).or_default())
    }

    /// The lock for one owner's shard, or None if it was never touched.
    fn existing_shard(&self, owner: &Identity) -> Option<Arc<RwLock<OwnerShard>>> {
        self.shards.read().unwrap().get(owner).map(Arc::clone)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn append(&self, owner: &Identity, content: &ContentRef) -> Result<u64> {
        let shard = self.shard(owner);
        let mut shard = shard.write().unwrap();
        shard.refs.push(content.clone());
        Ok(shard.refs.len() as u64)
    }

    async fn list(&self, owner: &Identity) -> Result<Vec<ContentRef>> {
        match self.existing_shard(owner) {
            Some(shard) => Ok(shard.read().unwrap().refs.clone()),
            None => Ok(Vec::new()),
        }
    }

    async fn count(&self, owner: &Identity) -> Result<u64> {
        match self.existing_shard(owner) {
            Some(shard) => Ok(shard.read().unwrap().refs.len() as u64),
            None => Ok(0),
        }
    }

    async fn append_audit(&self, record: &AuditRecord) -> Result<()> {
        let shard = self.shard(&record.actor);
        shard.write().unwrap().audit.push(record.clone());
        Ok(())
    }

    async fn audit_head(&self, actor: &Identity) -> Result<Option<(u64, AuditHash)>> {
        match self.existing_shard(actor) {
            Some(shard) => Ok(shard
                .read()
                .unwrap()
                .audit
                .last()
                .map(|r| (r.seq, r.compute_hash()))),
            None => Ok(None),
        }
    }

    async fn list_audit(&self, actor: &Identity) -> Result<Vec<AuditRecord>> {
        match self.existing_shard(actor) {
            Some(shard) => Ok(shard.read().unwrap().audit.clone()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinshare_core::{verify_chain, AuditEvent};

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    fn content(s: &str) -> ContentRef {
        ContentRef::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = MemoryStore::new();
        let owner = identity("0xowner");

        assert_eq!(store.append(&owner, &content("cid1")).await.unwrap(), 1);
        assert_eq!(store.append(&owner, &content("cid2")).await.unwrap(), 2);

        let refs = store.list(&owner).await.unwrap();
        assert_eq!(refs, vec![content("cid1"), content("cid2")]);
        assert_eq!(store.count(&owner).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_owner_lists_empty() {
        let store = MemoryStore::new();
        let refs = store.list(&identity("0xnobody")).await.unwrap();
        assert!(refs.is_empty());
        assert_eq!(store.count(&identity("0xnobody")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicates_allowed() {
        let store = MemoryStore::new();
        let owner = identity("0xowner");

        store.append(&owner, &content("cid1")).await.unwrap();
        store.append(&owner, &content("cid1")).await.unwrap();

        assert_eq!(store.count(&owner).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let store = MemoryStore::new();
        let a = identity("0xaaa");
        let b = identity("0xbbb");

        store.append(&a, &content("cid-a")).await.unwrap();
        store.append(&b, &content("cid-b")).await.unwrap();

        assert_eq!(store.list(&a).await.unwrap(), vec![content("cid-a")]);
        assert_eq!(store.list(&b).await.unwrap(), vec![content("cid-b")]);
    }

    #[tokio::test]
    async fn test_audit_chain_roundtrip() {
        let store = MemoryStore::new();
        let actor = identity("0xowner");

        assert_eq!(store.audit_head(&actor).await.unwrap(), None);

        let first = AuditRecord::follow(
            actor.clone(),
            AuditEvent::ContentAdded {
                content: content("cid1"),
            },
            1_700_000_000_000,
            None,
        );
        store.append_audit(&first).await.unwrap();

        let head = store.audit_head(&actor).await.unwrap().unwrap();
        assert_eq!(head, (1, first.compute_hash()));

        let second = AuditRecord::follow(
            actor.clone(),
            AuditEvent::AccessGranted {
                grantee: identity("0xviewer"),
            },
            1_700_000_000_001,
            Some(head),
        );
        store.append_audit(&second).await.unwrap();

        let records = store.list_audit(&actor).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(verify_chain(&actor, &records).is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(MemoryStore::new());
        let owner = identity("0xowner");

        let a = {
            let store = Arc::clone(&store);
            let owner = owner.clone();
            tokio::spawn(async move { store.append(&owner, &content("cid-a")).await })
        };
        let b = {
            let store = Arc::clone(&store);
            let owner = owner.clone();
            tokio::spawn(async move { store.append(&owner, &content("cid-b")).await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let refs = store.list(&owner).await.unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs.iter().filter(|r| r.as_str() == "cid-a").count(), 1);
        assert_eq!(refs.iter().filter(|r| r.as_str() == "cid-b").count(), 1);
    }
}
