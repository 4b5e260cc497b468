//! The access ledger: who may read whose content list.
//!
//! Each grantor's set lives behind its own lock, so operations on distinct
//! grantors never contend. Within one grantor, grant and revoke serialize
//! with each other and with authorization checks: once a grant or revoke
//! call returns, every check issued afterwards observes it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use pinshare_core::Identity;

use crate::error::Result;
use crate::grant::{validate_pair, GrantSet};

/// The directed grantor -> grantees relation.
///
/// In-memory and authoritative. Durability lives in the content store's
/// audit trail; the relation itself is process-lived state, rebuilt by the
/// hosting service if it needs to survive restarts.
#[derive(Debug, Default)]
pub struct AccessLedger {
    shards: RwLock<HashMap<Identity, Arc<RwLock<GrantSet>>>>,
}

impl AccessLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for one grantor's set, created on first use.
    fn shard(&self, grantor: &Identity) -> Arc<RwLock<GrantSet>> {
        if let Some(shard) = self.shards.read().unwrap().get(grantor) {
            return Arc::clone(shard);
        }
        let mut shards = self.shards.write().unwrap();
        Arc::clone(shards.entry(grantor.clone()).or_default())
    }

    /// The lock for one grantor's set, or None if it was never touched.
    fn existing_shard(&self, grantor: &Identity) -> Option<Arc<RwLock<GrantSet>>> {
        self.shards.read().unwrap().get(grantor).map(Arc::clone)
    }

    /// Authorize `grantee` to read `grantor`'s content list.
    ///
    /// Idempotent: re-granting an existing grantee is a no-op success.
    /// Returns whether the grant was newly inserted, so callers can skip
    /// duplicate bookkeeping for repeats.
    pub fn grant(&self, grantor: &Identity, grantee: &Identity) -> Result<bool> {
        validate_pair(grantor, grantee)?;

        let shard = self.shard(grantor);
        let inserted = shard.write().unwrap().insert(grantee.clone());
        Ok(inserted)
    }

    /// Remove `grantee` from `grantor`'s set; no-op if absent.
    ///
    /// Returns whether anything was removed.
    pub fn revoke(&self, grantor: &Identity, grantee: &Identity) -> Result<bool> {
        validate_pair(grantor, grantee)?;

        let Some(shard) = self.existing_shard(grantor) else {
            return Ok(false);
        };
        let removed = shard.write().unwrap().remove(grantee);
        Ok(removed)
    }

    /// Can `requester` read `grantor`'s content list?
    ///
    /// True iff requester is the grantor itself or appears in the
    /// grantor's set. Pure read, no side effects.
    pub fn is_authorized(&self, grantor: &Identity, requester: &Identity) -> bool {
        if requester == grantor {
            return true;
        }
        match self.existing_shard(grantor) {
            Some(shard) => shard.read().unwrap().contains(requester),
            None => false,
        }
    }

    /// The grantor's current grant set, in sorted order; empty if none.
    pub fn grantees(&self, grantor: &Identity) -> Vec<Identity> {
        match self.existing_shard(grantor) {
            Some(shard) => shard.read().unwrap().to_vec(),
            None => Vec::new(),
        }
    }
}
