//! Hash-chained audit records.
//!
//! Every mutation of the registry appends a record to its actor's audit
//! chain. Each record commits to its predecessor by hash, so a modified or
//! deleted record breaks every later link. Chains are per-actor: an actor's
//! trail is self-contained and verifiable without reading anyone else's.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::canonical_record_bytes;
use crate::error::ChainError;
use crate::types::{ContentRef, Identity};

/// Domain-separation prefix for audit record hashing.
pub const AUDIT_DOMAIN: &[u8] = b"pinshare/audit-record/v0";

/// A 32-byte audit record hash.
///
/// Computed as Blake3(AUDIT_DOMAIN || canonical_record_bytes(record)). Two
/// records with the same content have the same hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditHash(pub [u8; 32]);

impl AuditHash {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for AuditHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuditHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AuditHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for AuditHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AuditHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for AuditHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// What a record witnesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEvent {
    /// The actor appended a content reference to its own list.
    ContentAdded { content: ContentRef },

    /// The actor granted a viewer access to its content list.
    AccessGranted { grantee: Identity },

    /// The actor revoked a previously granted viewer.
    AccessRevoked { grantee: Identity },
}

impl AuditEvent {
    /// Stable numeric code, used by the canonical encoding and by storage.
    ///
    /// Content events occupy 0x00xx, access events 0x01xx.
    pub fn code(&self) -> u16 {
        match self {
            AuditEvent::ContentAdded { .. } => 0x0001,
            AuditEvent::AccessGranted { .. } => 0x0100,
            AuditEvent::AccessRevoked { .. } => 0x0101,
        }
    }

    /// The event's subject: the content reference or grantee it names.
    pub fn subject(&self) -> &str {
        match self {
            AuditEvent::ContentAdded { content } => content.as_str(),
            AuditEvent::AccessGranted { grantee } => grantee.as_str(),
            AuditEvent::AccessRevoked { grantee } => grantee.as_str(),
        }
    }

    /// Rebuild an event from its code and subject.
    ///
    /// Returns None for an unknown code or an empty subject.
    pub fn from_parts(code: u16, subject: &str) -> Option<Self> {
        match code {
            0x0001 => Some(AuditEvent::ContentAdded {
                content: ContentRef::new(subject).ok()?,
            }),
            0x0100 => Some(AuditEvent::AccessGranted {
                grantee: Identity::new(subject).ok()?,
            }),
            0x0101 => Some(AuditEvent::AccessRevoked {
                grantee: Identity::new(subject).ok()?,
            }),
            _ => None,
        }
    }
}

/// A single link in an actor's audit chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The identity whose mutation this record witnesses.
    pub actor: Identity,

    /// 1-based position within the actor's chain.
    pub seq: u64,

    /// When the mutation happened (Unix ms, local clock).
    pub timestamp: i64,

    /// What happened.
    pub event: AuditEvent,

    /// Hash of the previous record in the chain; None for seq 1.
    pub prev: Option<AuditHash>,
}

impl AuditRecord {
    /// Build the record that follows `head` in `actor`'s chain.
    ///
    /// `head` is the (seq, hash) of the chain's current last record, or
    /// None for an empty chain.
    pub fn follow(
        actor: Identity,
        event: AuditEvent,
        timestamp: i64,
        head: Option<(u64, AuditHash)>,
    ) -> Self {
        let (seq, prev) = match head {
            Some((seq, hash)) => (seq + 1, Some(hash)),
            None => (1, None),
        };
        Self {
            actor,
            seq,
            timestamp,
            event,
            prev,
        }
    }

    /// Hash of this record's canonical encoding, with domain separation.
    pub fn compute_hash(&self) -> AuditHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(AUDIT_DOMAIN);
        hasher.update(&canonical_record_bytes(self));
        AuditHash(*hasher.finalize().as_bytes())
    }
}

/// Verify an actor's full chain, in seq order.
///
/// Checks that sequence numbers are contiguous from 1, every record names
/// `actor`, and every `prev` equals the hash of the record before it. An
/// empty chain is valid.
pub fn verify_chain(actor: &Identity, records: &[AuditRecord]) -> Result<(), ChainError> {
    let mut prev: Option<AuditHash> = None;

    for (i, record) in records.iter().enumerate() {
        let expected = i as u64 + 1;
        if record.seq != expected {
            return Err(ChainError::Gap {
                expected,
                got: record.seq,
            });
        }
        if record.actor != *actor {
            return Err(ChainError::ForeignRecord { seq: record.seq });
        }
        if record.prev != prev {
            return Err(ChainError::BrokenLink { seq: record.seq });
        }
        prev = Some(record.compute_hash());
    }

    Ok(())
}
