//! # Pinshare Core
//!
//! Pure primitives for the pinshare registry: identities, content
//! references, and hash-chained audit records.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over registry data.
//!
//! ## Key Types
//!
//! - [`Identity`] - An opaque actor identifier (owner or viewer)
//! - [`ContentRef`] - An immutable locator for externally stored content
//! - [`AuditRecord`] - One link in an actor's tamper-evident audit chain
//! - [`AuditHash`] - Content-addressed record identifier (Blake3 hash)
//!
//! ## Canonicalization
//!
//! Audit records are hashed over a deterministic CBOR encoding. See the
//! [`canonical`] module.

pub mod audit;
pub mod canonical;
pub mod error;
pub mod types;

pub use audit::{verify_chain, AuditEvent, AuditHash, AuditRecord, AUDIT_DOMAIN};
pub use canonical::canonical_record_bytes;
pub use error::{ChainError, InvalidInput};
pub use types::{ContentRef, Identity};
