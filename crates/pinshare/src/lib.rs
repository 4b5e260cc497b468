//! # Pinshare
//!
//! The unified API for the pinshare registry - access-controlled,
//! audit-chained content lists.
//!
//! ## Overview
//!
//! An owning identity registers content references (locator strings handed
//! back by an external content-addressed store) and selectively grants
//! other identities read access to its full list. Everyone else is locked
//! out. The registry provides:
//!
//! - **Content lists**: Append-only, insertion-ordered, one per owner
//! - **Grants**: A directed owner-to-viewer authorization relation
//! - **The gate**: Every cross-identity read is authorized before any
//!   storage access
//! - **Audit chains**: Every mutation leaves a hash-linked record
//!
//! ## Key Concepts
//!
//! - **Content is never seen**: The registry stores locators, not bytes.
//!   Upload and retrieval happen against an external pinning service.
//! - **Self-access is structural**: An owner always reads its own list; no
//!   grant is stored or needed, and none can be revoked.
//! - **Denials carry nothing**: An unauthorized read looks the same
//!   whether the target exists or not.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pinshare::{Registry, RegistryConfig};
//! use pinshare::core::{ContentRef, Identity};
//! use pinshare::store::SqliteStore;
//!
//! async fn example() {
//!     // Open storage
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     // Create the registry
//!     let registry = Registry::new(store, RegistryConfig::default());
//!
//!     let owner = Identity::new("0xowner").unwrap();
//!     let viewer = Identity::new("0xviewer").unwrap();
//!     let content = ContentRef::new("QmYwAPJzv5CZsnA").unwrap();
//!
//!     // The owner registers content and opens access to one viewer
//!     registry.add_content(&owner, &content).await.unwrap();
//!     registry.grant(&owner, &viewer).await.unwrap();
//!
//!     // The viewer can now enumerate the owner's list
//!     let refs = registry.list_content(&viewer, &owner).await.unwrap();
//!     assert_eq!(refs, vec![content]);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `pinshare::core` - Core primitives (Identity, ContentRef, audit records)
//! - `pinshare::ledger` - The grant relation
//! - `pinshare::store` - Storage abstraction, SQLite and in-memory backends

pub mod error;
pub mod registry;

// Re-export component crates
pub use pinshare_core as core;
pub use pinshare_ledger as ledger;
pub use pinshare_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use registry::{Registry, RegistryConfig};

// Re-export commonly used component types
pub use pinshare_core::{
    AuditEvent, AuditHash, AuditRecord, ChainError, ContentRef, Identity, InvalidInput,
};
pub use pinshare_ledger::AccessLedger;
pub use pinshare_store::{ContentStore, MemoryStore, SqliteStore};
