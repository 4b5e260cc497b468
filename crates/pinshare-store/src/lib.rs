//! # Pinshare Store
//!
//! Storage abstraction for the pinshare registry. Provides a trait-based
//! interface for content persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts content storage behind the [`ContentStore`]
//! trait, allowing the registry to be storage-agnostic. The primary
//! implementation is [`SqliteStore`], with [`MemoryStore`] for tests and
//! embedded use.
//!
//! ## Key Types
//!
//! - [`ContentStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pinshare_store::{ContentStore, SqliteStore};
//! use pinshare_core::{ContentRef, Identity};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     let owner = Identity::new("0xowner").unwrap();
//!     let content = ContentRef::new("QmYwAPJzv5CZsnA").unwrap();
//!     let position = store.append(&owner, &content).await.unwrap();
//!     assert_eq!(position, 1);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Append-only**: content references are never mutated or deleted
//! - **No authorization**: the registry layer above gates every read
//! - **Per-owner independence**: one owner's appends never block another's
//! - **Audit trail**: each actor's hash-linked records are stored alongside
//!   its content

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::ContentStore;
