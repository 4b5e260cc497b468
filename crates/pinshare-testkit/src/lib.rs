//! # Pinshare Testkit
//!
//! Testing utilities for the pinshare registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Helper structs for setting up registry test scenarios
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly set up a registry over in-memory storage:
//!
//! ```rust
//! use pinshare_testkit::fixtures::{multi_party_identities, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let parties = multi_party_identities(3);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pinshare_testkit::generators::distinct_identity_pair;
//!
//! proptest! {
//!     #[test]
//!     fn denial_is_the_default((grantor, grantee) in distinct_identity_pair()) {
//!         let ledger = pinshare_ledger::AccessLedger::new();
//!         prop_assert!(!ledger.is_authorized(&grantor, &grantee));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{gateway_ref, multi_party_identities, random_identity, TestFixture};
pub use generators::{content_ref, content_refs, distinct_identity_pair, identity};
