//! # Pinshare Ledger
//!
//! The directed grant relation between owners and viewers.
//!
//! ## Overview
//!
//! An owner grants a viewer access to its content list; the relation is
//! directed and non-symmetric, and an owner always has access to its own
//! records without a stored grant. Re-granting is idempotent, revoking an
//! absent grantee is a no-op, and a self-grant is rejected outright.
//!
//! ## Concurrency
//!
//! Each grantor's set is an independently lockable unit: operations on
//! different grantors never block each other, while grant/revoke on one
//! grantor serialize with each other and are linearizable with respect to
//! [`AccessLedger::is_authorized`] for that grantor.
//!
//! ## Usage
//!
//! ```rust
//! use pinshare_core::Identity;
//! use pinshare_ledger::AccessLedger;
//!
//! let ledger = AccessLedger::new();
//! let owner = Identity::new("0xowner").unwrap();
//! let viewer = Identity::new("0xviewer").unwrap();
//!
//! assert!(!ledger.is_authorized(&owner, &viewer));
//! ledger.grant(&owner, &viewer).unwrap();
//! assert!(ledger.is_authorized(&owner, &viewer));
//! ```

pub mod error;
pub mod grant;
pub mod ledger;

pub use error::{LedgerError, Result};
pub use grant::{validate_pair, GrantSet};
pub use ledger::AccessLedger;
