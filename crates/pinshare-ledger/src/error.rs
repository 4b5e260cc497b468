//! Error types for the access ledger.

use pinshare_core::InvalidInput;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Rejected grant or revoke input (self-grant).
    #[error("invalid grant: {0}")]
    InvalidGrant(#[from] InvalidInput),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
