//! Error types for the registry.

use pinshare_core::{ChainError, Identity, InvalidInput};
use pinshare_ledger::LedgerError;
use pinshare_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed caller input, rejected before any state mutation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The requester lacks a grant for the target.
    ///
    /// Deliberately carries no detail: a denial must not reveal whether
    /// the target exists, has content, or has granted anyone else. An
    /// unknown target and a known-but-denied target are indistinguishable.
    #[error("not authorized")]
    Unauthorized,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// An actor's audit chain failed verification.
    #[error("audit chain corrupt for {actor}: {source}")]
    AuditCorrupt {
        actor: Identity,
        #[source]
        source: ChainError,
    },
}

impl From<LedgerError> for RegistryError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidGrant(input) => RegistryError::InvalidInput(input),
        }
    }
}

impl RegistryError {
    /// True if this is an authorization denial.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RegistryError::Unauthorized)
    }

    /// True if this is a rejected-input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RegistryError::InvalidInput(_))
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
