//! Error types for the registry core.

use thiserror::Error;

/// Malformed caller input.
///
/// Always rejected before any state mutation; the caller can correct the
/// input and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("content reference must not be empty")]
    EmptyContentRef,

    #[error("an identity cannot grant access to itself")]
    SelfGrant,
}

/// A break detected while verifying an audit chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("audit sequence gap: expected {expected}, got {got}")]
    Gap { expected: u64, got: u64 },

    #[error("audit record at seq {seq} does not link to its predecessor")]
    BrokenLink { seq: u64 },

    #[error("audit record at seq {seq} belongs to a different actor")]
    ForeignRecord { seq: u64 },
}
