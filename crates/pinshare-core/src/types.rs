//! Strong type definitions for the registry.
//!
//! Identities and content references are newtypes to prevent misuse at
//! compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidInput;

/// An opaque actor identifier (an account address in the reference client).
///
/// The registry interprets nothing about an identity beyond equality: two
/// identities name the same actor iff their strings are byte-equal. No
/// normalization, checksumming, or parsing happens here.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create a new identity. The empty string is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidInput> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInput::EmptyIdentity);
        }
        Ok(Self(s))
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identity {
    type Error = InvalidInput;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

/// An immutable locator string pointing at externally stored content.
///
/// Typically a content-addressed URL or CID handed back by a pinning
/// service. The registry never dereferences it; it only records which
/// identity appended it and in what order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a new content reference. The empty string is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidInput> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInput::EmptyContentRef);
        }
        Ok(Self(s))
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentRef({})", self.0)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ContentRef {
    type Error = InvalidInput;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rejects_empty() {
        assert_eq!(Identity::new(""), Err(InvalidInput::EmptyIdentity));
    }

    #[test]
    fn test_content_ref_rejects_empty() {
        assert_eq!(ContentRef::new(""), Err(InvalidInput::EmptyContentRef));
    }

    #[test]
    fn test_identity_equality_is_byte_equality() {
        let a = Identity::new("0xAbC").unwrap();
        let b = Identity::new("0xAbC").unwrap();
        let c = Identity::new("0xabc").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c); // no case folding
    }

    #[test]
    fn test_identity_display() {
        let id = Identity::new("0x1234").unwrap();
        assert_eq!(format!("{}", id), "0x1234");
        assert_eq!(format!("{:?}", id), "Identity(0x1234)");
    }

    #[test]
    fn test_content_ref_preserved_verbatim() {
        let raw = "https://gateway.pinata.cloud/ipfs/QmYwAPJzv5CZsnA";
        let r = ContentRef::new(raw).unwrap();
        assert_eq!(r.as_str(), raw);
    }

    #[test]
    fn test_serde_transparent() {
        let id = Identity::new("0x1234").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0x1234\"");

        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
