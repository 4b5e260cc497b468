//! Grant sets and grant-pair validation.
//!
//! A grant is directed: granting viewer V access to owner O's content says
//! nothing about O's access to V's content.

use std::collections::BTreeSet;

use pinshare_core::{Identity, InvalidInput};

/// The set of viewers one grantor has authorized.
///
/// Set semantics: inserting an existing grantee is a no-op, and the grantor
/// itself is never stored. Self-access is structural, not a grant, so the
/// set contains no self-entries by construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GrantSet {
    grantees: BTreeSet<Identity>,
}

impl GrantSet {
    /// Create an empty grant set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a grantee. Returns true if it was newly inserted.
    pub fn insert(&mut self, grantee: Identity) -> bool {
        self.grantees.insert(grantee)
    }

    /// Remove a grantee. Returns true if it was present.
    pub fn remove(&mut self, grantee: &Identity) -> bool {
        self.grantees.remove(grantee)
    }

    /// Check membership.
    pub fn contains(&self, grantee: &Identity) -> bool {
        self.grantees.contains(grantee)
    }

    /// Number of grantees.
    pub fn len(&self) -> usize {
        self.grantees.len()
    }

    /// True if no viewer has been granted.
    pub fn is_empty(&self) -> bool {
        self.grantees.is_empty()
    }

    /// The grantees in sorted order.
    pub fn to_vec(&self) -> Vec<Identity> {
        self.grantees.iter().cloned().collect()
    }
}

/// Check a (grantor, grantee) pair before it touches the relation.
///
/// A self-pair is meaningless in both directions: self-access cannot be
/// granted (it always holds) and cannot be revoked.
pub fn validate_pair(grantor: &Identity, grantee: &Identity) -> Result<(), InvalidInput> {
    if grantor == grantee {
        return Err(InvalidInput::SelfGrant);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = GrantSet::new();
        let viewer = identity("0xviewer");

        assert!(set.insert(viewer.clone()));
        assert!(!set.insert(viewer.clone()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&viewer));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = GrantSet::new();
        assert!(!set.remove(&identity("0xviewer")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_to_vec_sorted() {
        let mut set = GrantSet::new();
        set.insert(identity("0xccc"));
        set.insert(identity("0xaaa"));
        set.insert(identity("0xbbb"));

        let grantees = set.to_vec();
        let names: Vec<&str> = grantees.iter().map(|i| i.as_str()).collect();
        assert_eq!(names, vec!["0xaaa", "0xbbb", "0xccc"]);
    }

    #[test]
    fn test_validate_pair_rejects_self() {
        let owner = identity("0xowner");
        assert_eq!(
            validate_pair(&owner, &owner),
            Err(InvalidInput::SelfGrant)
        );
        assert!(validate_pair(&owner, &identity("0xviewer")).is_ok());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_insert_remove_roundtrip(
                names in proptest::collection::btree_set("[a-z0-9]{1,8}", 1..8),
            ) {
                let mut set = GrantSet::new();
                for name in &names {
                    prop_assert!(set.insert(Identity::new(name.clone()).unwrap()));
                }
                prop_assert_eq!(set.len(), names.len());

                for name in &names {
                    prop_assert!(set.remove(&Identity::new(name.clone()).unwrap()));
                }
                prop_assert!(set.is_empty());
            }
        }
    }
}
