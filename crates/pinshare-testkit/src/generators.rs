//! Proptest generators for property-based testing.

use proptest::prelude::*;

use pinshare_core::{ContentRef, Identity};

/// Generate an address-shaped identity.
pub fn identity() -> impl Strategy<Value = Identity> {
    "0x[0-9a-f]{40}".prop_map(|s| Identity::new(s).unwrap())
}

/// Generate a CID-shaped content reference.
pub fn content_ref() -> impl Strategy<Value = ContentRef> {
    "Qm[1-9A-HJ-NP-Za-km-z]{44}".prop_map(|s| ContentRef::new(s).unwrap())
}

/// Generate a (grantor, grantee) pair of distinct identities.
pub fn distinct_identity_pair() -> impl Strategy<Value = (Identity, Identity)> {
    (identity(), identity()).prop_filter("identities must be distinct", |(a, b)| a != b)
}

/// Generate up to `max` content references.
pub fn content_refs(max: usize) -> impl Strategy<Value = Vec<ContentRef>> {
    prop::collection::vec(content_ref(), 0..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinshare_ledger::AccessLedger;

    proptest! {
        #[test]
        fn test_identity_is_nonempty(id in identity()) {
            prop_assert!(!id.as_str().is_empty());
        }

        #[test]
        fn test_content_ref_is_nonempty(r in content_ref()) {
            prop_assert!(!r.as_str().is_empty());
        }

        #[test]
        fn test_pair_is_distinct(pair in distinct_identity_pair()) {
            prop_assert_ne!(pair.0, pair.1);
        }

        #[test]
        fn test_grant_is_idempotent_for_any_pair((grantor, grantee) in distinct_identity_pair()) {
            let ledger = AccessLedger::new();

            prop_assert!(ledger.grant(&grantor, &grantee).unwrap());
            prop_assert!(!ledger.grant(&grantor, &grantee).unwrap());
            prop_assert_eq!(ledger.grantees(&grantor).len(), 1);
        }

        #[test]
        fn test_revoke_restores_denial_for_any_pair((grantor, grantee) in distinct_identity_pair()) {
            let ledger = AccessLedger::new();

            ledger.grant(&grantor, &grantee).unwrap();
            prop_assert!(ledger.is_authorized(&grantor, &grantee));

            ledger.revoke(&grantor, &grantee).unwrap();
            prop_assert!(!ledger.is_authorized(&grantor, &grantee));
        }
    }
}
