//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use pinshare::{Registry, RegistryConfig};
use pinshare_core::{ContentRef, Identity};
use pinshare_store::MemoryStore;
use rand::{Rng, SeedableRng};

/// A test fixture with a registry over in-memory storage.
pub struct TestFixture {
    pub registry: Registry<MemoryStore>,
}

impl TestFixture {
    /// Create a new fixture with default configuration.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(MemoryStore::new(), RegistryConfig::default()),
        }
    }

    /// Create a fixture with audit recording disabled.
    pub fn without_audit() -> Self {
        Self {
            registry: Registry::new(
                MemoryStore::new(),
                RegistryConfig {
                    record_audit: false,
                },
            ),
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A random address-shaped identity.
pub fn random_identity() -> Identity {
    let bytes: [u8; 20] = rand::thread_rng().gen();
    Identity::new(format!("0x{}", hex::encode(bytes))).unwrap()
}

/// Deterministic address-shaped identities for multi-party tests.
///
/// The same count always yields the same identities, in the same order.
pub fn multi_party_identities(count: usize) -> Vec<Identity> {
    (0..count)
        .map(|i| {
            let mut rng = rand::rngs::StdRng::seed_from_u64(i as u64);
            let bytes: [u8; 20] = rng.gen();
            Identity::new(format!("0x{}", hex::encode(bytes))).unwrap()
        })
        .collect()
}

/// A gateway-style content reference for a test hash.
pub fn gateway_ref(cid: &str) -> ContentRef {
    ContentRef::new(format!("https://gateway.pinata.cloud/ipfs/{}", cid)).unwrap()
}
