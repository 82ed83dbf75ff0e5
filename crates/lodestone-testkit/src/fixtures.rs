//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an authority keypair that can
//! mint attested properties, and a fetcher serving canned profiles.

use std::collections::HashMap;

use async_trait::async_trait;
use lodestone_profile::{
    signed_property_message, AuthorityKey, AuthorityKeypair, Profile, Property,
};
use lodestone_registry::ProfileFetcher;
use uuid::Uuid;

/// A test fixture acting as the trusted authority.
pub struct TestFixture {
    pub authority: AuthorityKeypair,
}

impl TestFixture {
    /// Create a fixture with a random authority keypair.
    pub fn new() -> Self {
        Self {
            authority: AuthorityKeypair::generate(),
        }
    }

    /// Create with a deterministic authority keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            authority: AuthorityKeypair::from_seed(&seed),
        }
    }

    /// The authority's public key.
    pub fn authority_key(&self) -> AuthorityKey {
        self.authority.public_key()
    }

    /// Mint a property attested for the given owner.
    pub fn signed_property(&self, owner: Uuid, name: &str, value: &str) -> Property {
        let signature = self.authority.sign(&signed_property_message(owner, value));
        Property::signed(name, value, signature).expect("fixture property name is non-empty")
    }

    /// Build a profile whose properties are all attested by this
    /// authority.
    pub fn signed_profile(&self, id: Uuid, name: &str, values: &[(&str, &str)]) -> Profile {
        let properties = values
            .iter()
            .map(|(prop_name, value)| self.signed_property(id, prop_name, value))
            .collect();
        Profile::new(id, name, properties)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetcher serving profiles from a fixed map.
///
/// Unknown UUIDs fail, which makes this double as a failure fixture for
/// registry tests.
pub struct StaticFetcher {
    profiles: HashMap<Uuid, Profile>,
}

impl StaticFetcher {
    /// Create a fetcher from the given profiles, keyed by their UUIDs.
    pub fn new(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id(), p)).collect(),
        }
    }
}

#[async_trait]
impl ProfileFetcher for StaticFetcher {
    async fn fetch(&self, id: Uuid) -> Result<Profile, anyhow::Error> {
        self.profiles
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no profile for {id}"))
    }
}
