//! The fetcher capability: how profiles enter the registry.

use async_trait::async_trait;
use lodestone_profile::Profile;
use uuid::Uuid;

/// Capability that produces a profile for an identity UUID.
///
/// Implementations own their transport (HTTP to the session authority, a
/// local store, a fixture) and their own timeout policy: the registry
/// applies no implicit deadline, it only propagates whatever failure the
/// fetcher reports to every waiter of that resolution.
///
/// # Design Notes
///
/// - Fetches for different UUIDs may run concurrently; the registry never
///   serializes them against each other.
/// - A fetcher may be called again for a UUID after TTL expiry,
///   invalidation, or a previous failure.
#[async_trait]
pub trait ProfileFetcher: Send + Sync + 'static {
    /// Fetch the current profile for `id`.
    async fn fetch(&self, id: Uuid) -> Result<Profile, anyhow::Error>;
}

#[async_trait]
impl<F: ProfileFetcher + ?Sized> ProfileFetcher for std::sync::Arc<F> {
    async fn fetch(&self, id: Uuid) -> Result<Profile, anyhow::Error> {
        (**self).fetch(id).await
    }
}
