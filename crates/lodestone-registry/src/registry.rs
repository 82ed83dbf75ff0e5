//! The profile cache and single-flight resolution coordinator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lodestone_profile::Profile;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::RegistryError;
use crate::fetcher::ProfileFetcher;

/// Configuration for the profile registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How long a resolved profile stays fresh. Stale entries are never
    /// returned; they trigger a new resolution.
    pub ttl: Duration,

    /// How long to remember a failed fetch and answer repeat resolves
    /// with the same failure. `None` (the default) disables negative
    /// caching: every resolve after a failure retries from scratch.
    pub negative_ttl: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            negative_ttl: None,
        }
    }
}

struct CachedProfile {
    profile: Profile,
    fetched_at: Instant,
}

struct NegativeEntry {
    error: RegistryError,
    failed_at: Instant,
}

struct Inner {
    entries: HashMap<Uuid, CachedProfile>,
    negative: HashMap<Uuid, NegativeEntry>,
    /// One broadcast sender per resolution currently in flight. The entry
    /// exists from the moment a leader commits to fetching until the
    /// driver task publishes the outcome.
    in_flight: HashMap<Uuid, broadcast::Sender<Result<Profile, RegistryError>>>,
}

/// In-process cache mapping identity UUID to the most recently resolved
/// profile.
///
/// The defining property is in-flight deduplication: any number of
/// concurrent [`resolve`](Self::resolve) calls for one uncached UUID
/// invoke the fetcher exactly once, and every caller receives the same
/// profile or the same failure. Resolutions for different UUIDs are
/// fully independent.
///
/// `Clone` yields another handle to the same cache.
#[derive(Clone)]
pub struct ProfileRegistry {
    config: RegistryConfig,
    inner: Arc<Mutex<Inner>>,
}

impl ProfileRegistry {
    /// Create a registry with the given configuration.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                negative: HashMap::new(),
                in_flight: HashMap::new(),
            })),
        }
    }

    /// Resolve the profile for `id`.
    ///
    /// Returns a fresh cached entry when one exists. Otherwise joins the
    /// in-flight resolution for `id` if there is one, or becomes the
    /// leader: the fetch runs on a detached task, so a caller dropping
    /// its `resolve` future never strands the other waiters.
    ///
    /// A fetcher failure is delivered to every caller waiting on that
    /// resolution and is not cached (unless
    /// [`negative_ttl`](RegistryConfig::negative_ttl) says otherwise);
    /// the next `resolve` retries from scratch.
    pub async fn resolve<F: ProfileFetcher>(
        &self,
        id: Uuid,
        fetcher: F,
    ) -> Result<Profile, RegistryError> {
        let mut rx = {
            let mut inner = self.inner.lock().expect("profile registry lock poisoned");

            if let Some(entry) = inner.entries.get(&id) {
                if entry.fetched_at.elapsed() <= self.config.ttl {
                    return Ok(entry.profile.clone());
                }
            }

            if let Some(negative_ttl) = self.config.negative_ttl {
                if let Some(entry) = inner.negative.get(&id) {
                    if entry.failed_at.elapsed() <= negative_ttl {
                        return Err(entry.error.clone());
                    }
                }
            }

            if let Some(tx) = inner.in_flight.get(&id) {
                debug!(%id, "joining in-flight profile resolution");
                tx.subscribe()
            } else {
                debug!(%id, "starting profile fetch");
                let (tx, rx) = broadcast::channel(1);
                inner.in_flight.insert(id, tx);

                let registry = self.clone();
                tokio::spawn(async move {
                    registry.drive_fetch(id, fetcher).await;
                });
                rx
            }
        };

        match rx.recv().await {
            Ok(result) => result,
            // The driver always publishes before dropping the sender, so
            // a closed channel means the task itself died.
            Err(_) => Err(RegistryError::fetch_failed(anyhow::anyhow!(
                "profile resolution task terminated before completing"
            ))),
        }
    }

    /// Run the fetch and publish the outcome to all waiters.
    async fn drive_fetch<F: ProfileFetcher>(&self, id: Uuid, fetcher: F) {
        let result = fetcher
            .fetch(id)
            .await
            .map_err(RegistryError::fetch_failed);

        let tx = {
            let mut inner = self.inner.lock().expect("profile registry lock poisoned");

            match &result {
                Ok(profile) => {
                    inner.negative.remove(&id);
                    inner.entries.insert(
                        id,
                        CachedProfile {
                            profile: profile.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                }
                Err(error) => {
                    warn!(%id, %error, "profile fetch failed");
                    if self.config.negative_ttl.is_some() {
                        inner.negative.insert(
                            id,
                            NegativeEntry {
                                error: error.clone(),
                                failed_at: Instant::now(),
                            },
                        );
                    }
                }
            }

            // Remove the in-flight entry under the same lock that updates
            // the cache: a racing resolve either joins this channel or
            // observes the cache state we just committed.
            inner.in_flight.remove(&id)
        };

        if let Some(tx) = tx {
            // No receivers left is fine: every waiter was cancelled.
            let _ = tx.send(result);
        }
    }

    /// Drop the cached entry for `id`, if any.
    ///
    /// Does not cancel an in-flight resolution for `id`: that fetch still
    /// completes and repopulates the cache. An invalidation racing past
    /// that repopulation is a narrow, accepted window; the next `resolve`
    /// simply fetches again.
    pub fn invalidate(&self, id: Uuid) {
        let mut inner = self.inner.lock().expect("profile registry lock poisoned");
        inner.entries.remove(&id);
        inner.negative.remove(&id);
    }

    /// Fresh cached profile for `id`, if any. Never blocks or fetches.
    pub fn peek(&self, id: Uuid) -> Option<Profile> {
        let inner = self.inner.lock().expect("profile registry lock poisoned");
        inner
            .entries
            .get(&id)
            .filter(|entry| entry.fetched_at.elapsed() <= self.config.ttl)
            .map(|entry| entry.profile.clone())
    }

    /// Populate the cache directly, e.g. from a login handshake that
    /// already carried the profile.
    pub fn insert(&self, profile: Profile) {
        let mut inner = self.inner.lock().expect("profile registry lock poisoned");
        let id = profile.id();
        inner.negative.remove(&id);
        inner.entries.insert(
            id,
            CachedProfile {
                profile,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every cached entry. In-flight resolutions are unaffected.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("profile registry lock poisoned");
        inner.entries.clear();
        inner.negative.clear();
    }

    /// Number of cached entries, fresh or stale.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("profile registry lock poisoned");
        inner.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
