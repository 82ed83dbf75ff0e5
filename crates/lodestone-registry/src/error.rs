//! Error types for profile resolution.

use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by [`ProfileRegistry::resolve`](crate::ProfileRegistry::resolve).
///
/// `Clone` so that one underlying failure can fan out to every caller
/// waiting on the same in-flight resolution.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The fetcher capability failed. Not cached: a subsequent `resolve`
    /// retries from scratch unless negative caching is configured.
    #[error("profile fetch failed: {0}")]
    FetchFailed(Arc<anyhow::Error>),
}

impl RegistryError {
    pub(crate) fn fetch_failed(error: anyhow::Error) -> Self {
        Self::FetchFailed(Arc::new(error))
    }
}
