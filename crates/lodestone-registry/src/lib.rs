//! # Lodestone Registry
//!
//! Process-wide profile cache: maps identity UUIDs to the most recently
//! resolved [`Profile`](lodestone_profile::Profile), collapses concurrent
//! resolutions for one identity into a single fetch, and exposes
//! invalidation.
//!
//! The registry never talks to the network itself; callers supply a
//! [`ProfileFetcher`] capability and own its transport and timeout policy.
//!
//! ## Key Types
//!
//! - [`ProfileRegistry`] - The cache and single-flight coordinator
//! - [`ProfileFetcher`] - Capability producing a profile for a UUID
//! - [`RegistryConfig`] - TTL and negative-caching policy
//! - [`RegistryError`] - Fetch failure as delivered to waiters

pub mod error;
pub mod fetcher;
pub mod registry;

pub use error::RegistryError;
pub use fetcher::ProfileFetcher;
pub use registry::{ProfileRegistry, RegistryConfig};
