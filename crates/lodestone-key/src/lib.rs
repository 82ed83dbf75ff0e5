//! # Lodestone Key
//!
//! Namespaced identifiers (`namespace:value`) used as keys throughout the
//! server: registry entries, packet identifiers, resource lookups.
//!
//! Keys are validated on construction and interned process-wide, so equal
//! keys share one allocation, clones are cheap, and equality on hot paths
//! is a pointer comparison.
//!
//! ## Key Types
//!
//! - [`Key`] - An interned, immutable `namespace:value` identifier
//! - [`KeyError`] - Rejection reasons for malformed input
//! - [`Keyed`] - Trait for anything addressable by a [`Key`]

pub mod error;
pub mod intern;
pub mod key;

pub use error::KeyError;
pub use key::{Key, Keyed, DEFAULT_NAMESPACE, MAX_LEN};
