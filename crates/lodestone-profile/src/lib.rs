//! # Lodestone Profile
//!
//! Signed identity records for the server: a [`Profile`] names a principal
//! (UUID + display name) and carries zero or more [`Property`] values, some
//! of which are attested by the trusted authority's signature.
//!
//! This crate is pure computation: no I/O, no caching, no networking.
//! Fetching profiles from an authority and caching them belongs to
//! `lodestone-registry`.
//!
//! ## Key Types
//!
//! - [`Profile`] - Immutable identity record with lazily verified properties
//! - [`Property`] - A named value, optionally carrying an authority signature
//! - [`AuthorityKey`] - The authority's public key, used for verification
//! - [`VerificationResult`] - Trust state of a single property
//!
//! ## Canonicalization
//!
//! Signatures cover an exact byte sequence agreed with the authority.
//! See the [`canonical`] module; get this wrong and every signature
//! verifies as `Invalid`.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod json;
pub mod profile;
pub mod property;
pub mod textures;

pub use canonical::signed_property_message;
pub use crypto::{AuthorityKey, AuthorityKeypair};
pub use error::{CryptoError, ProfileError};
pub use profile::{Profile, VerificationResult};
pub use property::Property;
pub use textures::{PlayerTextures, SkinModel, TEXTURES_PROPERTY};
