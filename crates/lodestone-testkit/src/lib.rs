//! # Lodestone Testkit
//!
//! Shared testing utilities for the Lodestone crates: authority fixtures
//! that mint signed profiles, proptest generators for keys and profiles,
//! and golden vectors pinning the canonical signature message format.
//!
//! This crate is for tests and tooling only; nothing here belongs in a
//! production dependency graph.

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{StaticFetcher, TestFixture};
pub use vectors::{all_vectors, CanonicalVector};
