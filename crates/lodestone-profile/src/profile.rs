//! The immutable profile record and lazy property verification.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

use crate::canonical::signed_property_message;
use crate::crypto::AuthorityKey;
use crate::property::Property;

/// Display name length the authority guarantees (0-16 chars).
///
/// Not enforced at construction: the authority owns the charset and may
/// relax it; profiles deserialized from trusted data are taken as-is.
pub const MAX_NAME_LEN: usize = 16;

/// Trust state of a single property.
///
/// These are results, not errors: "not verified" is an expected, common
/// outcome. Callers must branch on this before treating a property value
/// as authentic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationResult {
    /// No signature present. Never reported as `Valid`.
    Unsigned,
    /// The signature validates against the authority key.
    Valid,
    /// A well-formed signature that fails verification.
    Invalid,
    /// The signature bytes are structurally invalid (wrong length).
    Malformed,
}

/// An identity record: UUID, display name, and an ordered sequence of
/// properties (duplicate names permitted, insertion order preserved).
///
/// Profiles are immutable. Updates go through [`Profile::with_name`] and
/// friends, which return a new instance; concurrently held references
/// never observe a torn read. The UUID is the stable identity — display
/// names are reassigned by the authority over time and must not be used
/// as identity keys (see [`Profile::is_same_identity`]).
///
/// Per-property verification is computed lazily and memoized inside the
/// instance; because the profile is immutable and verification is pure,
/// a memoized answer never changes.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "ProfileData", into = "ProfileData")]
pub struct Profile {
    id: Uuid,
    name: String,
    properties: Arc<[Property]>,
    /// Write-once verification table, index-parallel to `properties`.
    /// Shared across clones of this instance; fresh on every `with_*`.
    verified: Arc<[OnceLock<VerificationResult>]>,
}

impl Profile {
    /// Construct a profile. Pure value construction: no verification is
    /// performed until a caller asks for it.
    pub fn new(id: Uuid, name: impl Into<String>, properties: Vec<Property>) -> Self {
        let verified = properties.iter().map(|_| OnceLock::new()).collect();
        Self {
            id,
            name: name.into(),
            properties: properties.into(),
            verified,
        }
    }

    /// Construct a profile with no properties.
    pub fn bare(id: Uuid, name: impl Into<String>) -> Self {
        Self::new(id, name, Vec::new())
    }

    /// Derive the offline-mode profile for a username.
    ///
    /// The UUID is the name-based (version 3) UUID over the UTF-8 bytes of
    /// `"OfflinePlayer:" || username`, matching what vanilla servers
    /// assign when no authority is consulted.
    pub fn offline(username: &str) -> Self {
        let mut hasher = Md5::new();
        hasher.update(b"OfflinePlayer:");
        hasher.update(username.as_bytes());
        let digest: [u8; 16] = hasher.finalize().into();
        let id = uuid::Builder::from_md5_bytes(digest).into_uuid();
        Self::bare(id, username)
    }

    /// The stable identity UUID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The display name. May change across refreshes of the same identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All properties, in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// First property with the given name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Whether `other` refers to the same identity (UUID comparison only).
    ///
    /// Distinct from `==`, which is structural and used for cache
    /// freshness checks: two profiles for one identity may carry
    /// different names or properties at different points in time.
    pub fn is_same_identity(&self, other: &Profile) -> bool {
        self.id == other.id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────

    /// Verify the property at `index` against the authority key.
    ///
    /// Returns `None` when no property exists at `index`. The result is
    /// memoized per property: repeated calls return the first computed
    /// answer without re-running the signature check. Callers are
    /// expected to use a single authority key per profile.
    ///
    /// Each property verifies independently; a malformed signature on one
    /// never aborts verification of the others.
    pub fn verify_property(
        &self,
        index: usize,
        key: &AuthorityKey,
    ) -> Option<VerificationResult> {
        let property = self.properties.get(index)?;
        let result = self.verified[index].get_or_init(|| {
            let Some(signature) = property.signature() else {
                return VerificationResult::Unsigned;
            };
            let message = signed_property_message(self.id, property.value());
            match key.verify(&message, signature) {
                Ok(true) => VerificationResult::Valid,
                Ok(false) => VerificationResult::Invalid,
                Err(_) => VerificationResult::Malformed,
            }
        });
        Some(*result)
    }

    /// Verify the first property with the given name.
    pub fn verify_property_named(
        &self,
        name: &str,
        key: &AuthorityKey,
    ) -> Option<VerificationResult> {
        let index = self.properties.iter().position(|p| p.name() == name)?;
        self.verify_property(index, key)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Functional updates
    // ─────────────────────────────────────────────────────────────────────

    /// A copy of this profile with a different display name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.id, name, self.properties.to_vec())
    }

    /// A copy of this profile with the given properties replacing the
    /// current ones.
    pub fn with_properties(&self, properties: Vec<Property>) -> Self {
        Self::new(self.id, self.name.clone(), properties)
    }

    /// A copy of this profile with one property appended.
    pub fn add_property(&self, property: Property) -> Self {
        self.add_properties(std::iter::once(property))
    }

    /// A copy of this profile with the given properties appended.
    pub fn add_properties(&self, properties: impl IntoIterator<Item = Property>) -> Self {
        let mut all = self.properties.to_vec();
        all.extend(properties);
        self.with_properties(all)
    }

    /// A copy of this profile without any property of the given name.
    pub fn remove_property(&self, name: &str) -> Self {
        let kept = self
            .properties
            .iter()
            .filter(|p| p.name() != name)
            .cloned()
            .collect();
        self.with_properties(kept)
    }
}

impl PartialEq for Profile {
    /// Structural equality over (id, name, properties); the memo table is
    /// derived state and excluded.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.properties == other.properties
    }
}

impl Eq for Profile {}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Plain wire shape of a profile, for serde.
#[derive(Serialize, Deserialize, Clone)]
struct ProfileData {
    id: Uuid,
    name: String,
    properties: Vec<Property>,
}

impl From<ProfileData> for Profile {
    fn from(data: ProfileData) -> Self {
        Profile::new(data.id, data.name, data.properties)
    }
}

impl From<Profile> for ProfileData {
    fn from(profile: Profile) -> Self {
        ProfileData {
            id: profile.id,
            name: profile.name.clone(),
            properties: profile.properties.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::AuthorityKeypair;

    fn authority() -> AuthorityKeypair {
        AuthorityKeypair::from_seed(&[0x42; 32])
    }

    fn signed_profile(authority: &AuthorityKeypair) -> Profile {
        let id = Uuid::from_bytes([0x11; 16]);
        let value = "ewJ0ZXh0dXJlc0==";
        let signature = authority.sign(&signed_property_message(id, value));
        let property = Property::signed("textures", value, signature).unwrap();
        Profile::new(id, "player_one", vec![property])
    }

    #[test]
    fn test_construction_is_lazy() {
        let profile = signed_profile(&authority());
        assert_eq!(profile.name(), "player_one");
        assert_eq!(profile.properties().len(), 1);
        // No verification happened; the memo table is untouched.
        assert!(profile.verified[0].get().is_none());
    }

    #[test]
    fn test_valid_signature() {
        let authority = authority();
        let profile = signed_profile(&authority);

        assert_eq!(
            profile.verify_property(0, &authority.public_key()),
            Some(VerificationResult::Valid)
        );
    }

    #[test]
    fn test_flipped_signature_byte_is_invalid() {
        let authority = authority();
        let id = Uuid::from_bytes([0x11; 16]);
        let value = "payload";
        let mut signature = authority.sign(&signed_property_message(id, value));
        signature[3] ^= 0x01;

        let profile = Profile::new(
            id,
            "player_one",
            vec![Property::signed("textures", value, signature).unwrap()],
        );
        assert_eq!(
            profile.verify_property(0, &authority.public_key()),
            Some(VerificationResult::Invalid)
        );
    }

    #[test]
    fn test_truncated_signature_is_malformed() {
        let authority = authority();
        let profile = Profile::new(
            Uuid::from_bytes([0x11; 16]),
            "player_one",
            vec![Property::signed("textures", "payload", vec![0xab; 12]).unwrap()],
        );
        assert_eq!(
            profile.verify_property(0, &authority.public_key()),
            Some(VerificationResult::Malformed)
        );
    }

    #[test]
    fn test_unsigned_never_valid() {
        let authority = authority();
        let profile = Profile::new(
            Uuid::from_bytes([0x22; 16]),
            "player_two",
            vec![Property::unsigned("textures", "payload").unwrap()],
        );
        assert_eq!(
            profile.verify_property(0, &authority.public_key()),
            Some(VerificationResult::Unsigned)
        );
    }

    #[test]
    fn test_verification_memoized() {
        let authority = authority();
        let profile = signed_profile(&authority);

        let first = profile.verify_property(0, &authority.public_key());
        let second = profile.verify_property(0, &authority.public_key());
        assert_eq!(first, second);
        assert_eq!(profile.verified[0].get(), Some(&VerificationResult::Valid));
    }

    #[test]
    fn test_properties_verify_independently() {
        let authority = authority();
        let id = Uuid::from_bytes([0x33; 16]);
        let good_sig = authority.sign(&signed_property_message(id, "good"));

        let profile = Profile::new(
            id,
            "player_three",
            vec![
                Property::signed("broken", "x", vec![0u8; 3]).unwrap(),
                Property::signed("textures", "good", good_sig).unwrap(),
                Property::unsigned("cape", "y").unwrap(),
            ],
        );

        let key = authority.public_key();
        assert_eq!(
            profile.verify_property(0, &key),
            Some(VerificationResult::Malformed)
        );
        assert_eq!(
            profile.verify_property(1, &key),
            Some(VerificationResult::Valid)
        );
        assert_eq!(
            profile.verify_property(2, &key),
            Some(VerificationResult::Unsigned)
        );
    }

    #[test]
    fn test_verify_by_name_uses_first_match() {
        let authority = authority();
        let id = Uuid::from_bytes([0x44; 16]);
        let profile = Profile::new(
            id,
            "dup",
            vec![
                Property::unsigned("textures", "first").unwrap(),
                Property::unsigned("textures", "second").unwrap(),
            ],
        );
        assert_eq!(
            profile.verify_property_named("textures", &authority.public_key()),
            Some(VerificationResult::Unsigned)
        );
        assert_eq!(profile.property("textures").unwrap().value(), "first");
    }

    #[test]
    fn test_out_of_range_index() {
        let authority = authority();
        let profile = Profile::bare(Uuid::from_bytes([0x55; 16]), "empty");
        assert_eq!(profile.verify_property(0, &authority.public_key()), None);
        assert_eq!(
            profile.verify_property_named("textures", &authority.public_key()),
            None
        );
    }

    #[test]
    fn test_with_name_does_not_mutate_receiver() {
        let original = Profile::bare(Uuid::from_bytes([0x66; 16]), "before");
        let renamed = original.with_name("after");

        assert_eq!(original.name(), "before");
        assert_eq!(renamed.name(), "after");
        assert!(original.is_same_identity(&renamed));
        assert_ne!(original, renamed);
    }

    #[test]
    fn test_add_property_does_not_mutate_receiver() {
        let original = Profile::bare(Uuid::from_bytes([0x77; 16]), "p");
        let extended = original.add_property(Property::unsigned("cape", "c").unwrap());

        assert!(original.properties().is_empty());
        assert_eq!(extended.properties().len(), 1);
    }

    #[test]
    fn test_remove_property_drops_all_matches() {
        let profile = Profile::new(
            Uuid::from_bytes([0x88; 16]),
            "p",
            vec![
                Property::unsigned("textures", "a").unwrap(),
                Property::unsigned("cape", "b").unwrap(),
                Property::unsigned("textures", "c").unwrap(),
            ],
        );
        let stripped = profile.remove_property("textures");

        assert_eq!(stripped.properties().len(), 1);
        assert_eq!(stripped.properties()[0].name(), "cape");
        assert_eq!(profile.properties().len(), 3);
    }

    #[test]
    fn test_update_resets_memoization() {
        let authority = authority();
        let profile = signed_profile(&authority);
        profile.verify_property(0, &authority.public_key());

        let renamed = profile.with_name("renamed");
        assert!(renamed.verified[0].get().is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let profile = Profile::new(
            Uuid::from_bytes([0x99; 16]),
            "p",
            vec![
                Property::unsigned("b", "1").unwrap(),
                Property::unsigned("a", "2").unwrap(),
                Property::unsigned("b", "3").unwrap(),
            ],
        );
        let names: Vec<_> = profile.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["b", "a", "b"]);
    }

    #[test]
    fn test_offline_uuid_matches_reference() {
        // Reference values produced by UUID.nameUUIDFromBytes on the JVM.
        let notch = Profile::offline("Notch");
        assert_eq!(
            notch.id(),
            Uuid::parse_str("b50ad385-829d-3141-a216-7e7d7539ba7f").unwrap()
        );

        let jeb = Profile::offline("jeb_");
        assert_eq!(
            jeb.id(),
            Uuid::parse_str("a762f560-4fce-3236-812a-b80efff0b62b").unwrap()
        );
        assert_eq!(jeb.name(), "jeb_");
        assert!(jeb.properties().is_empty());
    }

    #[test]
    fn test_structural_vs_identity_equality() {
        let id = Uuid::from_bytes([0xaa; 16]);
        let a = Profile::bare(id, "old_name");
        let b = Profile::bare(id, "new_name");

        assert!(a.is_same_identity(&b));
        assert_ne!(a, b);

        let c = Profile::bare(id, "old_name");
        assert_eq!(a, c);
    }
}
