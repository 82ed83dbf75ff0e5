//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lodestone_key::Key;
use lodestone_profile::{AuthorityKeypair, Profile, Property};
use uuid::Uuid;

/// Generate a valid key namespace.
pub fn namespace() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,16}".prop_map(String::from)
}

/// Generate a valid key value.
pub fn key_value() -> impl Strategy<Value = String> {
    "[a-z0-9_./-]{1,48}".prop_map(String::from)
}

/// Generate a valid key.
pub fn key() -> impl Strategy<Value = Key> {
    (namespace(), key_value()).prop_map(|(ns, value)| {
        Key::of(&ns, &value).expect("generated components are valid")
    })
}

/// Generate a random authority keypair.
pub fn authority() -> impl Strategy<Value = AuthorityKeypair> {
    any::<[u8; 32]>().prop_map(|seed| AuthorityKeypair::from_seed(&seed))
}

/// Generate a random profile UUID.
pub fn profile_id() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

/// Generate an authority-style display name (1-16 word chars).
pub fn profile_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(String::from)
}

/// Generate a property name.
pub fn property_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,24}".prop_map(String::from)
}

/// Generate an opaque property value (base64-ish charset).
pub fn property_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9+/]{0,64}(==|=)?".prop_map(String::from)
}

/// Generate an unsigned property.
pub fn unsigned_property() -> impl Strategy<Value = Property> {
    (property_name(), property_value()).prop_map(|(name, value)| {
        Property::unsigned(name, value).expect("generated name is non-empty")
    })
}

/// Generate a profile with 0-4 unsigned properties.
pub fn profile() -> impl Strategy<Value = Profile> {
    (
        profile_id(),
        profile_name(),
        prop::collection::vec(unsigned_property(), 0..=4),
    )
        .prop_map(|(id, name, properties)| Profile::new(id, name, properties))
}
