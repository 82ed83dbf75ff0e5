//! Golden vectors for the canonical signature message.
//!
//! The byte sequence the authority signs is an external contract: a
//! mismatch silently turns every signature into `Invalid`, which looks
//! identical to tampering. These vectors pin the exact bytes so a
//! canonicalization regression fails loudly instead.

use lodestone_profile::{signed_property_message, AuthorityKeypair, Profile, Property, VerificationResult};
use uuid::Uuid;

/// A pinned canonicalization vector.
#[derive(Debug, Clone)]
pub struct CanonicalVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Owner UUID, in dashed form.
    pub owner: &'static str,
    /// Raw property value.
    pub value: &'static str,
    /// Expected canonical message, hex-encoded.
    pub expected_message_hex: &'static str,
}

/// Get all canonicalization vectors.
pub fn all_vectors() -> Vec<CanonicalVector> {
    vec![
        CanonicalVector {
            name: "base64 payload",
            owner: "069a79f4-44e9-4726-a5be-fca90e38aaf5",
            value: "cGF5bG9hZA==",
            expected_message_hex:
                "303639613739663434346539343732366135626566636139306533386161663563474635624739685a413d3d",
        },
        CanonicalVector {
            name: "empty value is just the uuid hex",
            owner: "deadbeef-0000-4000-8000-00000000abcd",
            value: "",
            expected_message_hex:
                "6465616462656566303030303430303038303030303030303030303061626364",
        },
        CanonicalVector {
            name: "offline-mode owner",
            owner: "b50ad385-829d-3141-a216-7e7d7539ba7f",
            value: "dG9rZW4=",
            expected_message_hex:
                "6235306164333835383239643331343161323136376537643735333962613766644739725a57343d",
        },
    ]
}

/// Check every vector, returning (name, matched, actual_hex) triples.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let owner = Uuid::parse_str(v.owner).expect("vector owner is a valid uuid");
            let actual = hex::encode(signed_property_message(owner, v.value));
            let matches = actual == v.expected_message_hex;
            (v.name.to_string(), matches, actual)
        })
        .collect()
}
