//! Canonical message construction for property signatures.
//!
//! The authority signs an exact byte sequence, and verification must
//! reproduce it bit-for-bit. The pinned contract is:
//!
//! ```text
//! message = utf8(lowercase dash-less hex of owner UUID) || utf8(property value)
//! ```
//!
//! No separator, no length prefix. A mismatched canonicalization silently
//! degrades every signature to `Invalid`, which is indistinguishable from
//! tampering, so this contract is guarded by golden vectors in
//! `lodestone-testkit`.

use uuid::Uuid;

/// Build the canonical byte sequence the authority signed for a property.
///
/// `owner` is the UUID of the profile carrying the property; `value` is
/// the raw (still base64, if the authority sent base64) property value.
pub fn signed_property_message(owner: Uuid, value: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(32 + value.len());
    let mut uuid_buf = Uuid::encode_buffer();
    message.extend_from_slice(owner.simple().encode_lower(&mut uuid_buf).as_bytes());
    message.extend_from_slice(value.as_bytes());
    message
}
