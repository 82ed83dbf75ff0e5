//! Cryptographic primitives for property attestation.
//!
//! The trusted authority signs property values with Ed25519; this module
//! wraps the verifying side with strong types. Verification is a pure
//! function of (public key, message, signature bytes) and never touches
//! the network, which is what makes per-property memoization safe.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CryptoError;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// The trusted authority's 32-byte Ed25519 public key.
///
/// Obtained from configuration or a trust store; this crate treats it as
/// an opaque input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorityKey(pub [u8; 32]);

impl AuthorityKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Verify a signature over a message.
    ///
    /// Returns `Ok(true)` when the signature validates, `Ok(false)` when a
    /// structurally well-formed signature fails verification, and
    /// `Err(MalformedSignature)` when the signature bytes have the wrong
    /// length. A failed verification is an expected outcome, not an error.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let sig_bytes: [u8; SIGNATURE_LEN] =
            signature
                .try_into()
                .map_err(|_| CryptoError::MalformedSignature {
                    expected: SIGNATURE_LEN,
                    got: signature.len(),
                })?;

        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_bytes(&sig_bytes);
        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}

impl fmt::Debug for AuthorityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorityKey({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for AuthorityKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AuthorityKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An authority keypair for signing property values.
///
/// Production servers only ever hold [`AuthorityKey`]; the signing side
/// exists for fixtures and tests that need to mint attested properties.
#[derive(Clone)]
pub struct AuthorityKeypair {
    signing_key: SigningKey,
}

impl AuthorityKeypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn public_key(&self) -> AuthorityKey {
        AuthorityKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message, returning the raw signature bytes.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

impl fmt::Debug for AuthorityKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorityKeypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = AuthorityKeypair::generate();
        let message = b"attested payload";
        let signature = keypair.sign(message);

        assert!(keypair.public_key().verify(message, &signature).unwrap());

        // Tampered message fails, but is not an error
        assert!(!keypair
            .public_key()
            .verify(b"attested payloaD", &signature)
            .unwrap());
    }

    #[test]
    fn test_flipped_byte_is_invalid_not_malformed() {
        let keypair = AuthorityKeypair::from_seed(&[0x42; 32]);
        let message = b"payload";
        let mut signature = keypair.sign(message);
        signature[10] ^= 0x01;

        assert!(!keypair.public_key().verify(message, &signature).unwrap());
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let keypair = AuthorityKeypair::generate();
        let result = keypair.public_key().verify(b"payload", &[0u8; 17]);
        assert!(matches!(
            result,
            Err(CryptoError::MalformedSignature { expected: 64, got: 17 })
        ));
    }

    #[test]
    fn test_deterministic_from_seed() {
        let kp1 = AuthorityKeypair::from_seed(&[0x07; 32]);
        let kp2 = AuthorityKeypair::from_seed(&[0x07; 32]);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.sign(b"x"), kp2.sign(b"x"));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = AuthorityKeypair::generate().public_key();
        let recovered = AuthorityKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, recovered);
    }
}
