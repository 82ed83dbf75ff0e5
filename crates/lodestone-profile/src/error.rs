//! Error types for profile data and signature handling.

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signature bytes are structurally invalid (wrong length). Distinct
    /// from a well-formed signature that simply fails to verify.
    #[error("malformed signature: expected {expected} bytes, got {got}")]
    MalformedSignature { expected: usize, got: usize },

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Errors from constructing or decoding profile data.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("property name can not be empty")]
    EmptyPropertyName,

    #[error("invalid base64 in {context}: {source}")]
    InvalidBase64 {
        context: &'static str,
        source: base64::DecodeError,
    },

    #[error("malformed profile document: {0}")]
    MalformedDocument(String),

    #[error("malformed textures payload: {0}")]
    MalformedTextures(String),

    #[error("property {0:?} is not a textures property")]
    NotTexturesProperty(String),
}
