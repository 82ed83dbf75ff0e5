//! Profile properties: named values with optional authority signatures.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// An immutable (name, value, optional signature) triple.
///
/// The value is an opaque payload, often itself base64 (e.g. the
/// `textures` property carries a base64 JSON document). The signature, if
/// present, is the authority's attestation over the canonical message for
/// this property; its presence claims nothing about validity — see
/// [`Profile::verify_property`](crate::Profile::verify_property).
///
/// Verification does not live here: it needs the owning profile's UUID,
/// which a property alone does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    name: String,
    value: String,
    signature: Option<Vec<u8>>,
}

impl Property {
    /// Create an unsigned property.
    pub fn unsigned(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ProfileError> {
        Self::build(name.into(), value.into(), None)
    }

    /// Create a signed property from raw signature bytes.
    pub fn signed(
        name: impl Into<String>,
        value: impl Into<String>,
        signature: Vec<u8>,
    ) -> Result<Self, ProfileError> {
        Self::build(name.into(), value.into(), Some(signature))
    }

    /// Create a signed property from the authority's base64 wire form.
    pub fn signed_base64(
        name: impl Into<String>,
        value: impl Into<String>,
        signature_base64: &str,
    ) -> Result<Self, ProfileError> {
        let signature = BASE64
            .decode(signature_base64)
            .map_err(|source| ProfileError::InvalidBase64 {
                context: "property signature",
                source,
            })?;
        Self::build(name.into(), value.into(), Some(signature))
    }

    fn build(name: String, value: String, signature: Option<Vec<u8>>) -> Result<Self, ProfileError> {
        if name.is_empty() {
            return Err(ProfileError::EmptyPropertyName);
        }
        Ok(Self {
            name,
            value,
            signature,
        })
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw property value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The raw signature bytes, if the property claims attestation.
    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// The signature in the authority's base64 wire form.
    pub fn signature_base64(&self) -> Option<String> {
        self.signature.as_ref().map(|sig| BASE64.encode(sig))
    }

    /// Whether a signature is present. Says nothing about validity.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}
