//! Player skin textures, decoded from the `textures` profile property.
//!
//! The property value is a base64 JSON payload naming the skin URL and
//! optionally a cape URL and skin model. The signature (when present)
//! covers the still-encoded property value, so [`PlayerTextures`] keeps
//! the original value alongside the decoded fields and can be turned back
//! into the exact [`Property`] it came from.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::Profile;
use crate::property::Property;

/// Name of the textures profile property.
pub const TEXTURES_PROPERTY: &str = "textures";

/// The model of a player's skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinModel {
    /// Classic skin model.
    Classic,
    /// Slim-arm skin model.
    Slim,
}

impl SkinModel {
    /// Look up a model by its payload name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "slim" => Some(Self::Slim),
            _ => None,
        }
    }
}

/// A player's skin textures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTextures {
    /// The original (still base64) property value the authority signed.
    value: String,
    /// Raw signature bytes, if the property was attested.
    signature: Option<Vec<u8>>,
    /// URL of the skin texture.
    skin_url: String,
    /// URL of the cape texture, if any.
    cape_url: Option<String>,
    /// Skin model, when the payload declares a known one.
    model: Option<SkinModel>,
}

impl PlayerTextures {
    /// Decode the textures of a profile, if it carries any.
    pub fn from_profile(profile: &Profile) -> Result<Option<Self>, ProfileError> {
        match profile.property(TEXTURES_PROPERTY) {
            Some(property) => Self::from_property(property).map(Some),
            None => Ok(None),
        }
    }

    /// Decode a `textures` property.
    pub fn from_property(property: &Property) -> Result<Self, ProfileError> {
        if property.name() != TEXTURES_PROPERTY {
            return Err(ProfileError::NotTexturesProperty(
                property.name().to_string(),
            ));
        }

        let decoded =
            BASE64
                .decode(property.value())
                .map_err(|source| ProfileError::InvalidBase64 {
                    context: "textures payload",
                    source,
                })?;
        let payload: TexturesPayload = serde_json::from_slice(&decoded)
            .map_err(|e| ProfileError::MalformedTextures(e.to_string()))?;

        let skin = payload
            .textures
            .skin
            .ok_or_else(|| ProfileError::MalformedTextures("missing SKIN entry".into()))?;

        // Unknown model names are tolerated: the authority may add models
        // before we learn about them.
        let model = skin
            .metadata
            .and_then(|m| m.model)
            .and_then(|name| SkinModel::by_name(&name));

        Ok(Self {
            value: property.value().to_string(),
            signature: property.signature().map(<[u8]>::to_vec),
            skin_url: skin.url,
            cape_url: payload.textures.cape.map(|c| c.url),
            model,
        })
    }

    /// Build unsigned textures pointing at a skin URL.
    pub fn from_skin_url(skin_url: &str) -> Result<Self, ProfileError> {
        let payload = TexturesPayload {
            signature_required: Some(false),
            textures: TexturesMap {
                skin: Some(TextureEntry {
                    url: skin_url.to_string(),
                    metadata: None,
                }),
                cape: None,
            },
        };
        let json = serde_json::to_vec(&payload)
            .map_err(|e| ProfileError::MalformedTextures(e.to_string()))?;

        Ok(Self {
            value: BASE64.encode(json),
            signature: None,
            skin_url: skin_url.to_string(),
            cape_url: None,
            model: None,
        })
    }

    /// The original property value (base64 JSON).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// URL of the skin texture.
    pub fn skin_url(&self) -> &str {
        &self.skin_url
    }

    /// URL of the cape texture, if any.
    pub fn cape_url(&self) -> Option<&str> {
        self.cape_url.as_deref()
    }

    /// The declared skin model, if known.
    pub fn model(&self) -> Option<SkinModel> {
        self.model
    }

    /// Whether the underlying property was attested.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Rebuild the profile property these textures came from.
    pub fn as_property(&self) -> Property {
        match &self.signature {
            Some(signature) => {
                Property::signed(TEXTURES_PROPERTY, self.value.clone(), signature.clone())
                    .expect("textures property name is non-empty")
            }
            None => Property::unsigned(TEXTURES_PROPERTY, self.value.clone())
                .expect("textures property name is non-empty"),
        }
    }
}

impl Profile {
    /// Construct a profile carrying the given textures as its only
    /// property.
    pub fn with_textures(
        id: uuid::Uuid,
        name: impl Into<String>,
        textures: &PlayerTextures,
    ) -> Self {
        Profile::new(id, name, vec![textures.as_property()])
    }
}

#[derive(Serialize, Deserialize)]
struct TexturesPayload {
    #[serde(
        rename = "signatureRequired",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    signature_required: Option<bool>,
    textures: TexturesMap,
}

#[derive(Serialize, Deserialize)]
struct TexturesMap {
    #[serde(rename = "SKIN", default, skip_serializing_if = "Option::is_none")]
    skin: Option<TextureEntry>,
    #[serde(rename = "CAPE", default, skip_serializing_if = "Option::is_none")]
    cape: Option<TextureEntry>,
}

#[derive(Serialize, Deserialize)]
struct TextureEntry {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<TextureMetadata>,
}

#[derive(Serialize, Deserialize)]
struct TextureMetadata {
    #[serde(default)]
    model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn encode_payload(json: &str) -> String {
        BASE64.encode(json)
    }

    #[test]
    fn test_decode_full_payload() {
        let value = encode_payload(
            r#"{
                "textures": {
                    "SKIN": {
                        "url": "http://textures.example/skin/abc",
                        "metadata": { "model": "slim" }
                    },
                    "CAPE": { "url": "http://textures.example/cape/def" }
                }
            }"#,
        );
        let property = Property::unsigned(TEXTURES_PROPERTY, value).unwrap();
        let textures = PlayerTextures::from_property(&property).unwrap();

        assert_eq!(textures.skin_url(), "http://textures.example/skin/abc");
        assert_eq!(textures.cape_url(), Some("http://textures.example/cape/def"));
        assert_eq!(textures.model(), Some(SkinModel::Slim));
        assert!(!textures.is_signed());
    }

    #[test]
    fn test_decode_minimal_payload() {
        let value = encode_payload(
            r#"{"textures": {"SKIN": {"url": "http://textures.example/skin/abc"}}}"#,
        );
        let property = Property::unsigned(TEXTURES_PROPERTY, value).unwrap();
        let textures = PlayerTextures::from_property(&property).unwrap();

        assert!(textures.cape_url().is_none());
        assert!(textures.model().is_none());
    }

    #[test]
    fn test_unknown_model_tolerated() {
        let value = encode_payload(
            r#"{"textures": {"SKIN": {"url": "u", "metadata": {"model": "hexagonal"}}}}"#,
        );
        let property = Property::unsigned(TEXTURES_PROPERTY, value).unwrap();
        let textures = PlayerTextures::from_property(&property).unwrap();
        assert!(textures.model().is_none());
    }

    #[test]
    fn test_missing_skin_rejected() {
        let value = encode_payload(r#"{"textures": {}}"#);
        let property = Property::unsigned(TEXTURES_PROPERTY, value).unwrap();
        assert!(matches!(
            PlayerTextures::from_property(&property),
            Err(ProfileError::MalformedTextures(_))
        ));
    }

    #[test]
    fn test_wrong_property_name_rejected() {
        let property = Property::unsigned("cape", "whatever").unwrap();
        assert!(matches!(
            PlayerTextures::from_property(&property),
            Err(ProfileError::NotTexturesProperty(_))
        ));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let property = Property::unsigned(TEXTURES_PROPERTY, "!!not base64!!").unwrap();
        assert!(matches!(
            PlayerTextures::from_property(&property),
            Err(ProfileError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_skin_url_roundtrip() {
        let textures = PlayerTextures::from_skin_url("http://textures.example/skin/xyz").unwrap();
        let property = textures.as_property();
        let decoded = PlayerTextures::from_property(&property).unwrap();

        assert_eq!(decoded.skin_url(), "http://textures.example/skin/xyz");
        assert!(!decoded.is_signed());
    }

    #[test]
    fn test_as_property_preserves_signed_value() {
        let value = encode_payload(r#"{"textures": {"SKIN": {"url": "u"}}}"#);
        let property =
            Property::signed(TEXTURES_PROPERTY, value.clone(), vec![0xab; 64]).unwrap();
        let textures = PlayerTextures::from_property(&property).unwrap();

        // Signature covers the encoded value; both must survive untouched.
        assert_eq!(textures.as_property(), property);
    }

    #[test]
    fn test_profile_from_textures() {
        let textures = PlayerTextures::from_skin_url("http://textures.example/skin/xyz").unwrap();
        let profile =
            Profile::with_textures(Uuid::from_bytes([0x01; 16]), "steve", &textures);

        assert_eq!(profile.properties().len(), 1);
        let decoded = PlayerTextures::from_profile(&profile).unwrap().unwrap();
        assert_eq!(decoded.skin_url(), textures.skin_url());
    }

    #[test]
    fn test_profile_without_textures() {
        let profile = Profile::bare(Uuid::from_bytes([0x02; 16]), "steve");
        assert!(PlayerTextures::from_profile(&profile).unwrap().is_none());
    }

    #[test]
    fn test_skin_model_by_name() {
        assert_eq!(SkinModel::by_name("SLIM"), Some(SkinModel::Slim));
        assert_eq!(SkinModel::by_name("classic"), Some(SkinModel::Classic));
        assert_eq!(SkinModel::by_name("other"), None);
    }
}
