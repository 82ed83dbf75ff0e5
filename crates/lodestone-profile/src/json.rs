//! The authority's JSON profile document.
//!
//! The session authority answers profile lookups with:
//!
//! ```json
//! {
//!   "id": "069a79f444e94726a5befca90e38aaf5",
//!   "name": "Notch",
//!   "properties": [
//!     { "name": "textures", "value": "<base64>", "signature": "<base64>" }
//!   ]
//! }
//! ```
//!
//! The UUID is dash-less lowercase hex, signatures are base64, and the
//! `signature` field is absent for unsigned properties. Fetchers decode
//! this document; the transport that obtains it is out of scope here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProfileError;
use crate::profile::Profile;
use crate::property::Property;

#[derive(Serialize, Deserialize)]
struct ProfileDocument {
    id: String,
    name: String,
    #[serde(default)]
    properties: Vec<PropertyEntry>,
}

#[derive(Serialize, Deserialize)]
struct PropertyEntry {
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
}

impl Profile {
    /// Parse a profile from the authority's JSON document.
    pub fn from_json(document: &str) -> Result<Self, ProfileError> {
        let doc: ProfileDocument = serde_json::from_str(document)
            .map_err(|e| ProfileError::MalformedDocument(e.to_string()))?;

        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| ProfileError::MalformedDocument(format!("bad id: {e}")))?;

        let mut properties = Vec::with_capacity(doc.properties.len());
        for entry in doc.properties {
            let property = match entry.signature {
                Some(signature) => {
                    Property::signed_base64(entry.name, entry.value, &signature)?
                }
                None => Property::unsigned(entry.name, entry.value)?,
            };
            properties.push(property);
        }

        Ok(Profile::new(id, doc.name, properties))
    }

    /// Render this profile as the authority's JSON document.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        let doc = ProfileDocument {
            id: self.id().simple().to_string(),
            name: self.name().to_string(),
            properties: self
                .properties()
                .iter()
                .map(|p| PropertyEntry {
                    name: p.name().to_string(),
                    value: p.value().to_string(),
                    signature: p.signature_base64(),
                })
                .collect(),
        };
        serde_json::to_string(&doc).map_err(|e| ProfileError::MalformedDocument(e.to_string()))
    }
}
