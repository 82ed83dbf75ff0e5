//! The interned namespaced identifier type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::KeyError;
use crate::intern;

/// Namespace applied when parsing a bare value with no `:` separator.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Maximum length of the canonical `namespace:value` form, in bytes.
///
/// Matches the string length cap of the surrounding network protocol.
pub const MAX_LEN: usize = 32767;

/// Shared backing storage for an interned key.
///
/// Holds the canonical string once; namespace and value are slices of it.
pub(crate) struct KeyInner {
    /// Canonical `namespace:value` form.
    pub(crate) canonical: Box<str>,
    /// Byte offset of the `:` separator.
    pub(crate) split: usize,
    /// Hash of the canonical string, computed once at intern time.
    pub(crate) hash: u64,
}

/// An immutable, namespace-qualified identifier, e.g. `minecraft:stone`.
///
/// Valid characters for namespaces are `[a-z0-9_.-]`; values additionally
/// allow `/`. Both components must be non-empty.
///
/// Equal keys constructed anywhere in the process resolve to one shared
/// instance (see [`intern`](crate::intern)), so `Clone` is an `Arc` bump
/// and equality is a pointer comparison on the hot path. Hashing replays
/// a value cached at construction.
#[derive(Clone)]
pub struct Key(pub(crate) Arc<KeyInner>);

impl Key {
    /// Parse a key from its string form, splitting on the first `:`.
    ///
    /// A bare value with no separator takes [`DEFAULT_NAMESPACE`]:
    /// `"stone"` parses as `minecraft:stone`.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        Self::parse_with_default(raw, DEFAULT_NAMESPACE)
    }

    /// Parse a key, substituting `default_namespace` when the input has
    /// no `:` separator.
    pub fn parse_with_default(raw: &str, default_namespace: &str) -> Result<Self, KeyError> {
        match raw.split_once(':') {
            Some((namespace, value)) => Self::of(namespace, value),
            None => Self::of(default_namespace, raw),
        }
    }

    /// Construct a key from explicit namespace and value components.
    pub fn of(namespace: &str, value: &str) -> Result<Self, KeyError> {
        // 1. Both components non-empty
        if namespace.is_empty() || value.is_empty() {
            return Err(KeyError::InvalidFormat(format!("{namespace}:{value}")));
        }

        // 2. Length cap on the canonical form
        let len = namespace.len() + 1 + value.len();
        if len > MAX_LEN {
            return Err(KeyError::TooLong { len, max: MAX_LEN });
        }

        // 3. Charset checks
        if !namespace.chars().all(valid_namespace_char)
            || !value.chars().all(valid_value_char)
        {
            return Err(KeyError::InvalidFormat(format!("{namespace}:{value}")));
        }

        Ok(Self(intern::intern(namespace, value)))
    }

    /// Construct a key in the `minecraft` namespace.
    pub fn minecraft(value: &str) -> Result<Self, KeyError> {
        Self::of(DEFAULT_NAMESPACE, value)
    }

    /// The namespace component.
    pub fn namespace(&self) -> &str {
        &self.0.canonical[..self.0.split]
    }

    /// The value component.
    pub fn value(&self) -> &str {
        &self.0.canonical[self.0.split + 1..]
    }

    /// The canonical `namespace:value` form.
    ///
    /// Exact inverse of [`Key::parse`] for any valid key.
    pub fn as_str(&self) -> &str {
        &self.0.canonical
    }
}

/// Whether a character is allowed in a namespace: `[a-z0-9_.-]`.
fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

/// Whether a character is allowed in a value: `[a-z0-9_./-]`.
fn valid_value_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        // Interning makes pointer equality the common case; fall back to
        // the strings so correctness never depends on table internals.
        Arc::ptr_eq(&self.0, &other.0) || self.0.canonical == other.0.canonical
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.canonical.cmp(&other.0.canonical)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.as_str())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::str::FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Key::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Something addressable by a [`Key`].
pub trait Keyed {
    /// The key identifying this object.
    fn key(&self) -> Key;
}
