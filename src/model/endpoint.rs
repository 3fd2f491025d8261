//! EndPoint identity and the storage key derived from it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque identity of a graph participant (an address, a resource handle, ...).
///
/// Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndPoint(pub String);

impl EndPoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Storage key for the document of this endpoint's node.
    pub fn key(&self) -> StorageKey {
        key_of(self)
    }
}

impl std::fmt::Display for EndPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndPoint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EndPoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Fixed-width document key: lowercase hex SHA-256 of the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    pub const LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map an endpoint to its document key. Pure and total.
pub fn key_of(endpoint: &EndPoint) -> StorageKey {
    let mut hasher = Sha256::new();
    hasher.update(endpoint.as_str().as_bytes());
    StorageKey(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = EndPoint::from("10.0.0.1:8080");
        assert_eq!(key_of(&a), key_of(&a.clone()));
    }

    #[test]
    fn test_key_is_fixed_width_hex() {
        for ep in ["", "A", "a much longer endpoint identifier / with spaces ü"] {
            let key = key_of(&EndPoint::from(ep));
            assert_eq!(key.as_str().len(), StorageKey::LEN);
            assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_distinct_endpoints_get_distinct_keys() {
        assert_ne!(key_of(&"A".into()), key_of(&"B".into()));
        assert_ne!(key_of(&"A".into()), key_of(&"a".into()));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            key_of(&"abc".into()).as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&EndPoint::from("svc/a")).unwrap();
        assert_eq!(json, "\"svc/a\"");
    }
}
