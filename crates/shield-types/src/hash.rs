use std::fmt;

use serde::{Deserialize, Serialize};

/// SHA-256 digest of canonical audit material (32 bytes).
///
/// Serialized as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHash([u8; 32]);

impl ContextHash {
    pub fn from_digest(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, ContextHashError> {
        if s.len() != 64 {
            return Err(ContextHashError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ContextHashError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for ContextHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextHash({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for ContextHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContextHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContextHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContextHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextHashError {
    #[error("invalid hex length: {0} (expected 64)")]
    InvalidLength(usize),
    #[error("invalid hex character")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let hash = ContextHash::from_digest([0xab; 32]);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(ContextHash::from_hex(&hex).unwrap(), hash);
        assert_eq!(hash.to_string(), hex);
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(
            ContextHash::from_hex("abc"),
            Err(ContextHashError::InvalidLength(3))
        );
        let not_hex = "zz".repeat(32);
        assert_eq!(ContextHash::from_hex(&not_hex), Err(ContextHashError::InvalidHex));
    }

    #[test]
    fn serializes_as_hex_string() {
        let hash = ContextHash::from_digest([1u8; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: ContextHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
