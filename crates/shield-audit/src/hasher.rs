use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use shield_types::ContextHash;

use crate::canonical::{encode_value, to_canonical_json};
use crate::error::CanonicalError;

/// SHA-256 over canonical JSON.
///
/// Identical logical material always yields an identical digest, across
/// processes and runs.
pub struct AuditHasher;

impl AuditHasher {
    /// Hash any serializable material. Fails only if the material is not
    /// canonically serializable.
    pub fn hash<T: Serialize + ?Sized>(material: &T) -> Result<ContextHash, CanonicalError> {
        let canonical = to_canonical_json(material)?;
        Ok(Self::hash_canonical(&canonical))
    }

    /// Hash a JSON tree. Never fails.
    pub fn hash_value(material: &Value) -> ContextHash {
        Self::hash_canonical(&encode_value(material))
    }

    /// Hash text that is already canonical.
    pub fn hash_canonical(canonical: &str) -> ContextHash {
        let digest: [u8; 32] = Sha256::digest(canonical.as_bytes()).into();
        ContextHash::from_digest(digest)
    }

    /// Recompute the hash of `material` and compare.
    pub fn verify(material: &Value, expected: &ContextHash) -> bool {
        Self::hash_value(material) == *expected
    }
}

/// Compute the context hash of arbitrary material.
pub fn compute_context_hash<T: Serialize + ?Sized>(material: &T) -> Result<ContextHash, CanonicalError> {
    AuditHasher::hash(material)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;
    use shield_types::Payload;

    use super::*;

    #[test]
    fn known_digest_of_empty_object() {
        // sha256("{}")
        let hash = AuditHasher::hash_value(&json!({}));
        assert_eq!(
            hash.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn key_order_does_not_change_digest() {
        let mut a = HashMap::new();
        a.insert("outcome", "DENY");
        a.insert("nonce", "n1");
        let b = json!({"nonce": "n1", "outcome": "DENY"});
        assert_eq!(compute_context_hash(&a).unwrap(), AuditHasher::hash_value(&b));
    }

    #[test]
    fn different_material_different_digest() {
        let a = AuditHasher::hash_value(&json!({"outcome": "DENY"}));
        let b = AuditHasher::hash_value(&json!({"outcome": "ALLOW"}));
        assert_ne!(a, b);
    }

    #[test]
    fn unserializable_material_is_an_error() {
        let material = json!({"ok": true});
        assert!(AuditHasher::hash(&material).is_ok());
        assert!(AuditHasher::hash(&Payload::Float(f64::NAN)).is_err());
    }

    #[test]
    fn verify_detects_tampering() {
        let material = json!({"outcome": "DENY", "reason_ids": ["DENY_BY_POLICY"]});
        let hash = AuditHasher::hash_value(&material);
        assert!(AuditHasher::verify(&material, &hash));

        let tampered = json!({"outcome": "ALLOW", "reason_ids": ["DENY_BY_POLICY"]});
        assert!(!AuditHasher::verify(&tampered, &hash));
    }
}
