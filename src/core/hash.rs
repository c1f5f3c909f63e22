//! Hashing for Reproducibility Checks
//!
//! SHA-256 over canonical bytes:
//! - Match record fingerprints (equal fingerprint = byte-identical record)
//! - Deterministic match id derivation from generation parameters

use sha2::{Sha256, Digest};
use uuid::{Builder, Uuid};

/// Hash output type (256 bits / 32 bytes)
pub type Digest256 = [u8; 32];

/// Domain separator for match id derivation.
const MATCH_ID_DOMAIN: &[u8] = b"TACTICAL_TELEMETRY_MATCH_ID_V1";

/// Domain separator for record fingerprints.
const FINGERPRINT_DOMAIN: &[u8] = b"TACTICAL_TELEMETRY_RECORD_V1";

/// Incremental hasher with a domain separator.
///
/// Order of updates is significant.
pub struct RecordHasher {
    hasher: Sha256,
}

impl RecordHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> Digest256 {
        self.hasher.finalize().into()
    }
}

/// Fingerprint of an already-encoded record.
pub fn fingerprint_bytes(encoded: &[u8]) -> String {
    let mut hasher = RecordHasher::new(FINGERPRINT_DOMAIN);
    hasher.update_bytes(encoded);
    hex::encode(hasher.finalize())
}

/// Derive the match id from the generation parameters.
///
/// The id is shaped as a v4 UUID but its bytes come from the digest, so two
/// runs with the same parameters report the same id.
pub fn derive_match_id(seed: u32, map: &str, rounds: u32, tick_rate: u32) -> Uuid {
    let mut hasher = RecordHasher::new(MATCH_ID_DOMAIN);
    hasher.update_u32(seed);
    hasher.update_str(map);
    hasher.update_u32(rounds);
    hasher.update_u32(tick_rate);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Builder::from_random_bytes(bytes).into_uuid()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_determinism() {
        let id1 = derive_match_id(2026, "Ascent", 24, 16);
        let id2 = derive_match_id(2026, "Ascent", 24, 16);
        assert_eq!(id1, id2);
        assert_eq!(id1.get_version_num(), 4);
    }

    #[test]
    fn test_match_id_depends_on_every_parameter() {
        let base = derive_match_id(2026, "Ascent", 24, 16);
        assert_ne!(base, derive_match_id(2027, "Ascent", 24, 16));
        assert_ne!(base, derive_match_id(2026, "Bind", 24, 16));
        assert_ne!(base, derive_match_id(2026, "Ascent", 12, 16));
        assert_ne!(base, derive_match_id(2026, "Ascent", 24, 32));
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = RecordHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = RecordHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_string_prefix_prevents_ambiguity() {
        let a = {
            let mut h = RecordHasher::new(b"test");
            h.update_str("ab");
            h.update_str("c");
            h.finalize()
        };
        let b = {
            let mut h = RecordHasher::new(b"test");
            h.update_str("a");
            h.update_str("bc");
            h.finalize()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint_bytes(b"{}");
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, fingerprint_bytes(b"{}"));
        assert_ne!(fp, fingerprint_bytes(b"[]"));
    }
}
