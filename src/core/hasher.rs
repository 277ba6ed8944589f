//! Labeled SHA-256 hashing for URL deduplication keys.

use sha2::{Digest, Sha256};

/// Label used for whole-URL fingerprints.
pub const URL_LABEL: &str = "url";

/// Hash data with a label and keep the lower `bit_width` bits.
///
/// H_n(L, B) = lower_n(SHA256(L || 0x00 || B))
///
/// `bit_width` is clamped to 64.
pub fn hash_component(label: &str, data: &[u8], bit_width: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update([0x00u8]);
    hasher.update(data);
    let digest = hasher.finalize();

    extract_lower_bits(&digest, bit_width)
}

/// Lower `bit_width` bits of a digest: the last 8 bytes read little-endian, then masked.
pub fn extract_lower_bits(digest: &[u8], bit_width: u32) -> u64 {
    let mut tail = [0u8; 8];
    let start = digest.len().saturating_sub(8);
    let bytes = &digest[start..];
    tail[..bytes.len()].copy_from_slice(bytes);
    let value = u64::from_le_bytes(tail);

    if bit_width >= 64 {
        value
    } else {
        value & ((1u64 << bit_width) - 1)
    }
}

/// Full 64-bit fingerprint of a canonical URL string.
pub fn fingerprint(canonical: &str) -> u64 {
    hash_component(URL_LABEL, canonical.as_bytes(), 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_is_deterministic() {
        let hash1 = hash_component("url", b"http://host.com/", 64);
        let hash2 = hash_component("url", b"http://host.com/", 64);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_extract_lower_bits_known_digest() {
        // SHA256("test")
        let digest =
            hex::decode("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")
                .unwrap();

        assert_eq!(extract_lower_bits(&digest, 16), 0x5dd1);
        assert_eq!(extract_lower_bits(&digest, 64), 0x080af0b0156c5dd1);
    }

    #[test]
    fn test_label_separation() {
        assert_ne!(
            hash_component("url", b"http://host.com/", 64),
            hash_component("host", b"http://host.com/", 64)
        );
    }

    #[test]
    fn test_bit_width_mask() {
        let full = hash_component("url", b"x", 64);
        assert_eq!(hash_component("url", b"x", 20), full & 0xfffff);
        assert!(hash_component("url", b"x", 20) < (1 << 20));
    }

    #[test]
    fn test_fingerprint_distinguishes_trailing_slash() {
        assert_ne!(fingerprint("http://host.com/a"), fingerprint("http://host.com/a/"));
    }
}
