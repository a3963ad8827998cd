//! Format-preserving hashing for MAC addresses and UUIDs

use super::{Anonymizer, CellContext};
use crate::anonymization::mapping::MappingStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lexical shape to reproduce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFormat {
    /// `aa:bb:cc:dd:ee:ff`
    Mac,
    /// `8-4-4-4-12` when the original is dashed, the full hex digest otherwise
    Uuid,
}

/// SHA-256 digest of a value
pub(crate) fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Hex-encoded SHA-256 digest of a value (64 characters)
pub(crate) fn digest_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Deterministic digest-derived substitute keeping the original's shape
#[derive(Debug, Clone, Copy)]
pub struct FormatPreservingHasher {
    format: HashFormat,
    min_length: usize,
}

impl FormatPreservingHasher {
    /// Hasher for MAC addresses
    pub fn mac() -> Self {
        Self {
            format: HashFormat::Mac,
            min_length: 0,
        }
    }

    /// Hasher for UUID-like identifiers
    ///
    /// Values of `min_length` characters or fewer are left unchanged.
    pub fn uuid(min_length: usize) -> Self {
        Self {
            format: HashFormat::Uuid,
            min_length,
        }
    }

    /// Hasher for a format with the configured UUID threshold
    pub fn for_format(format: HashFormat, uuid_min_length: usize) -> Self {
        match format {
            HashFormat::Mac => Self::mac(),
            HashFormat::Uuid => Self::uuid(uuid_min_length),
        }
    }

    /// Hash `original`, reusing a previous result for the same input
    pub fn hash_value(&self, store: &mut MappingStore, original: &str) -> String {
        let value = original.trim();
        if value.is_empty() {
            return original.to_string();
        }
        if self.format == HashFormat::Uuid && value.chars().count() <= self.min_length {
            return original.to_string();
        }
        if let Some(existing) = store.hashed(value) {
            return existing.to_string();
        }

        let mut salt = 0u32;
        let hashed = loop {
            let seed = if salt == 0 {
                value.to_string()
            } else {
                format!("{value}#{salt}")
            };
            let candidate = self.render(value, &digest_hex(&seed));
            if !store.is_taken(&candidate) {
                break candidate;
            }
            salt += 1;
        };

        store.record_hash(value, &hashed);
        hashed
    }

    fn render(&self, original: &str, hex: &str) -> String {
        match self.format {
            HashFormat::Mac => hex[..12]
                .as_bytes()
                .chunks(2)
                .map(|pair| String::from_utf8_lossy(pair).into_owned())
                .collect::<Vec<_>>()
                .join(":"),
            HashFormat::Uuid if original.contains('-') => format!(
                "{}-{}-{}-{}-{}",
                &hex[0..8],
                &hex[8..12],
                &hex[12..16],
                &hex[16..20],
                &hex[20..32]
            ),
            HashFormat::Uuid => hex.to_string(),
        }
    }
}

impl Anonymizer for FormatPreservingHasher {
    fn anonymize(&self, store: &mut MappingStore, value: &str, _context: &CellContext<'_>) -> String {
        self.hash_value(store, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_digest_hex_length() {
        assert_eq!(digest_hex("abc").len(), 64);
        assert_eq!(
            digest_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_mac_shape() {
        let mut store = MappingStore::new();
        let hashed = FormatPreservingHasher::mac().hash_value(&mut store, "00:50:56:9a:12:34");

        let groups: Vec<&str> = hashed.split(':').collect();
        assert_eq!(groups.len(), 6);
        assert!(groups.iter().all(|g| g.len() == 2 && is_hex(g)));
        assert_eq!(&hashed.replace(':', ""), &digest_hex("00:50:56:9a:12:34")[..12]);
        assert_eq!(store.reverse(&hashed), Some("00:50:56:9a:12:34"));
    }

    #[test]
    fn test_mac_is_deterministic() {
        let mut first = MappingStore::new();
        let mut second = MappingStore::new();
        let hasher = FormatPreservingHasher::mac();

        let a = hasher.hash_value(&mut first, "00:50:56:9a:12:34");
        let b = hasher.hash_value(&mut second, "00:50:56:9a:12:34");
        let c = hasher.hash_value(&mut first, "00:50:56:9a:12:34");

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_dashed_uuid_keeps_grouping() {
        let mut store = MappingStore::new();
        let original = "4210a1b2-33c4-d5e6-f708-192a3b4c5d6e";
        let hashed = FormatPreservingHasher::uuid(20).hash_value(&mut store, original);

        let lengths: Vec<usize> = hashed.split('-').map(str::len).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert_ne!(hashed, original);
        assert_eq!(store.reverse(&hashed), Some(original));
    }

    #[test]
    fn test_undashed_uuid_is_full_hex_digest() {
        let mut store = MappingStore::new();
        let original = "4210a1b233c4d5e6f708192a3b4c5d6e";
        let hashed = FormatPreservingHasher::uuid(20).hash_value(&mut store, original);

        assert_eq!(hashed, digest_hex(original));
        assert_eq!(hashed.len(), 64);
        assert_eq!(store.reverse(&hashed), Some(original));
    }

    #[test]
    fn test_short_uuid_values_are_left_alone() {
        let mut store = MappingStore::new();
        let hasher = FormatPreservingHasher::uuid(20);

        assert_eq!(hasher.hash_value(&mut store, "host-123"), "host-123");
        assert_eq!(hasher.hash_value(&mut store, ""), "");
        assert_eq!(store.reverse_len(), 0);
    }

    #[test]
    fn test_collision_is_resolved_with_salt() {
        let mut store = MappingStore::new();
        let hasher = FormatPreservingHasher::mac();
        let expected = hasher.render("x", &digest_hex("00:11:22:33:44:55"));
        store.record_reverse(&expected, "squatter");

        let hashed = hasher.hash_value(&mut store, "00:11:22:33:44:55");

        assert_ne!(hashed, expected);
        assert_eq!(store.reverse(&hashed), Some("00:11:22:33:44:55"));
    }
}
