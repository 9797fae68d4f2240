//! Hashing of arbitrary structured values

use crate::canonical::{canonicalize, Value};
use crate::digest::Hasher;
use hashtegrity_core::{Hash, HashAlgorithm, Result};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroizing;

/// Options shared by every hash entry point
#[derive(Clone, Default)]
pub struct HashOptions {
    /// Hash function (default: SHA-256)
    pub algorithm: HashAlgorithm,
    /// HMAC key; plain digest when absent
    pub key: Option<Zeroizing<String>>,
    /// Extra values bound into the hash alongside the data
    pub metadata: BTreeMap<String, Value>,
}

impl HashOptions {
    /// Options for `algorithm` with no key and no metadata
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the hash algorithm
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Switch to HMAC with the given key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(Zeroizing::new(key.into()));
        self
    }

    /// Add one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace all metadata
    pub fn with_metadata_map(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Create a hasher configured by these options
    pub fn hasher(&self) -> Result<Hasher> {
        Hasher::for_key(self.algorithm, self.key.as_ref().map(|k| k.as_bytes()))
    }

    // Text that follows the data in the canonical `{data, metadata}` envelope
    pub(crate) fn envelope_suffix(&self) -> String {
        format!(",metadata:{}", canonicalize(&Value::Map(self.metadata.clone())))
    }
}

impl fmt::Debug for HashOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashOptions")
            .field("algorithm", &self.algorithm)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("metadata", &self.metadata)
            .finish()
    }
}

// Prefix of the canonical `{data, metadata}` envelope
pub(crate) const ENVELOPE_PREFIX: &str = "data:";

/// Canonical input for `data` under `options`: `data:<data>,metadata:<metadata>`
pub fn canonical_input(data: &Value, options: &HashOptions) -> String {
    let mut input = String::from(ENVELOPE_PREFIX);
    input.push_str(&canonicalize(data));
    input.push_str(&options.envelope_suffix());
    input
}

/// Hash `data` (with the options' metadata) and return lowercase hex
pub fn generate_hash(data: &Value, options: &HashOptions) -> Result<String> {
    let mut hasher = options.hasher()?;
    hasher.update(canonical_input(data, options));
    Ok(hasher.finalize_hex())
}

/// Raw hash of an item as used for hash-list leaves (no key, no metadata)
pub fn hashed_buffer(data: &Value, algorithm: HashAlgorithm) -> Hash {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(canonical_input(data, &HashOptions::new(algorithm)));
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::digest;

    #[test]
    fn test_canonical_input_envelope() {
        let options = HashOptions::default();
        assert_eq!(
            canonical_input(&Value::from("Hello, world!"), &options),
            "data:Hello, world!,metadata:"
        );

        let options = HashOptions::default().with_metadata("custom", "data");
        assert_eq!(
            canonical_input(&Value::from("x"), &options),
            "data:x,metadata:custom:data"
        );
    }

    #[test]
    fn test_generate_hash_is_digest_of_envelope() {
        let hash = generate_hash(&Value::from("Hello, world!"), &HashOptions::default()).unwrap();
        let expected = hex::encode(digest(
            HashAlgorithm::Sha256,
            "data:Hello, world!,metadata:",
        ));
        assert_eq!(hash, expected);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_key_switches_to_hmac() {
        let data = Value::from("Hello, world!");
        let plain = generate_hash(&data, &HashOptions::default()).unwrap();
        let keyed = generate_hash(&data, &HashOptions::default().with_key("secret-key")).unwrap();
        let other_key =
            generate_hash(&data, &HashOptions::default().with_key("other-key")).unwrap();
        assert_ne!(plain, keyed);
        assert_ne!(keyed, other_key);
    }

    #[test]
    fn test_metadata_changes_hash() {
        let data = Value::from("payload");
        let without = generate_hash(&data, &HashOptions::default()).unwrap();
        let with = generate_hash(&data, &HashOptions::default().with_metadata("v", 1)).unwrap();
        assert_ne!(without, with);
    }

    #[test]
    fn test_algorithm_changes_hash_length() {
        let data = Value::from("payload");
        let sha512 = generate_hash(&data, &HashOptions::new(HashAlgorithm::Sha512)).unwrap();
        assert_eq!(sha512.len(), 128);
    }

    #[test]
    fn test_hashed_buffer_matches_generate_hash() {
        let data = Value::from("item1");
        let raw = hashed_buffer(&data, HashAlgorithm::Sha256);
        let hex_hash = generate_hash(&data, &HashOptions::default()).unwrap();
        assert_eq!(hex::encode(raw), hex_hash);
    }

    #[test]
    fn test_debug_redacts_key() {
        let options = HashOptions::default().with_key("super-secret");
        let debug = format!("{options:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
    }
}
