//! Property-based tests for canonical hashing

use crate::{canonicalize, generate_hash, HashOptions, Value};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn test_map_hash_ignores_insertion_order(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9 ]{0,10}", 0..12)
    ) {
        let forward: HashMap<String, String> = entries.clone().into_iter().collect();
        let reversed: HashMap<String, String> = entries.clone().into_iter().rev().collect();
        let options = HashOptions::default();

        prop_assert_eq!(
            generate_hash(&Value::from(forward), &options).unwrap(),
            generate_hash(&Value::from(reversed), &options).unwrap()
        );
    }

    #[test]
    fn test_strings_canonicalize_to_themselves(s in ".*") {
        prop_assert_eq!(canonicalize(&Value::from(s.as_str())), s);
    }

    #[test]
    fn test_hash_is_fixed_length_hex(s in ".*", key in proptest::option::of("[a-z]{1,16}")) {
        let mut options = HashOptions::default();
        if let Some(key) = key {
            options = options.with_key(key);
        }

        let hash = generate_hash(&Value::from(s), &options).unwrap();
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_map_canonical_form_sorted(
        entries in prop::collection::btree_map("[a-z]{1,6}", 0i64..1000, 1..8)
    ) {
        let expected = entries
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(canonicalize(&Value::map(entries)), expected);
    }
}
