//! Property-based tests for the Merkle tree

#[cfg(test)]
mod proptest_tests {
    use crate::{touches_self_pair, MerkleTree, VerifiableHashList};
    use hashtegrity_core::{Hash, HashAlgorithm};
    use hashtegrity_hashing::digest;
    use proptest::prelude::*;

    fn leaf_hashes(labels: &[String]) -> Vec<Hash> {
        labels
            .iter()
            .map(|label| digest(HashAlgorithm::Sha256, label.as_bytes()))
            .collect()
    }

    proptest! {
        #[test]
        fn test_proofs_verify_unless_self_paired(
            labels in prop::collection::vec("[a-z]{1,10}", 1..40)
        ) {
            let tree = MerkleTree::new(leaf_hashes(&labels), HashAlgorithm::Sha256);
            let root = tree.root();

            for (index, leaf) in tree.leaves().iter().enumerate() {
                let proof = tree.generate_proof(index).unwrap();
                prop_assert_eq!(
                    tree.verify_proof(&proof, leaf, &root),
                    !touches_self_pair(index, tree.len())
                );
            }
        }

        #[test]
        fn test_layer_shape(count in 1usize..100) {
            let leaves: Vec<Hash> = (0..count)
                .map(|i| digest(HashAlgorithm::Sha256, i.to_le_bytes()))
                .collect();
            let tree = MerkleTree::new(leaves, HashAlgorithm::Sha256);

            let layers = tree.layers();
            prop_assert_eq!(layers[0].len(), count);
            prop_assert_eq!(layers[layers.len() - 1].len(), 1);
            for pair in layers.windows(2) {
                prop_assert_eq!(pair[1].len(), pair[0].len().div_ceil(2));
            }
        }

        #[test]
        fn test_root_deterministic_and_leaf_sensitive(
            labels in prop::collection::vec("[a-z]{1,10}", 1..40),
            pick in any::<prop::sample::Index>()
        ) {
            let original = leaf_hashes(&labels);
            let first = MerkleTree::new(original.clone(), HashAlgorithm::Sha256);
            let second = MerkleTree::new(original.clone(), HashAlgorithm::Sha256);
            prop_assert_eq!(first.root(), second.root());

            let index = pick.index(original.len());
            let mut changed = original;
            changed[index] = digest(HashAlgorithm::Sha256, format!("{}!", labels[index]));
            let after = MerkleTree::new(changed, HashAlgorithm::Sha256);
            prop_assert_ne!(first.root(), after.root());
        }

        #[test]
        fn test_round_trip_preserves_tree(
            labels in prop::collection::vec("[a-z0-9]{0,12}", 0..30)
        ) {
            let tree = MerkleTree::new(leaf_hashes(&labels), HashAlgorithm::Sha256);
            let restored = MerkleTree::deserialize(&tree.serialize().unwrap()).unwrap();

            prop_assert!(restored.verify_structure());
            prop_assert_eq!(restored, tree);
        }

        #[test]
        fn test_incremental_list_matches_batch(
            items in prop::collection::vec("[a-z]{1,8}", 0..20)
        ) {
            let batch = VerifiableHashList::new(items.clone(), HashAlgorithm::Sha256);
            let mut incremental = VerifiableHashList::new(Vec::<String>::new(), HashAlgorithm::Sha256);
            for item in &items {
                incremental.add_item(item);
            }

            prop_assert_eq!(incremental.root_hash(), batch.root_hash());
        }
    }
}
