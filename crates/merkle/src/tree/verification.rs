//! Tree verification operations

use super::{structure::build_layers, MerkleTree};

/// Recompute every layer from the leaves and compare with the stored layers
pub fn verify_structure_impl(tree: &MerkleTree) -> bool {
    let expected = build_layers(&tree.leaves, tree.algorithm);
    let consistent = expected == tree.layers;

    if !consistent {
        tracing::warn!(
            leaves = tree.leaves.len(),
            stored_layers = tree.layers.len(),
            expected_layers = expected.len(),
            "Merkle tree layers do not match their leaves"
        );
    }

    consistent
}
