//! Tree structure building

use super::compute_internal_hash;
use hashtegrity_core::{Hash, HashAlgorithm};

/// Build every layer of the tree from its leaves
///
/// Layer 0 is a copy of the leaves and the last layer holds the single root.
/// An empty leaf set yields no layers.
pub fn build_layers(leaves: &[Hash], algorithm: HashAlgorithm) -> Vec<Vec<Hash>> {
    if leaves.is_empty() {
        return Vec::new();
    }

    let mut layers = vec![leaves.to_vec()];

    while let Some(current_level) = layers.last().filter(|level| level.len() > 1) {
        // Process pairs of nodes; an odd tail is paired with itself
        let next_level: Vec<Hash> = current_level
            .chunks(2)
            .map(|chunk| {
                let left = &chunk[0];
                let right = chunk.get(1).unwrap_or(left);
                compute_internal_hash(algorithm, left, right)
            })
            .collect();

        layers.push(next_level);
    }

    layers
}
