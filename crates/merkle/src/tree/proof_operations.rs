//! Proof generation and verification operations

use super::compute_internal_hash;
use crate::proofs::{MerkleProof, ProofStep};
use hashtegrity_core::{Hash, HashAlgorithm};

/// Walk from `index` in layer 0 up to the layer below the root, collecting
/// the sibling of each visited node that exists
pub fn compute_proof_path(layers: &[Vec<Hash>], index: usize) -> MerkleProof {
    let mut proof = Vec::new();
    let mut position = index;

    for layer in layers.iter().take(layers.len().saturating_sub(1)) {
        let is_right = position % 2 == 1;
        let sibling_position = position ^ 1;

        if let Some(sibling) = layer.get(sibling_position) {
            proof.push(ProofStep::new(sibling.clone(), is_right));
        }

        position /= 2;
    }

    proof
}

/// Fold a proof over a leaf hash to obtain the root it implies
pub fn compute_root_from_proof(algorithm: HashAlgorithm, proof: &[ProofStep], leaf: &[u8]) -> Hash {
    proof.iter().fold(leaf.to_vec(), |current, step| {
        if step.is_left_sibling {
            compute_internal_hash(algorithm, &step.sibling_hash, &current)
        } else {
            compute_internal_hash(algorithm, &current, &step.sibling_hash)
        }
    })
}

/// Whether the path from `index` to the root passes through a node that was
/// paired with itself in a tree of `leaf_count` leaves
///
/// Proofs for such leaves skip that level and do not verify.
pub fn touches_self_pair(index: usize, leaf_count: usize) -> bool {
    let mut position = index;
    let mut size = leaf_count;

    while size > 1 {
        if size % 2 == 1 && position == size - 1 {
            return true;
        }
        position /= 2;
        size = size.div_ceil(2);
    }

    false
}
