//! Hash computation functions for Merkle tree nodes

use hashtegrity_core::{Hash, HashAlgorithm};
use hashtegrity_hashing::Hasher;

/// Compute the parent hash of two nodes: `H(left || right)`
pub fn compute_internal_hash(algorithm: HashAlgorithm, left: &[u8], right: &[u8]) -> Hash {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize()
}
