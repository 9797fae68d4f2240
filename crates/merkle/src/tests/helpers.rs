//! Test helper functions

use crate::MerkleTree;
use hashtegrity_core::{Hash, HashAlgorithm};
use hashtegrity_hashing::digest;

pub fn leaf(label: &str) -> Hash {
    digest(HashAlgorithm::Sha256, label.as_bytes())
}

pub fn leaves(count: usize) -> Vec<Hash> {
    (0..count).map(|i| leaf(&format!("leaf_{i}"))).collect()
}

pub fn parent(left: &[u8], right: &[u8]) -> Hash {
    let mut joined = left.to_vec();
    joined.extend_from_slice(right);
    digest(HashAlgorithm::Sha256, joined)
}

pub fn tree_of(count: usize) -> MerkleTree {
    MerkleTree::new(leaves(count), HashAlgorithm::Sha256)
}
