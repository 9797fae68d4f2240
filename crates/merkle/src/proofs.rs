//! Merkle proof types

use hashtegrity_core::Hash;
use serde::{Deserialize, Serialize};

/// Inclusion proof: one step per layer where the walked node had a stored
/// sibling, ordered from the leaf towards the root
pub type MerkleProof = Vec<ProofStep>;

/// Single step in a Merkle proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sibling hash at this level
    #[serde(with = "hex::serde")]
    pub sibling_hash: Hash,
    /// Whether the sibling is on the left, i.e. the proven node is the
    /// right member of its pair
    pub is_left_sibling: bool,
}

impl ProofStep {
    /// Create a proof step
    pub fn new(sibling_hash: Hash, is_left_sibling: bool) -> Self {
        Self {
            sibling_hash,
            is_left_sibling,
        }
    }
}
