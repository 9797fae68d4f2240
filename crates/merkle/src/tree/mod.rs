//! Main Merkle tree implementation and operations

mod hash_computation;
mod proof_operations;
mod structure;
mod verification;

use crate::proofs::{MerkleProof, ProofStep};
use crate::state::MerkleTreeState;
use hashtegrity_core::{Error, Hash, HashAlgorithm, Result};
use std::fmt;

pub(crate) use hash_computation::compute_internal_hash;
pub use proof_operations::touches_self_pair;
use proof_operations::{compute_proof_path, compute_root_from_proof};
pub(crate) use structure::build_layers;
use verification::verify_structure_impl;

/// Binary Merkle tree over a sequence of leaf hashes
///
/// Every layer is rebuilt from the leaves whenever a leaf is appended, so the
/// stored layers always describe the current leaf sequence unless the tree
/// was restored from an untrusted document (see [`MerkleTree::verify_structure`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// Leaf hashes in insertion order
    pub(crate) leaves: Vec<Hash>,
    /// Layer 0 equals `leaves`; the last layer holds the root
    pub(crate) layers: Vec<Vec<Hash>>,
    /// Algorithm used for parent hashes
    pub(crate) algorithm: HashAlgorithm,
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new(Vec::new(), HashAlgorithm::default())
    }
}

impl MerkleTree {
    /// Create a tree over the given leaf hashes
    pub fn new(leaves: Vec<Hash>, algorithm: HashAlgorithm) -> Self {
        let layers = build_layers(&leaves, algorithm);
        Self {
            leaves,
            layers,
            algorithm,
        }
    }

    /// Append a leaf hash and rebuild all layers
    pub fn add_leaf(&mut self, leaf: Hash) {
        self.leaves.push(leaf);
        self.layers = build_layers(&self.leaves, self.algorithm);

        tracing::trace!(
            leaves = self.leaves.len(),
            height = self.height(),
            "appended Merkle leaf"
        );
    }

    /// Root hash; empty when the tree has no leaves
    #[must_use]
    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Leaf hashes in insertion order
    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// All layers, from the leaves up to the root
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Algorithm used for parent hashes
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of parent levels above the leaves
    pub fn height(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Generate an inclusion proof for the leaf at `index`
    pub fn generate_proof(&self, index: usize) -> Result<MerkleProof> {
        if index >= self.leaves.len() {
            return Err(Error::index_out_of_range(index, self.leaves.len()));
        }

        Ok(compute_proof_path(&self.layers, index))
    }

    /// Verify a proof for `leaf` against `root` using this tree's algorithm
    pub fn verify_proof(&self, proof: &[ProofStep], leaf: &[u8], root: &[u8]) -> bool {
        verify_proof(self.algorithm, proof, leaf, root)
    }

    /// Recompute the layers from the leaves and check they match the stored ones
    pub fn verify_structure(&self) -> bool {
        verify_structure_impl(self)
    }

    /// Export the tree as a persistable document
    pub fn export_state(&self) -> MerkleTreeState {
        MerkleTreeState::from_tree(self)
    }

    /// Restore a tree from a persisted document
    ///
    /// The stored layers are trusted as-is once their shape checks out; call
    /// [`MerkleTree::verify_structure`] to recompute them.
    pub fn import_state(state: MerkleTreeState) -> Result<Self> {
        state.into_tree()
    }

    /// Serialize the tree to its JSON document
    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(&self.export_state())
            .map_err(|e| Error::json("Failed to serialize Merkle tree", e))
    }

    /// Restore a tree from its JSON document
    pub fn deserialize(json: &str) -> Result<Self> {
        let state: MerkleTreeState = serde_json::from_str(json).map_err(|e| {
            Error::deserialization_with_source("invalid Merkle tree document", e)
        })?;
        Self::import_state(state)
    }
}

/// Verify that `proof` folds `leaf` into `root`
///
/// Each step hashes the sibling on the side given by the step; the final hash
/// must equal `root` byte for byte.
pub fn verify_proof(algorithm: HashAlgorithm, proof: &[ProofStep], leaf: &[u8], root: &[u8]) -> bool {
    compute_root_from_proof(algorithm, proof, leaf) == root
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MerkleTree(algorithm={}, leaves={}, height={}, root={})",
            self.algorithm,
            self.leaves.len(),
            self.height(),
            hex::encode(self.root())
        )
    }
}
