//! Verifiable hash list
//!
//! An append-only list of structured items whose membership can be checked
//! against a published root hash. Each item becomes a leaf by hashing its
//! canonical data envelope with no key and no metadata.

use crate::proofs::MerkleProof;
use crate::tree::{verify_proof, MerkleTree};
use hashtegrity_core::{Error, Hash, HashAlgorithm, Result};
use hashtegrity_hashing::{hashed_buffer, Value};

/// Append-only list of items backed by a Merkle tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifiableHashList {
    tree: MerkleTree,
}

impl VerifiableHashList {
    /// Create a list from an initial sequence of items
    pub fn new<I, T>(items: I, algorithm: HashAlgorithm) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let leaves = items
            .into_iter()
            .map(|item| hashed_buffer(&item.into(), algorithm))
            .collect();

        Self {
            tree: MerkleTree::new(leaves, algorithm),
        }
    }

    /// Current root as lowercase hex; empty when the list has no items
    pub fn root_hash(&self) -> String {
        hex::encode(self.tree.root())
    }

    /// Append an item and return the new root hash
    pub fn add_item(&mut self, item: impl Into<Value>) -> String {
        let leaf = self.leaf_for(&item.into());
        self.tree.add_leaf(leaf);
        self.root_hash()
    }

    /// Check that `item` is in the list and its proof reproduces `root_hash`
    ///
    /// Only the first occurrence of a duplicated item is considered. Returns
    /// `false` for absent items and for a root that is not valid hex.
    pub fn verify_item(&self, item: impl Into<Value>, root_hash: &str) -> bool {
        let Ok(root) = hex::decode(root_hash) else {
            tracing::debug!(root_hash, "root hash is not valid hex");
            return false;
        };

        let leaf = self.leaf_for(&item.into());
        let Some(index) = self.index_of(&leaf) else {
            return false;
        };

        match self.tree.generate_proof(index) {
            Ok(proof) => verify_proof(self.tree.algorithm(), &proof, &leaf, &root),
            Err(_) => false,
        }
    }

    /// Position of the first occurrence of `item`
    pub fn position(&self, item: impl Into<Value>) -> Option<usize> {
        self.index_of(&self.leaf_for(&item.into()))
    }

    /// Inclusion proof for the first occurrence of `item`, if present
    pub fn proof_for(&self, item: impl Into<Value>) -> Result<Option<MerkleProof>> {
        match self.position(item) {
            Some(index) => self.tree.generate_proof(index).map(Some),
            None => Ok(None),
        }
    }

    /// Serialize the underlying tree to its JSON document
    pub fn to_json(&self) -> Result<String> {
        self.tree.serialize()
    }

    /// Restore a list from a tree JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        MerkleTree::deserialize(json)
            .map(Self::from)
            .map_err(|e| {
                Error::deserialization_with_source("failed to deserialize verifiable hash list", e)
            })
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Algorithm used for leaves and parents
    pub fn algorithm(&self) -> HashAlgorithm {
        self.tree.algorithm()
    }

    /// Underlying Merkle tree
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    fn leaf_for(&self, item: &Value) -> Hash {
        hashed_buffer(item, self.tree.algorithm())
    }

    fn index_of(&self, leaf: &[u8]) -> Option<usize> {
        self.tree.leaves().iter().position(|candidate| candidate == leaf)
    }
}

impl From<MerkleTree> for VerifiableHashList {
    fn from(tree: MerkleTree) -> Self {
        Self { tree }
    }
}
