//! State management and persistence for the Merkle tree

use crate::tree::MerkleTree;
use hashtegrity_core::{Error, Hash, HashAlgorithm, Result};
use serde::{Deserialize, Serialize};

/// Serializable tree document
///
/// Hashes are stored as lowercase hex and the algorithm by its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTreeState {
    /// Leaf hashes in insertion order
    pub leaves: Vec<String>,
    /// Every layer from the leaves up to the root
    pub layers: Vec<Vec<String>>,
    /// Algorithm identifier, e.g. `sha256`
    pub algorithm: String,
}

impl MerkleTreeState {
    /// Capture the state of a tree
    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self {
            leaves: tree.leaves().iter().map(hex::encode).collect(),
            layers: tree
                .layers()
                .iter()
                .map(|layer| layer.iter().map(hex::encode).collect())
                .collect(),
            algorithm: tree.algorithm().to_string(),
        }
    }

    /// Rebuild a tree from this document without recomputing any hash
    ///
    /// Fails when a hash is not valid hex, the algorithm is unknown, or the
    /// layers are inconsistent with the leaves in shape: layer 0 must equal
    /// the leaves, no layer may be empty and the last layer must hold exactly
    /// one root.
    pub fn into_tree(self) -> Result<MerkleTree> {
        let algorithm: HashAlgorithm = self.algorithm.parse().map_err(|e| {
            Error::deserialization_with_source(
                format!("unknown algorithm '{}'", self.algorithm),
                e,
            )
        })?;

        let leaves = decode_layer(&self.leaves)?;
        let mut layers = self
            .layers
            .iter()
            .map(|layer| decode_layer(layer))
            .collect::<Result<Vec<_>>>()?;

        // An empty tree may be written with a single empty layer
        if leaves.is_empty() && layers.len() == 1 && layers[0].is_empty() {
            layers.clear();
        }

        check_shape(&leaves, &layers)?;

        Ok(MerkleTree {
            leaves,
            layers,
            algorithm,
        })
    }
}

fn decode_layer(values: &[String]) -> Result<Vec<Hash>> {
    values
        .iter()
        .map(|value| {
            hex::decode(value).map_err(|e| {
                Error::deserialization_with_source(
                    "layer holds an invalid hash",
                    Error::invalid_hex(value, e),
                )
            })
        })
        .collect()
}

fn check_shape(leaves: &[Hash], layers: &[Vec<Hash>]) -> Result<()> {
    if leaves.is_empty() {
        if layers.is_empty() {
            return Ok(());
        }
        return Err(Error::deserialization(
            "tree without leaves must not have layers",
        ));
    }

    let Some(first) = layers.first() else {
        return Err(Error::deserialization("tree with leaves has no layers"));
    };

    if first.as_slice() != leaves {
        return Err(Error::deserialization("first layer does not match leaves"));
    }

    if let Some(position) = layers.iter().position(Vec::is_empty) {
        return Err(Error::deserialization(format!("layer {position} is empty")));
    }

    if let Some(top) = layers.last().filter(|top| top.len() != 1) {
        return Err(Error::deserialization(format!(
            "top layer holds {} hashes instead of a single root",
            top.len()
        )));
    }

    Ok(())
}
