//! Merkle tree engine for hashtegrity
//!
//! This crate provides a binary Merkle tree over arbitrary leaf hashes and a
//! verifiable hash list built on top of it. The tree supports:
//!
//! - Deterministic root computation with odd-tail self-pairing
//! - Inclusion proof generation and verification
//! - JSON persistence of leaves, layers and algorithm
//!
//! ## Self-paired nodes
//!
//! When a layer has an odd number of nodes, its last node is paired with
//! itself to form the parent. Proof generation omits a step when the sibling
//! position is past the end of the layer, so a proof for a leaf whose path
//! passes through such a node does not reproduce the root. See
//! [`touches_self_pair`].

pub mod hash_list;
pub mod proofs;
pub mod state;
pub mod tree;

// Re-export main types
pub use hash_list::VerifiableHashList;
pub use proofs::{MerkleProof, ProofStep};
pub use state::MerkleTreeState;
pub use tree::{touches_self_pair, verify_proof, MerkleTree};

// Test modules
#[cfg(test)]
mod tests;
#[cfg(test)]
mod tests_proptest;
