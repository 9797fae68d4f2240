//! Hashing primitives for hashtegrity
//!
//! This crate provides the byte-hashing primitive (plain digests and HMAC),
//! the canonical rendering of structured values, and the data, file and
//! directory hash functions built from them.

pub mod canonical;
pub mod data;
pub mod digest;
pub mod directory;
pub mod file;

pub use canonical::{canonicalize, Value};
pub use data::{canonical_input, generate_hash, hashed_buffer, HashOptions};
pub use digest::{digest, keyed_digest, Hasher};
pub use directory::{collect_matching_files, generate_directory_hash, DirectoryHashOptions};
pub use file::generate_file_hash;

#[cfg(test)]
mod tests_proptest;
