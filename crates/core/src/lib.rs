//! Core domain types, errors, and constants for `hashtegrity`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias shared by every
//!   crate in the workspace.
//! - **`algorithm`**: `HashAlgorithm`, the identifier stored in serialized
//!   trees and accepted on the command line.
//! - **`constants`**: environment variable names and hashing defaults.

pub mod algorithm;
pub mod constants;
pub mod errors;

pub use self::{
    algorithm::HashAlgorithm,
    constants::*,
    errors::{Error, Result, ResultExt},
};

/// Raw hash value (length depends on the algorithm)
pub type Hash = Vec<u8>;
