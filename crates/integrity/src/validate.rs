//! One-shot integrity validation

use hashtegrity_core::{Error, Result};
use hashtegrity_hashing::{
    generate_directory_hash, generate_file_hash, generate_hash, DirectoryHashOptions, Value,
};
use std::path::PathBuf;

/// What to validate
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationTarget {
    /// A structured value
    Data(Value),
    /// A file's contents
    File(PathBuf),
    /// A directory tree
    Directory(PathBuf),
}

impl ValidationTarget {
    /// Compute the current hash of the target
    ///
    /// Data and file targets use `options.hash`; directories use all options.
    pub fn compute_hash(&self, options: &DirectoryHashOptions) -> Result<String> {
        match self {
            ValidationTarget::Data(data) => {
                if data.is_null() {
                    return Err(Error::configuration(
                        "Data is required for data integrity validation",
                    ));
                }
                generate_hash(data, &options.hash)
            }
            ValidationTarget::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(Error::configuration(
                        "File path is required for file integrity validation",
                    ));
                }
                generate_file_hash(path, &options.hash)
            }
            ValidationTarget::Directory(path) => {
                if path.as_os_str().is_empty() {
                    return Err(Error::configuration(
                        "Directory path is required for directory integrity validation",
                    ));
                }
                generate_directory_hash(path, options)
            }
        }
    }
}

/// Whether the target currently hashes to `expected_hash`
///
/// The comparison is exact, so the expected hash must be lowercase hex.
pub fn validate_integrity(
    target: &ValidationTarget,
    options: &DirectoryHashOptions,
    expected_hash: &str,
) -> Result<bool> {
    let actual = target.compute_hash(options)?;
    let valid = actual == expected_hash;

    tracing::debug!(?target, valid, "validated integrity");
    Ok(valid)
}
