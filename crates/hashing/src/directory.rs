//! Directory tree hashing

use crate::canonical::Value;
use crate::data::{generate_hash, HashOptions};
use crate::file::generate_file_hash;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use hashtegrity_core::{Error, Result, DEFAULT_INCLUDE_PATTERN, FILE_PATH_METADATA_KEY};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Options for hashing a directory tree
#[derive(Debug, Clone)]
pub struct DirectoryHashOptions {
    /// Algorithm, key and metadata applied to every file and the aggregate
    pub hash: HashOptions,
    /// Glob patterns (relative to the directory) selecting files
    pub include: Vec<String>,
    /// Glob patterns removing files from the selection
    pub exclude: Vec<String>,
    /// Bind each file's path into its hash so renames are detected
    pub include_structure: bool,
}

impl Default for DirectoryHashOptions {
    fn default() -> Self {
        Self {
            hash: HashOptions::default(),
            include: vec![DEFAULT_INCLUDE_PATTERN.to_string()],
            exclude: Vec::new(),
            include_structure: false,
        }
    }
}

impl DirectoryHashOptions {
    /// Directory options wrapping existing hash options
    pub fn new(hash: HashOptions) -> Self {
        Self {
            hash,
            ..Self::default()
        }
    }

    /// Replace the include patterns
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclude patterns
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable structure binding
    pub fn include_structure(mut self, include_structure: bool) -> Self {
        self.include_structure = include_structure;
        self
    }
}

/// Hash every selected file under `directory_path` into one hex hash
///
/// Files are hashed in sorted relative-path order; the result is the hash of
/// the concatenated per-file hex hashes, under the same options.
pub fn generate_directory_hash(
    directory_path: &Path,
    options: &DirectoryHashOptions,
) -> Result<String> {
    if !directory_path.is_dir() {
        return Err(Error::directory_not_found(directory_path));
    }

    let files = collect_matching_files(directory_path, &options.include, &options.exclude)?;

    tracing::debug!(
        directory = %directory_path.display(),
        files = files.len(),
        include_structure = options.include_structure,
        "hashing directory"
    );

    let mut concatenated = String::new();
    for relative in &files {
        let file_path = directory_path.join(relative);

        let file_options = if options.include_structure {
            options.hash.clone().with_metadata(
                FILE_PATH_METADATA_KEY,
                file_path.to_string_lossy().into_owned(),
            )
        } else {
            options.hash.clone()
        };

        concatenated.push_str(&generate_file_hash(&file_path, &file_options)?);
    }

    generate_hash(&Value::String(concatenated), &options.hash)
}

/// Collect regular files below `base_dir` matching `include` and not `exclude`
///
/// Returns paths relative to `base_dir`, sorted by their `/`-separated form.
/// Symlinks are not followed.
pub fn collect_matching_files(
    base_dir: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let include_set = build_globset(include)?;
    let exclude_set = build_globset(exclude)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(base_dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base_dir).to_path_buf();
            Error::file_system(path, "walk directory", e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(base_dir)
            .unwrap_or(entry.path())
            .to_path_buf();

        if include_set.is_match(&relative) && !exclude_set.is_match(&relative) {
            files.push(relative);
        }
    }

    // Sort files for consistent hashing
    files.sort_by_key(|path| slash_path(path));
    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::configuration(format!("Invalid glob pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to build globset: {e}")))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
