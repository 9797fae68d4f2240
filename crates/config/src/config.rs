//! Configuration values, sources and the layering builder

use hashtegrity_core::{
    Error, HashAlgorithm, Result, DEFAULT_INCLUDE_PATTERN, HASHTEGRITY_ALGORITHM_VAR,
    HASHTEGRITY_KEY_VAR,
};
use hashtegrity_hashing::{DirectoryHashOptions, HashOptions, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

/// Resolved hashing configuration
#[derive(Clone)]
pub struct Config {
    /// Hash algorithm for every hash computed
    pub algorithm: HashAlgorithm,
    /// HMAC key; plain digests when absent
    pub key: Option<Zeroizing<String>>,
    /// Metadata bound into data and file hashes
    pub metadata: BTreeMap<String, Value>,
    /// Directory include globs
    pub include: Vec<String>,
    /// Directory exclude globs
    pub exclude: Vec<String>,
    /// Bind file paths into directory hashes
    pub include_structure: bool,
    /// Layers that contributed to this configuration, in application order
    pub sources: Vec<ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            key: None,
            metadata: BTreeMap::new(),
            include: vec![DEFAULT_INCLUDE_PATTERN.to_string()],
            exclude: Vec::new(),
            include_structure: false,
            sources: vec![ConfigSource::Default],
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("algorithm", &self.algorithm)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("metadata", &self.metadata)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("include_structure", &self.include_structure)
            .field("sources", &self.sources)
            .finish()
    }
}

impl Config {
    /// Options for data and file hashing
    pub fn hash_options(&self) -> HashOptions {
        let options =
            HashOptions::new(self.algorithm).with_metadata_map(self.metadata.clone());
        match &self.key {
            Some(key) => options.with_key(key.as_str()),
            None => options,
        }
    }

    /// Options for directory hashing
    pub fn directory_options(&self) -> DirectoryHashOptions {
        DirectoryHashOptions::new(self.hash_options())
            .include(self.include.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .include_structure(self.include_structure)
    }

    /// Whether a layer of the given kind contributed to this configuration
    pub fn has_source(&self, source: &ConfigSource) -> bool {
        self.sources.contains(source)
    }
}

/// On-disk configuration file (`hashtegrity.json`)
///
/// Every field is optional; absent fields keep the value of lower layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<HashAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_structure: Option<bool>,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path)
            } else {
                Error::file_system(path, "read config", e)
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::json(
                format!("Failed to parse config file '{}'", path.display()),
                e,
            )
        })
    }
}

/// Command-line overrides, the highest-precedence layer
///
/// Empty lists and `None` leave lower layers untouched; the structure flag
/// can only switch structure binding on.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub algorithm: Option<HashAlgorithm>,
    pub key: Option<Zeroizing<String>>,
    pub metadata: Vec<(String, String)>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub include_structure: bool,
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("algorithm", &self.algorithm)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("metadata", &self.metadata)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("include_structure", &self.include_structure)
            .finish()
    }
}

impl ConfigOverrides {
    fn is_empty(&self) -> bool {
        self.algorithm.is_none()
            && self.key.is_none()
            && self.metadata.is_empty()
            && self.include.is_empty()
            && self.exclude.is_empty()
            && !self.include_structure
    }
}

/// Builder for layering configuration sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Set the HMAC key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(Zeroizing::new(key.into()));
        self
    }

    /// Add a metadata entry
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the include globs
    pub fn include(mut self, patterns: Vec<String>) -> Self {
        self.config.include = patterns;
        self
    }

    /// Replace the exclude globs
    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude = patterns;
        self
    }

    /// Enable or disable structure binding
    pub fn include_structure(mut self, include_structure: bool) -> Self {
        self.config.include_structure = include_structure;
        self
    }

    /// Apply a parsed configuration file
    pub fn file_config(mut self, file: FileConfig, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "applying config file");

        if let Some(algorithm) = file.algorithm {
            self.config.algorithm = algorithm;
        }
        if let Some(key) = file.key {
            self.config.key = Some(Zeroizing::new(key));
        }
        if let Some(metadata) = file.metadata {
            self.config
                .metadata
                .extend(metadata.into_iter().map(|(k, v)| (k, Value::from(v))));
        }
        if let Some(include) = file.include {
            self.config.include = include;
        }
        if let Some(exclude) = file.exclude {
            self.config.exclude = exclude;
        }
        if let Some(include_structure) = file.include_structure {
            self.config.include_structure = include_structure;
        }

        self.config.sources.push(ConfigSource::ConfigFile(path));
        self
    }

    /// Read and apply a configuration file
    pub fn file(self, path: &Path) -> Result<Self> {
        let file = FileConfig::from_path(path)?;
        Ok(self.file_config(file, path))
    }

    /// Apply `HASHTEGRITY_ALGORITHM` and `HASHTEGRITY_KEY` when set
    pub fn environment(mut self) -> Result<Self> {
        if let Some(raw) = non_empty_var(HASHTEGRITY_ALGORITHM_VAR) {
            self.config.algorithm = raw.parse().map_err(|e| {
                Error::configuration(format!("{HASHTEGRITY_ALGORITHM_VAR}: {e}"))
            })?;
            self.config.sources.push(ConfigSource::EnvironmentVariable(
                HASHTEGRITY_ALGORITHM_VAR.to_string(),
            ));
        }

        if let Some(key) = non_empty_var(HASHTEGRITY_KEY_VAR) {
            self.config.key = Some(Zeroizing::new(key));
            self.config.sources.push(ConfigSource::EnvironmentVariable(
                HASHTEGRITY_KEY_VAR.to_string(),
            ));
        }

        Ok(self)
    }

    /// Apply command-line overrides
    pub fn overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.is_empty() {
            return self;
        }

        if let Some(algorithm) = overrides.algorithm {
            self.config.algorithm = algorithm;
        }
        if let Some(key) = &overrides.key {
            self.config.key = Some(key.clone());
        }
        for (key, value) in &overrides.metadata {
            self.config
                .metadata
                .insert(key.clone(), Value::from(value.as_str()));
        }
        if !overrides.include.is_empty() {
            self.config.include = overrides.include.clone();
        }
        if !overrides.exclude.is_empty() {
            self.config.exclude = overrides.exclude.clone();
        }
        if overrides.include_structure {
            self.config.include_structure = true;
        }

        self.config.sources.push(ConfigSource::CommandLine);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
