//! Configuration loader for hashtegrity
//!
//! Resolves which configuration file applies and layers it with the
//! environment and command-line overrides.

use crate::config::{Config, ConfigBuilder, ConfigOverrides};
use hashtegrity_core::{
    constants::{CONFIG_FILENAME, HASHTEGRITY_CONFIG_VAR},
    Error, Result, ResultExt,
};
use std::path::PathBuf;

/// Configuration loader that handles all startup configuration
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Directory searched for `hashtegrity.json` (defaults to current directory)
    directory: Option<PathBuf>,
    /// Explicit configuration file; must exist when given
    config_file: Option<PathBuf>,
    /// Command-line overrides
    overrides: ConfigOverrides,
    /// Whether environment variables are consulted
    skip_environment: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to look for the default config file in
    pub fn directory(mut self, dir: PathBuf) -> Self {
        self.directory = Some(dir);
        self
    }

    /// Use an explicit config file
    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Set command-line overrides
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Ignore `HASHTEGRITY_*` environment variables
    pub fn skip_environment(mut self, skip: bool) -> Self {
        self.skip_environment = skip;
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        if let Some(path) = self.find_config_file()? {
            builder = builder
                .file(&path)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?;
        }

        if !self.skip_environment {
            builder = builder.environment()?;
        }

        let config = builder.overrides(&self.overrides).build();
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Explicit path, then `HASHTEGRITY_CONFIG`, then `hashtegrity.json` in the
    /// search directory if present
    fn find_config_file(&self) -> Result<Option<PathBuf>> {
        let explicit = self.config_file.clone().or_else(|| {
            if self.skip_environment {
                None
            } else {
                std::env::var_os(HASHTEGRITY_CONFIG_VAR)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            }
        });

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::file_not_found(path));
            }
            return Ok(Some(path));
        }

        let directory = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|e| Error::file_system(".", "resolve current directory", e))?,
        };

        let candidate = directory.join(CONFIG_FILENAME);
        Ok(candidate.is_file().then_some(candidate))
    }
}
