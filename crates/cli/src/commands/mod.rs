use clap::{Args, Subcommand};
use hashtegrity_config::{Config, ConfigLoader, ConfigOverrides};
use hashtegrity_core::HashAlgorithm;
use hashtegrity_hashing::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use zeroize::Zeroizing;

pub mod hash;
pub mod list;
pub mod monitor;
pub mod validate;

use self::hash::HashCommands;
use self::list::ListCommands;
use self::monitor::MonitorCommands;
use self::validate::ValidateCommands;

/// Options shared by every command
#[derive(Args)]
pub struct GlobalArgs {
    /// Hash algorithm (sha224, sha256, sha384, sha512, sha512-224, sha512-256)
    #[arg(long, global = true)]
    algorithm: Option<HashAlgorithm>,

    /// HMAC key; plain digests are used when absent
    #[arg(long, global = true)]
    key: Option<String>,

    /// Metadata bound into the hash (can be specified multiple times)
    #[arg(long, global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    metadata: Vec<(String, String)>,

    /// Directory include glob (can be specified multiple times)
    #[arg(long, global = true, value_name = "GLOB")]
    include: Vec<String>,

    /// Directory exclude glob (can be specified multiple times)
    #[arg(long, global = true, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Bind relative file paths into directory hashes
    #[arg(long, global = true)]
    include_structure: bool,

    /// Configuration file (defaults to ./hashtegrity.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Layer the config file, environment and these flags
    pub fn load_config(self) -> eyre::Result<Config> {
        let overrides = ConfigOverrides {
            algorithm: self.algorithm,
            key: self.key.map(Zeroizing::new),
            metadata: self.metadata,
            include: self.include,
            exclude: self.exclude,
            include_structure: self.include_structure,
        };

        let config = ConfigLoader::new()
            .config_file(self.config)
            .overrides(overrides)
            .load()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hash of data, a file or a directory
    Hash {
        #[command(subcommand)]
        command: HashCommands,
    },

    /// Compare data, a file or a directory against an expected hash
    Validate {
        #[command(subcommand)]
        command: ValidateCommands,
    },

    /// Watch a file or directory and report integrity violations until interrupted
    Monitor {
        #[command(subcommand)]
        command: MonitorCommands,
    },

    /// Manage verifiable hash list documents
    #[command(visible_alias = "l")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

impl Commands {
    pub fn execute(self, config: &Config) -> eyre::Result<ExitCode> {
        match self {
            Commands::Hash { command } => command.execute(config),
            Commands::Validate { command } => command.execute(config),
            Commands::Monitor { command } => command.execute(config),
            Commands::List { command } => command.execute(config),
        }
    }
}

/// Interpret a command-line item as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
