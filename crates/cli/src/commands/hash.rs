use super::parse_value;
use clap::Subcommand;
use hashtegrity_config::Config;
use hashtegrity_hashing::{generate_directory_hash, generate_file_hash, generate_hash};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum HashCommands {
    /// Hash a value (parsed as JSON when possible, otherwise taken as a string)
    Data { value: String },
    /// Hash a file's contents
    File { path: PathBuf },
    /// Hash every selected file under a directory
    Dir { path: PathBuf },
}

impl HashCommands {
    pub fn execute(self, config: &Config) -> eyre::Result<ExitCode> {
        let hash = match self {
            HashCommands::Data { value } => {
                generate_hash(&parse_value(&value), &config.hash_options())?
            }
            HashCommands::File { path } => generate_file_hash(&path, &config.hash_options())?,
            HashCommands::Dir { path } => {
                generate_directory_hash(&path, &config.directory_options())?
            }
        };

        println!("{hash}");
        Ok(ExitCode::SUCCESS)
    }
}
