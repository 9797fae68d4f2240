use super::parse_value;
use clap::Subcommand;
use hashtegrity_config::Config;
use hashtegrity_integrity::{validate_integrity, ValidationTarget};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum ValidateCommands {
    /// Validate a value against an expected hash
    Data {
        value: String,
        #[arg(long, value_name = "HEX")]
        expected: String,
    },
    /// Validate a file against an expected hash
    File {
        path: PathBuf,
        #[arg(long, value_name = "HEX")]
        expected: String,
    },
    /// Validate a directory against an expected hash
    Dir {
        path: PathBuf,
        #[arg(long, value_name = "HEX")]
        expected: String,
    },
}

impl ValidateCommands {
    pub fn execute(self, config: &Config) -> eyre::Result<ExitCode> {
        let (target, expected) = match self {
            ValidateCommands::Data { value, expected } => {
                (ValidationTarget::Data(parse_value(&value)), expected)
            }
            ValidateCommands::File { path, expected } => (ValidationTarget::File(path), expected),
            ValidateCommands::Dir { path, expected } => {
                (ValidationTarget::Directory(path), expected)
            }
        };

        if validate_integrity(&target, &config.directory_options(), &expected)? {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        } else {
            tracing::warn!(?target, "integrity check failed");
            println!("invalid");
            Ok(ExitCode::FAILURE)
        }
    }
}
