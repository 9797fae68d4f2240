use super::parse_value;
use clap::Subcommand;
use eyre::WrapErr;
use hashtegrity_config::Config;
use hashtegrity_merkle::VerifiableHashList;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Build a list document from items and print its root hash
    Build {
        /// Output document path
        out: PathBuf,
        /// Items (parsed as JSON when possible, otherwise taken as strings)
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Print the root hash of a list document
    Root { file: PathBuf },
    /// Append an item to a list document and print the new root hash
    Add { file: PathBuf, item: String },
    /// Check that an item belongs to the list under a given root hash
    Verify {
        file: PathBuf,
        item: String,
        #[arg(long, value_name = "HEX")]
        root: String,
    },
    /// Print the inclusion proof of an item as JSON
    Prove { file: PathBuf, item: String },
}

impl ListCommands {
    pub fn execute(self, config: &Config) -> eyre::Result<ExitCode> {
        match self {
            ListCommands::Build { out, items } => {
                let list = VerifiableHashList::new(
                    items.iter().map(|item| parse_value(item)),
                    config.algorithm,
                );
                save(&out, &list)?;
                tracing::info!(path = %out.display(), items = list.len(), "hash list written");
                println!("{}", list.root_hash());
                Ok(ExitCode::SUCCESS)
            }
            ListCommands::Root { file } => {
                println!("{}", load(&file)?.root_hash());
                Ok(ExitCode::SUCCESS)
            }
            ListCommands::Add { file, item } => {
                let mut list = load(&file)?;
                let root = list.add_item(parse_value(&item));
                save(&file, &list)?;
                println!("{root}");
                Ok(ExitCode::SUCCESS)
            }
            ListCommands::Verify { file, item, root } => {
                if load(&file)?.verify_item(parse_value(&item), &root) {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                } else {
                    println!("invalid");
                    Ok(ExitCode::FAILURE)
                }
            }
            ListCommands::Prove { file, item } => match load(&file)?.proof_for(parse_value(&item))? {
                Some(proof) => {
                    println!("{}", serde_json::to_string_pretty(&proof)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("item not found in {}", file.display());
                    Ok(ExitCode::FAILURE)
                }
            },
        }
    }
}

fn load(path: &Path) -> eyre::Result<VerifiableHashList> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read hash list '{}'", path.display()))?;
    Ok(VerifiableHashList::from_json(&json)?)
}

fn save(path: &Path, list: &VerifiableHashList) -> eyre::Result<()> {
    fs::write(path, list.to_json()?)
        .wrap_err_with(|| format!("Failed to write hash list '{}'", path.display()))
}
