use clap::Parser;
use std::process::ExitCode;

mod commands;
mod logging;

use commands::{Commands, GlobalArgs};

#[derive(Parser)]
#[command(name = "hashtegrity")]
#[command(about = "Hash, validate and monitor the integrity of data, files and directories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    logging::init()?;

    let cli = Cli::parse();
    let config = cli.global.load_config()?;

    cli.command.execute(&config)
}
