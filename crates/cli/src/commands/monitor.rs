use clap::Subcommand;
use hashtegrity_config::Config;
use hashtegrity_integrity::{IntegrityMonitor, LoggingHandler, MonitorOptions, MonitorTarget};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum MonitorCommands {
    /// Watch a single file
    File {
        path: PathBuf,
        /// Expected hash; the current hash is used when omitted
        #[arg(long, value_name = "HEX")]
        expected: Option<String>,
    },
    /// Watch a directory recursively
    Dir {
        path: PathBuf,
        /// Expected hash; the current hash is used when omitted
        #[arg(long, value_name = "HEX")]
        expected: Option<String>,
    },
}

impl MonitorCommands {
    pub fn execute(self, config: &Config) -> eyre::Result<ExitCode> {
        let (target, expected) = match self {
            MonitorCommands::File { path, expected } => (MonitorTarget::File(path), expected),
            MonitorCommands::Dir { path, expected } => (MonitorTarget::Directory(path), expected),
        };

        let mut options = MonitorOptions::new(target).hash(config.directory_options());
        if let Some(expected) = expected {
            options = options.expected_hash(expected);
        }

        let mut monitor = IntegrityMonitor::start(options, LoggingHandler)?;
        println!("{}", monitor.expected_hash());

        wait_for_shutdown()?;
        monitor.stop();
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(unix)]
fn wait_for_shutdown() -> eyre::Result<()> {
    use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    if let Some(signal) = signals.forever().next() {
        tracing::info!(signal, "stopping monitor");
    }
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown() -> eyre::Result<()> {
    loop {
        std::thread::park();
    }
}
