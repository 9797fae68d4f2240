//! File and directory integrity monitoring
//!
//! An [`IntegrityMonitor`] records the expected hash of its target, checks it
//! once immediately and then rechecks on every relevant file system event
//! until it is stopped or dropped.

mod events;
mod handler;

pub use handler::{IntegrityHandler, IntegrityViolation, LoggingHandler};

use crossbeam::channel::{self, Receiver, Sender};
use events::requires_recheck;
use hashtegrity_core::{Error, Result};
use hashtegrity_hashing::{generate_directory_hash, generate_file_hash, DirectoryHashOptions};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Monitored entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorTarget {
    File(PathBuf),
    Directory(PathBuf),
}

impl MonitorTarget {
    /// Monitored path
    pub fn path(&self) -> &Path {
        match self {
            MonitorTarget::File(path) | MonitorTarget::Directory(path) => path,
        }
    }

    /// `file` or `directory`
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorTarget::File(_) => "file",
            MonitorTarget::Directory(_) => "directory",
        }
    }

    fn compute_hash(&self, options: &DirectoryHashOptions) -> Result<String> {
        match self {
            MonitorTarget::File(path) => generate_file_hash(path, &options.hash),
            MonitorTarget::Directory(path) => generate_directory_hash(path, options),
        }
    }

    fn recursive_mode(&self) -> RecursiveMode {
        match self {
            MonitorTarget::File(_) => RecursiveMode::NonRecursive,
            MonitorTarget::Directory(_) => RecursiveMode::Recursive,
        }
    }
}

/// Options for monitoring integrity
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// What to watch
    pub target: MonitorTarget,
    /// Hash options; include/exclude/structure only apply to directories
    pub hash: DirectoryHashOptions,
    /// Expected hash; computed from the current state when absent
    pub expected_hash: Option<String>,
}

impl MonitorOptions {
    /// Monitor `target` with default hash options
    pub fn new(target: MonitorTarget) -> Self {
        Self {
            target,
            hash: DirectoryHashOptions::default(),
            expected_hash: None,
        }
    }

    /// Set the hash options
    pub fn hash(mut self, hash: DirectoryHashOptions) -> Self {
        self.hash = hash;
        self
    }

    /// Set the expected hash
    pub fn expected_hash(mut self, expected_hash: impl Into<String>) -> Self {
        self.expected_hash = Some(expected_hash.into());
        self
    }
}

/// Recomputes the target hash and reports the outcome to the handler
struct Checker {
    target: MonitorTarget,
    options: DirectoryHashOptions,
    expected_hash: String,
    handler: Arc<dyn IntegrityHandler>,
}

impl Checker {
    fn check(&self) -> Result<bool> {
        let actual_hash = self.target.compute_hash(&self.options)?;
        if actual_hash == self.expected_hash {
            tracing::trace!(path = %self.target.path().display(), "integrity intact");
            return Ok(true);
        }

        let violation = IntegrityViolation {
            kind: self.target.kind(),
            path: self.target.path().to_path_buf(),
            expected_hash: self.expected_hash.clone(),
            actual_hash,
        };
        self.handler.on_integrity_check_failed(&violation);
        Ok(false)
    }

    fn check_and_report(&self) {
        if let Err(error) = self.check() {
            self.handler.on_error(error);
        }
    }

    fn structural(&self) -> bool {
        matches!(self.target, MonitorTarget::Directory(_)) && self.options.include_structure
    }
}

/// Running integrity monitor
///
/// Watching stops when [`IntegrityMonitor::stop`] is called or the monitor is
/// dropped.
pub struct IntegrityMonitor {
    checker: Arc<Checker>,
    watcher: Option<RecommendedWatcher>,
    shutdown: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl IntegrityMonitor {
    /// Start monitoring
    ///
    /// Fails when the expected hash must be computed and the target cannot be
    /// hashed, or when the watcher cannot be installed. The immediate check
    /// reports through `handler` like every later check.
    pub fn start(options: MonitorOptions, handler: impl IntegrityHandler) -> Result<Self> {
        let MonitorOptions {
            target,
            hash,
            expected_hash,
        } = options;

        let expected_hash = match expected_hash {
            Some(expected) => expected,
            None => target.compute_hash(&hash)?,
        };

        let checker = Arc::new(Checker {
            target,
            options: hash,
            expected_hash,
            handler: Arc::new(handler),
        });

        let (event_tx, event_rx) = channel::unbounded();
        let (shutdown_tx, shutdown_rx) = channel::bounded(1);

        let path = checker.target.path().to_path_buf();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
            let _ = event_tx.send(event);
        })
        .map_err(|e| watch_error(&path, e))?;

        watcher
            .watch(&path, checker.target.recursive_mode())
            .map_err(|e| watch_error(&path, e))?;

        let worker_checker = Arc::clone(&checker);
        let worker = thread::Builder::new()
            .name("hashtegrity-monitor".to_string())
            .spawn(move || run_worker(&worker_checker, &event_rx, &shutdown_rx))
            .map_err(|e| Error::watch(&path, "failed to spawn monitor thread", Some(e.into())))?;

        tracing::info!(
            path = %path.display(),
            kind = checker.target.kind(),
            expected = %checker.expected_hash,
            "monitoring integrity"
        );

        checker.check_and_report();

        Ok(Self {
            checker,
            watcher: Some(watcher),
            shutdown: Some(shutdown_tx),
            worker: Some(worker),
        })
    }

    /// Monitored target
    pub fn target(&self) -> &MonitorTarget {
        &self.checker.target
    }

    /// Hash the target is compared against
    pub fn expected_hash(&self) -> &str {
        &self.checker.expected_hash
    }

    /// Recheck immediately; violations also go to the handler
    pub fn check_now(&self) -> Result<bool> {
        self.checker.check()
    }

    /// Stop watching and wait for the worker thread to exit
    pub fn stop(&mut self) {
        // Dropping the watcher closes the event channel
        self.watcher.take();
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("integrity monitor thread panicked");
            }
            tracing::debug!(path = %self.checker.target.path().display(), "monitor stopped");
        }
    }
}

impl Drop for IntegrityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(
    checker: &Checker,
    events: &Receiver<notify::Result<notify::Event>>,
    shutdown: &Receiver<()>,
) {
    loop {
        crossbeam::select! {
            recv(events) -> message => match message {
                Ok(Ok(event)) => {
                    if requires_recheck(&event.kind, checker.structural()) {
                        tracing::debug!(kind = ?event.kind, paths = ?event.paths, "change detected");
                        checker.check_and_report();
                    }
                }
                Ok(Err(e)) => {
                    let path = checker.target.path().to_path_buf();
                    checker.handler.on_error(watch_error(&path, e));
                }
                Err(_) => break,
            },
            recv(shutdown) -> _ => break,
        }
    }
}

fn watch_error(path: &Path, error: notify::Error) -> Error {
    Error::watch(path, error.to_string(), Some(Box::new(error)))
}
