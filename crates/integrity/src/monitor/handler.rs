//! Callbacks invoked by the integrity monitor

use hashtegrity_core::Error;
use std::fmt;
use std::path::PathBuf;

/// A recomputed hash that no longer matches the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    /// `file` or `directory`
    pub kind: &'static str,
    /// Monitored path
    pub path: PathBuf,
    /// Hash the target is expected to have
    pub expected_hash: String,
    /// Hash computed after the change
    pub actual_hash: String,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integrity check failed for {}: {}",
            self.kind,
            self.path.display()
        )
    }
}

/// Receives the outcome of monitor checks
///
/// Callbacks run on the caller's thread for the initial check and for
/// `check_now`, and on the monitor's worker thread for event-driven checks.
pub trait IntegrityHandler: Send + Sync + 'static {
    /// Called when a recomputed hash differs from the expected hash
    fn on_integrity_check_failed(&self, violation: &IntegrityViolation) {
        tracing::warn!(
            path = %violation.path.display(),
            expected = %violation.expected_hash,
            actual = %violation.actual_hash,
            "{violation}"
        );
    }

    /// Called when a hash could not be computed
    fn on_error(&self, error: Error) {
        tracing::error!(%error, "integrity monitor error");
    }
}

/// Handler that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl IntegrityHandler for LoggingHandler {}
