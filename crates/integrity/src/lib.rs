//! Integrity validation and monitoring for hashtegrity
//!
//! [`validate_integrity`] compares a freshly computed hash of data, a file or
//! a directory against an expected value. [`IntegrityMonitor`] keeps doing so
//! whenever the file system reports a change.

pub mod monitor;
pub mod validate;

pub use monitor::{
    IntegrityHandler, IntegrityMonitor, IntegrityViolation, LoggingHandler, MonitorOptions,
    MonitorTarget,
};
pub use validate::{validate_integrity, ValidationTarget};
