//! Configuration management for hashtegrity
//!
//! Settings are layered with increasing precedence: built-in defaults, a JSON
//! configuration file, environment variables, then command-line overrides.

pub mod config;
pub mod loader;

pub use config::{Config, ConfigBuilder, ConfigOverrides, ConfigSource, FileConfig};
pub use loader::ConfigLoader;
