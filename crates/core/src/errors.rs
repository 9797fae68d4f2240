use std::path::PathBuf;

/// Result type alias for hashtegrity operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hashtegrity operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Proof requested for a leaf that does not exist
    #[error("leaf index {index} is out of range for a tree with {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    /// Serialized tree document could not be turned back into a tree
    #[error("deserialization failed: {message}")]
    Deserialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Hash algorithm identifier is not recognised
    #[error("unsupported hash algorithm '{algorithm}'")]
    UnsupportedAlgorithm { algorithm: String },

    /// Hexadecimal input could not be decoded
    #[error("invalid hex value '{value}': {source}")]
    InvalidHex {
        value: String,
        #[source]
        source: hex::FromHexError,
    },

    /// A file or directory that must exist is missing
    #[error("{kind} not found: '{}'", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File watcher errors
    #[error("failed to watch '{}': {message}", .path.display())]
    Watch {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an out-of-range leaf index error
    #[must_use]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Create a deserialization error
    #[must_use]
    pub fn deserialization(message: impl Into<String>) -> Self {
        Error::Deserialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a deserialization error with a source error
    #[must_use]
    pub fn deserialization_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Deserialization {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unsupported algorithm error
    #[must_use]
    pub fn unsupported_algorithm(algorithm: impl Into<String>) -> Self {
        Error::UnsupportedAlgorithm {
            algorithm: algorithm.into(),
        }
    }

    /// Create an invalid hex error
    #[must_use]
    pub fn invalid_hex(value: impl Into<String>, source: hex::FromHexError) -> Self {
        Error::InvalidHex {
            value: value.into(),
            source,
        }
    }

    /// Create a missing file error
    #[must_use]
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound {
            kind: "file",
            path: path.into(),
        }
    }

    /// Create a missing directory error
    #[must_use]
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound {
            kind: "directory",
            path: path.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a JSON error with a custom message
    #[must_use]
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a watcher error
    #[must_use]
    pub fn watch(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Watch {
            path: path.into(),
            message: message.into(),
            source,
        }
    }
}

// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", message.into(), base_error),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", f(), base_error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let err = Error::index_out_of_range(5, 3);
        assert_eq!(
            err.to_string(),
            "leaf index 5 is out of range for a tree with 3 leaves"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::file_not_found("/missing/file.txt");
        assert_eq!(err.to_string(), "file not found: '/missing/file.txt'");

        let err = Error::directory_not_found("/missing");
        assert_eq!(err.to_string(), "directory not found: '/missing'");
    }

    #[test]
    fn test_context_wraps_message() {
        let result: std::result::Result<(), Error> =
            Err(Error::unsupported_algorithm("md4"));
        let err = result.context("loading config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: loading config: unsupported hash algorithm 'md4'"
        );
    }

    #[test]
    fn test_deserialization_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::deserialization_with_source("bad document", source);
        assert!(matches!(err, Error::Deserialization { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
