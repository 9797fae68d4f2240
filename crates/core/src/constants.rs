/// Constants used throughout the hashtegrity codebase
// Hashing defaults
pub const DEFAULT_INCLUDE_PATTERN: &str = "**/*";

// Streaming read size for file hashing
pub const FILE_READ_CHUNK_SIZE: usize = 8192;

// Metadata key bound to each file when directory structure is hashed
pub const FILE_PATH_METADATA_KEY: &str = "filePath";

// Configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = "hashtegrity.json";

// Environment variable names
pub const HASHTEGRITY_ALGORITHM_VAR: &str = "HASHTEGRITY_ALGORITHM";
pub const HASHTEGRITY_KEY_VAR: &str = "HASHTEGRITY_KEY";
pub const HASHTEGRITY_CONFIG_VAR: &str = "HASHTEGRITY_CONFIG";
pub const HASHTEGRITY_LOG_VAR: &str = "HASHTEGRITY_LOG";
