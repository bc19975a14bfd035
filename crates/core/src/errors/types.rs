//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for reattempt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure error type for configuration and I/O around the retry engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A single setting holds a value that cannot be used
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
