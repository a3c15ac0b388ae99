//! Common error types for trial cropping

use thiserror::Error;

/// Common result type for sj-common operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the library and the command-line tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Trial file could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Proposed crop range fails validation against the recording range
    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    /// Recording is too short to be cropped at all
    #[error("Cropping unavailable: recording lasts {duration_ms} ms")]
    CropUnavailable { duration_ms: i64 },
}
