//! Error handling for soundsplit
//!
//! Every failure is fatal to the current pipeline invocation. Callers that
//! process many files report the error kind and move on to the next file.

use thiserror::Error;

/// Result type alias for soundsplit operations
pub type Result<T> = std::result::Result<T, SoundError>;

/// Main error type for soundsplit operations
#[derive(Error, Debug)]
pub enum SoundError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read audio file: {path}")]
    AudioRead {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWrite {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Pipeline Errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Inconsistent sample rate: expected {expected} Hz, got {actual} Hz")]
    InconsistentRate { expected: u32, actual: u32 },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SoundError {
    /// Shorthand for building an `InvalidInput` error
    pub fn invalid(reason: impl Into<String>) -> Self {
        SoundError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    ///
    /// An unreadable container is reported as `UNSUPPORTED_FORMAT`, the same
    /// kind as a container with the wrong sample width.
    pub fn error_code(&self) -> &'static str {
        match self {
            SoundError::FileNotFound { .. } => "FILE_NOT_FOUND",
            SoundError::AudioRead { .. } => "UNSUPPORTED_FORMAT",
            SoundError::AudioWrite { .. } => "WRITE_FAILED",
            SoundError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            SoundError::InvalidInput { .. } => "INVALID_INPUT",
            SoundError::InconsistentRate { .. } => "INCONSISTENT_RATE",
            SoundError::Io(_) => "IO_ERROR",
            SoundError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
