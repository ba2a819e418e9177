/*!
 * Error types for the subflash application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading a subtitle file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// None of the candidate encodings decoded the file cleanly.
    /// Recoverable: the first candidate is used with replacement characters.
    #[error("Can't decode subtitles with any of [{}], please convert them to UTF-8", tried.join(", "))]
    DecodeFailure {
        /// Encoding labels that were attempted, in order
        tried: Vec<String>,
    },

    /// A caption record is structurally broken
    #[error("Failed to parse subtitle file '{file}': {reason}\nIncorrect subtitle:\n{record}")]
    ParseFailure {
        /// File name (or "<memory>" for in-memory content)
        file: String,
        /// The raw record that failed
        record: String,
        /// What went wrong
        reason: String,
    },

    /// The file extension does not map to a known caption format
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// Reading the file failed
    #[error("Subtitle I/O error: {0}")]
    Io(String),
}

impl SubtitleError {
    /// Whether the pipeline can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }
}

impl From<std::io::Error> for SubtitleError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
