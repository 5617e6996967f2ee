//! Error types for tagdeck-player
//!
//! Defines shell-specific error types using thiserror for clear error
//! propagation. Core errors pass through untouched.

use thiserror::Error;

/// Main error type for tagdeck-player
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio output device errors
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Core playback errors
    #[error(transparent)]
    Core(#[from] tagdeck_core::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using tagdeck-player Error
pub type Result<T> = std::result::Result<T, Error>;
