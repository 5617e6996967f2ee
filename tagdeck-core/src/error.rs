//! Error types for tagdeck-core
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Most of the core degrades gracefully instead of erroring
//! (an unreadable directory becomes an empty playlist, traversal past the
//! end yields `None`); these variants cover the collaborator boundaries
//! where a real failure has to surface.

use thiserror::Error;

/// Main error type for tagdeck-core
#[derive(Error, Debug)]
pub enum Error {
    /// Directory listing errors from the media tree collaborator
    #[error("Listing error: {0}")]
    Listing(String),

    /// Track could not be opened by the decoder collaborator
    #[error("Track open error: {0}")]
    TrackOpen(String),

    /// Decoder failed mid-track
    #[error("Decode error: {0}")]
    Decode(String),

    /// Resume store load/save errors
    #[error("Resume store error: {0}")]
    Store(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using tagdeck-core Error
pub type Result<T> = std::result::Result<T, Error>;
