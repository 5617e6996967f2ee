//! Player events.
//!
//! The engine queues events as it works; the outer loop drains them once
//! per iteration and forwards them wherever it likes (the console shell
//! logs them, a display layer would render them). A plain queue is all a
//! single cooperative thread needs.

/// Events emitted by the playback engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A play session began (e.g., a tag was scanned).
    SessionStarted { key: String },
    /// The session ended; its resume position was persisted.
    SessionEnded,
    /// A new track is playing.
    TrackStarted { path: String },
    /// A track could not be opened and was skipped.
    TrackError { path: String },
    /// Forward traversal exhausted the whole tree.
    PlaylistFinished,
    Paused,
    Resumed,
}
