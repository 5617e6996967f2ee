//! The media library: directory listing abstraction and playlist traversal.

pub mod playlist;
pub mod tree;

pub use playlist::Playlist;
pub use tree::{EntryKind, MediaEntry, MediaTree, MemoryTree};
