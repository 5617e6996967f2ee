//! # Tagdeck Core Library
//!
//! Playback-control core for a tag-triggered audio player:
//! - Hierarchical playlist traversal with persisted resume positions
//! - Sample-level output gating (timed interruption, fades, swallow)
//! - Debounced button input with click/hold detection
//! - The cooperative playback engine tying the three together
//!
//! The core is pure logic: no filesystem, no audio device, no threads.
//! Hardware and OS concerns enter through the collaborator traits
//! ([`library::MediaTree`], [`store::ResumeStore`], [`playback::TrackOpener`],
//! [`output::AudioSink`], [`clock::MillisClock`]); in-memory implementations
//! of each live beside the traits so everything is testable without a device.

pub mod audio;
pub mod clock;
pub mod error;
pub mod events;
pub mod input;
pub mod library;
pub mod output;
pub mod playback;
pub mod status;
pub mod store;

pub use audio::AudioFrame;
pub use error::{Error, Result};
