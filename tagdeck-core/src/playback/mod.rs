//! The cooperative playback engine and its decoder boundary.

pub mod engine;
pub mod source;

pub use engine::{EngineConfig, PlayerEngine, TransportCommand};
pub use source::{SampleSource, ToneOpener, ToneSource, TrackOpener};
