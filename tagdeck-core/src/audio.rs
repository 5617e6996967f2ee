//! Audio frame type shared across the output path.
//!
//! Everything downstream of the decoder works in stereo `f32` frames in
//! `[-1.0, 1.0]`. The gate scales frames, sinks consume them; nobody else
//! touches sample data.

/// One stereo sample frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioFrame {
    pub left: f32,
    pub right: f32,
}

impl AudioFrame {
    /// A silent frame.
    pub const SILENCE: AudioFrame = AudioFrame { left: 0.0, right: 0.0 };

    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Both channels scaled by `gain`.
    pub fn scaled(self, gain: f32) -> Self {
        Self {
            left: self.left * gain,
            right: self.right * gain,
        }
    }
}
