//! Output gate: timed interruption, fades and swallow between the decode
//! loop and the sink.
//!
//! The decode loop is greedy: left alone it feeds the sink until the sink
//! reports full. The gate sits in between and gives the control loop a
//! second way to get the decode loop to yield: arm a countdown of N
//! samples, and the call on which the countdown reaches zero returns false
//! no matter what the sink said. While counting, the gate can also
//! transform the stream (linear fade in/out) or swallow it entirely
//! (silent fast-forward).
//!
//! One contract governs the return value in every mode, so the decode
//! loop never special-cases. After a false return the caller checks
//! [`OutputGate::is_special_mode_active`]: false means the countdown
//! elapsed, true means real sink backpressure.

use crate::audio::AudioFrame;
use crate::output::sink::AudioSink;

/// Gating mode. `Normal` is plain pass-through with no countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    Normal,
    Interrupt,
    Swallow,
    FadeIn,
    FadeOut,
}

/// Wraps an owned sink, gating each frame.
#[derive(Debug)]
pub struct OutputGate<S: AudioSink> {
    sink: S,
    mode: GateMode,
    remaining: u32,
    fade_span: u32,
}

impl<S: AudioSink> OutputGate<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            mode: GateMode::Normal,
            remaining: 0,
            fade_span: 0,
        }
    }

    /// Feed one frame through the gate.
    ///
    /// Returns the sink's keep-feeding verdict, except that the frame on
    /// which an armed countdown reaches zero reverts to `Normal` and
    /// returns false regardless of the transform branch taken.
    pub fn consume_sample(&mut self, frame: AudioFrame) -> bool {
        if self.mode == GateMode::Normal {
            return self.sink.consume(frame);
        }

        let ret = match self.mode {
            GateMode::Interrupt => self.sink.consume(frame),
            // consume the frame in "no" time, forwarding nothing
            GateMode::Swallow => true,
            GateMode::FadeOut | GateMode::FadeIn => {
                let mut scale = self.remaining as f32 / self.fade_span as f32;
                if self.mode == GateMode::FadeIn {
                    scale = 1.0 - scale;
                }
                self.sink.consume(frame.scaled(scale))
            }
            GateMode::Normal => unreachable!(),
        };

        self.remaining -= 1;
        if self.remaining == 0 {
            self.mode = GateMode::Normal;
            return false;
        }
        ret
    }

    /// Pass through at most `samples` frames before yielding control.
    ///
    /// Arming with 0 disarms straight back to `Normal`.
    pub fn set_timeout(&mut self, samples: u32) {
        self.arm(GateMode::Interrupt, samples);
    }

    /// Ramp linearly to silence over `samples` frames.
    pub fn fade_out(&mut self, samples: u32) {
        self.arm(GateMode::FadeOut, samples);
    }

    /// Ramp linearly from silence to full amplitude over `samples` frames.
    pub fn fade_in(&mut self, samples: u32) {
        self.arm(GateMode::FadeIn, samples);
    }

    /// Swallow `samples` frames without forwarding them to the sink.
    pub fn set_swallow(&mut self, samples: u32) {
        self.arm(GateMode::Swallow, samples);
    }

    pub fn is_special_mode_active(&self) -> bool {
        self.mode != GateMode::Normal
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn arm(&mut self, mode: GateMode, samples: u32) {
        if samples == 0 {
            self.mode = GateMode::Normal;
            self.remaining = 0;
            return;
        }
        self.mode = mode;
        self.remaining = samples;
        self.fade_span = samples;
    }
}
