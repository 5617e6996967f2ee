//! The decoder boundary: frame-at-a-time sample sources.
//!
//! The real decoder lives outside the core. In here we only define the
//! pull interface the engine drives, plus a deterministic tone source that
//! stands in for a decoder in tests and in the console shell.

use crate::audio::AudioFrame;
use crate::error::Result;

/// One opened track, pulled one stereo frame at a time.
///
/// `Ok(None)` is the natural end of the track.
pub trait SampleSource {
    fn next_frame(&mut self) -> Result<Option<AudioFrame>>;
}

/// Opens a leaf path as a sample source.
pub trait TrackOpener {
    fn open(&self, path: &str) -> Result<Box<dyn SampleSource>>;
}

/// Fixed-length sine tone stand-in for a decoded track.
#[derive(Debug)]
pub struct ToneSource {
    remaining: u32,
    phase: f32,
    step: f32,
}

impl ToneSource {
    pub fn new(freq_hz: f32, sample_rate: u32, frames: u32) -> Self {
        Self {
            remaining: frames,
            phase: 0.0,
            step: std::f32::consts::TAU * freq_hz / sample_rate as f32,
        }
    }
}

impl SampleSource for ToneSource {
    fn next_frame(&mut self) -> Result<Option<AudioFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        let s = self.phase.sin() * 0.25;
        self.phase += self.step;
        if self.phase >= std::f32::consts::TAU {
            self.phase -= std::f32::consts::TAU;
        }
        Ok(Some(AudioFrame::new(s, s)))
    }
}

/// Opens every path as a [`ToneSource`], pitch derived from the path so
/// different tracks are audibly different.
#[derive(Debug)]
pub struct ToneOpener {
    sample_rate: u32,
    frames_per_track: u32,
}

impl ToneOpener {
    pub fn new(sample_rate: u32, frames_per_track: u32) -> Self {
        Self {
            sample_rate,
            frames_per_track,
        }
    }
}

impl TrackOpener for ToneOpener {
    fn open(&self, path: &str) -> Result<Box<dyn SampleSource>> {
        let seed: u32 = path.bytes().map(u32::from).sum();
        let freq = 220.0 + (seed % 24) as f32 * 20.0;
        Ok(Box::new(ToneSource::new(
            freq,
            self.sample_rate,
            self.frames_per_track,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_source_ends_after_its_length() {
        let mut src = ToneSource::new(440.0, 44100, 3);
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn tone_amplitude_is_bounded() {
        let mut src = ToneSource::new(440.0, 44100, 1000);
        while let Some(f) = src.next_frame().unwrap() {
            assert!(f.left.abs() <= 0.25);
            assert_eq!(f.left, f.right);
        }
    }
}
