//! The audio sink capability and in-memory implementations.

use crate::audio::AudioFrame;

/// Accepts finished audio frames for physical output.
///
/// `consume` returns true while the caller may keep feeding; false means
/// the sink is full and the decode loop should yield.
pub trait AudioSink {
    fn consume(&mut self, frame: AudioFrame) -> bool;
}

/// Bounded in-memory sink that records every frame it accepts.
///
/// Reports full when the buffer reaches capacity, which makes sink
/// backpressure reproducible in tests.
#[derive(Debug)]
pub struct BufferSink {
    frames: Vec<AudioFrame>,
    capacity: usize,
}

impl BufferSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            capacity,
        }
    }

    pub fn frames(&self) -> &[AudioFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl AudioSink for BufferSink {
    fn consume(&mut self, frame: AudioFrame) -> bool {
        if self.frames.len() >= self.capacity {
            return false;
        }
        self.frames.push(frame);
        self.frames.len() < self.capacity
    }
}

/// Discards everything, never reports full. Used by benchmarks.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn consume(&mut self, _frame: AudioFrame) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_reports_full_at_capacity() {
        let mut sink = BufferSink::new(2);
        assert!(sink.consume(AudioFrame::SILENCE));
        assert!(!sink.consume(AudioFrame::SILENCE));
        // at capacity: frame refused
        assert!(!sink.consume(AudioFrame::SILENCE));
        assert_eq!(sink.len(), 2);
    }
}
