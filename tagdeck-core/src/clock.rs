//! Millisecond clock abstraction.
//!
//! The whole core times itself off a single monotonic-but-wrapping u32
//! millisecond clock. Consumers must use wrapping subtraction exclusively;
//! the device runs unattended long enough for the counter to roll over.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond clock, wrapping at u32::MAX.
pub trait MillisClock {
    fn now_ms(&self) -> u32;
}

/// Real clock backed by [`Instant`], truncated to wrapping u32 millis.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MillisClock for SystemClock {
    fn now_ms(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}

/// Hand-cranked clock for tests.
pub struct ManualClock {
    ms: Cell<u32>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(delta_ms));
    }

    pub fn set(&self, now_ms: u32) {
        self.ms.set(now_ms);
    }
}

impl MillisClock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.ms.get()
    }
}
