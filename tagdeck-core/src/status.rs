//! Player status for an external display/LED layer.
//!
//! Explicit named fields instead of a packed status word: a persistent
//! phase, a sticky error flag, and transient notices that expire on their
//! own after a short TTL. The display layer polls this each tick; nothing
//! here touches pins or PWM.

/// Default lifetime of a transient notice.
pub const DEFAULT_NOTICE_TTL_MS: u32 = 500;

/// Persistent playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayPhase {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Short-lived conditions a display may want to flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    TrackChanged,
    EndOfPlaylist,
    TrackFailed,
}

/// The status board consumed by the display layer.
#[derive(Debug, Default)]
pub struct StatusBoard {
    phase: PlayPhase,
    error: bool,
    notices: Vec<(Notice, u32)>,
    ttl_ms: u32,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            ttl_ms: DEFAULT_NOTICE_TTL_MS,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: PlayPhase) {
        self.phase = phase;
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn set_error(&mut self, on: bool) {
        self.error = on;
    }

    /// Raise a transient notice; re-raising extends its expiry.
    pub fn raise(&mut self, notice: Notice, now_ms: u32) {
        let expiry = now_ms.wrapping_add(self.ttl_ms);
        if let Some(slot) = self.notices.iter_mut().find(|(n, _)| *n == notice) {
            slot.1 = expiry;
        } else {
            self.notices.push((notice, expiry));
        }
    }

    pub fn notice_active(&self, notice: Notice) -> bool {
        self.notices.iter().any(|(n, _)| *n == notice)
    }

    /// Expire stale notices. Call once per outer-loop iteration.
    pub fn tick(&mut self, now_ms: u32) {
        // wrap-safe "now has reached expiry" test
        self.notices
            .retain(|(_, expiry)| now_ms.wrapping_sub(*expiry) >= u32::MAX / 2);
    }

    /// Nothing playing and no live notice.
    pub fn is_idle(&self) -> bool {
        self.phase == PlayPhase::Idle && self.notices.is_empty()
    }
}
