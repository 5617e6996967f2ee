//! Debounced button with click and hold detection.
//!
//! A four-state machine (Off, Rising, On, Falling) rather than a plain
//! boolean: the intermediate states absorb contact bounce, and the On
//! dwell time distinguishes a short click from a deliberate hold.
//!
//! All timestamp arithmetic uses wrapping subtraction against a u32
//! millisecond clock. The steady states clamp `last_change_ms` forward so
//! that after hours of idle the difference can never wrap into a bogus
//! hold or debounce decision.

/// Default stability window before a raw edge is accepted.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default press duration that turns a click into a hold.
pub const DEFAULT_HOLD_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonState {
    Off,
    Rising,
    On,
    Falling,
}

/// Debounces one raw digital input into pressed/held/clicked signals.
///
/// `update` consumes one raw reading per call at a roughly fixed polling
/// interval; the query methods report the settled state.
#[derive(Debug)]
pub struct DebouncedButton {
    state: ButtonState,
    was_clicked: bool,
    last_change_ms: u32,
    debounce_ms: u32,
    hold_ms: u32,
}

impl DebouncedButton {
    pub fn new(debounce_ms: u32, hold_ms: u32, now_ms: u32) -> Self {
        Self {
            state: ButtonState::Off,
            was_clicked: false,
            last_change_ms: now_ms,
            debounce_ms,
            hold_ms,
        }
    }

    pub fn with_defaults(now_ms: u32) -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS, DEFAULT_HOLD_MS, now_ms)
    }

    /// True if the button is currently pressed (not bouncing).
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, ButtonState::On | ButtonState::Falling)
    }

    /// True if the button is pressed and has been held for at least the
    /// hold time.
    pub fn is_held(&self, now_ms: u32) -> bool {
        self.state == ButtonState::On
            && now_ms.wrapping_sub(self.last_change_ms) >= self.hold_ms
    }

    /// True once after a qualifying short press-and-release, then clears.
    ///
    /// A hold is deliberately not also a click.
    pub fn was_clicked(&mut self) -> bool {
        if self.was_clicked {
            self.was_clicked = false;
            return true;
        }
        false
    }

    /// Feed one raw reading.
    pub fn update(&mut self, pressed: bool, now_ms: u32) {
        let elapsed = now_ms.wrapping_sub(self.last_change_ms);
        if pressed {
            match self.state {
                ButtonState::On => {
                    // steady state: keep the timestamp within hold range
                    if elapsed > self.hold_ms {
                        self.last_change_ms = now_ms.wrapping_sub(self.hold_ms);
                    }
                }
                ButtonState::Rising => {
                    if elapsed >= self.debounce_ms {
                        self.last_change_ms = now_ms;
                        self.state = ButtonState::On;
                    }
                }
                ButtonState::Falling => {
                    // contrary reading aborts the release immediately
                    self.last_change_ms = now_ms;
                    self.state = ButtonState::Rising;
                }
                ButtonState::Off => {
                    self.last_change_ms = now_ms;
                    self.state = ButtonState::Rising;
                }
            }
        } else {
            match self.state {
                ButtonState::Off => {
                    if elapsed > self.hold_ms {
                        self.last_change_ms = now_ms.wrapping_sub(self.hold_ms);
                    }
                }
                ButtonState::Falling => {
                    if elapsed >= self.debounce_ms {
                        self.last_change_ms = now_ms;
                        self.state = ButtonState::Off;
                    }
                }
                ButtonState::Rising => {
                    // contrary reading aborts the press immediately
                    self.last_change_ms = now_ms;
                    self.state = ButtonState::Off;
                }
                ButtonState::On => {
                    if !self.is_held(now_ms) {
                        self.was_clicked = true;
                    }
                    self.last_change_ms = now_ms;
                    self.state = ButtonState::Falling;
                }
            }
        }
    }
}
