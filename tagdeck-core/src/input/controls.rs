//! Maps the two transport buttons onto engine commands.
//!
//! Forward click skips ahead, rewind click skips back. Holding forward
//! seeks (repeated commands while held, the engine chains swallow windows),
//! holding rewind restarts the current track (once per hold).

use crate::input::button::DebouncedButton;
use crate::playback::TransportCommand;

/// The forward/rewind button pair.
pub struct Controls {
    forward: DebouncedButton,
    rewind: DebouncedButton,
    restart_fired: bool,
}

impl Controls {
    pub fn new(forward: DebouncedButton, rewind: DebouncedButton) -> Self {
        Self {
            forward,
            rewind,
            restart_fired: false,
        }
    }

    /// Feed one raw reading per button, collect any commands they produce.
    pub fn update(
        &mut self,
        forward_pressed: bool,
        rewind_pressed: bool,
        now_ms: u32,
    ) -> Vec<TransportCommand> {
        self.forward.update(forward_pressed, now_ms);
        self.rewind.update(rewind_pressed, now_ms);

        let mut commands = Vec::new();
        if self.forward.was_clicked() {
            commands.push(TransportCommand::Next);
        }
        if self.rewind.was_clicked() {
            commands.push(TransportCommand::Previous);
        }
        if self.forward.is_held(now_ms) {
            commands.push(TransportCommand::SeekForward);
        }
        if self.rewind.is_held(now_ms) {
            if !self.restart_fired {
                self.restart_fired = true;
                commands.push(TransportCommand::Restart);
            }
        } else if !self.rewind.is_pressed() {
            self.restart_fired = false;
        }
        commands
    }
}
