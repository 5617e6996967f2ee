//! Console front end.
//!
//! Stands in for the tag reader and the physical buttons: console commands
//! synthesize raw press windows that run through the real debounce machine,
//! so the input path exercised here is the one the device would use. A
//! helper thread feeds stdin lines into a channel; the cooperative loop
//! itself stays single-threaded.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use tagdeck_core::clock::MillisClock;
use tagdeck_core::input::Controls;
use tagdeck_core::output::AudioSink;
use tagdeck_core::playback::PlayerEngine;
use tracing::{info, warn};

/// Synthesizes a raw digital input from timed console presses.
struct VirtualButton {
    press: Option<(u32, u32)>, // (start_ms, duration_ms)
}

impl VirtualButton {
    fn new() -> Self {
        Self { press: None }
    }

    fn press_for(&mut self, now_ms: u32, duration_ms: u32) {
        self.press = Some((now_ms, duration_ms));
    }

    /// The raw reading at `now_ms`.
    fn read(&mut self, now_ms: u32) -> bool {
        match self.press {
            Some((start, duration)) => {
                if now_ms.wrapping_sub(start) < duration {
                    true
                } else {
                    self.press = None;
                    false
                }
            }
            None => false,
        }
    }
}

/// The interactive control loop.
pub struct Console<S: AudioSink, C: MillisClock> {
    engine: PlayerEngine<S>,
    controls: Controls,
    clock: C,
    poll_interval: Duration,
    click_ms: u32,
    hold_press_ms: u32,
    forward: VirtualButton,
    rewind: VirtualButton,
}

impl<S: AudioSink, C: MillisClock> Console<S, C> {
    pub fn new(
        engine: PlayerEngine<S>,
        controls: Controls,
        clock: C,
        poll_interval: Duration,
        debounce_ms: u32,
        hold_ms: u32,
    ) -> Self {
        Self {
            engine,
            controls,
            clock,
            poll_interval,
            // long enough to settle the debounce, short enough to stay a click
            click_ms: debounce_ms * 2 + 20,
            hold_press_ms: hold_ms + debounce_ms * 2 + 100,
            forward: VirtualButton::new(),
            rewind: VirtualButton::new(),
        }
    }

    /// Run until `q` or stdin closes.
    pub fn run(&mut self) {
        let lines = spawn_stdin_reader();
        print_help();

        loop {
            let now = self.clock.now_ms();

            match lines.try_recv() {
                Ok(line) => {
                    if !self.dispatch(line.trim(), now) {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }

            let fwd = self.forward.read(now);
            let rwd = self.rewind.read(now);
            for command in self.controls.update(fwd, rwd, now) {
                self.engine.handle_command(command);
            }

            self.engine.pump();
            self.engine.tick(now);
            for event in self.engine.take_events() {
                info!(?event, "player event");
            }

            thread::sleep(self.poll_interval);
        }

        self.engine.end_session();
        for event in self.engine.take_events() {
            info!(?event, "player event");
        }
    }

    /// Handle one console line. Returns false to quit.
    fn dispatch(&mut self, line: &str, now: u32) -> bool {
        match line.split_once(' ') {
            Some(("play", dir)) => {
                // the directory name doubles as the session (tag) key
                self.engine.start_session(dir.trim(), dir.trim());
            }
            _ => match line {
                "play" => self.engine.start_session("default", ""),
                "stop" => self.engine.end_session(),
                "n" => self.forward.press_for(now, self.click_ms),
                "p" => self.rewind.press_for(now, self.click_ms),
                "f" => self.forward.press_for(now, self.hold_press_ms),
                "r" => self.rewind.press_for(now, self.hold_press_ms),
                "pause" => self.engine.pause(),
                "resume" => self.engine.resume(),
                "q" => return false,
                "" => {}
                other => {
                    warn!("unknown command: {other:?}");
                    print_help();
                }
            },
        }
        true
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

fn print_help() {
    println!("commands:");
    println!("  play [dir]   start a session for a library directory (tag scan)");
    println!("  stop         end the session (tag removed)");
    println!("  n / p        click forward / rewind");
    println!("  f / r        hold forward (seek) / rewind (restart)");
    println!("  pause, resume, q");
}
