//! The cooperative playback engine.
//!
//! One logical thread takes turns decoding and handling input. [`PlayerEngine::pump`]
//! feeds frames from the open source through the output gate until either
//! the sink backs up or the gate's armed sample budget elapses, then hands
//! control back to the outer loop. Skips and pauses are never preemptive:
//! the engine arms a fade or swallow window and records what to do once
//! the window's countdown elapses.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::events::PlayerEvent;
use crate::library::{MediaTree, Playlist};
use crate::output::{AudioSink, OutputGate};
use crate::playback::source::{SampleSource, TrackOpener};
use crate::status::{Notice, PlayPhase, StatusBoard};
use crate::store::ResumeStore;

/// Navigation commands from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Next,
    Previous,
    /// Held forward button: silently race ahead one chunk.
    SeekForward,
    /// Held rewind button: current track from the top.
    Restart,
}

/// What to do when the armed gate window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    Advance,
    Retreat,
    Reopen,
    Pause,
}

/// Sample budgets for the gate, all in stereo frames.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Frames decoded per pump slice before control returns to the loop.
    pub control_budget: u32,
    /// Fade window around user-initiated skips.
    pub skip_fade: u32,
    /// Fade window around pause/resume.
    pub pause_fade: u32,
    /// Frames swallowed per seek step.
    pub seek_chunk: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // sized for 44.1 kHz: ~90ms control slices, 50ms fades, 1s seek steps
        Self {
            control_budget: 4096,
            skip_fade: 2205,
            pause_fade: 2205,
            seek_chunk: 44100,
        }
    }
}

struct Session {
    key: String,
    playlist: Playlist,
}

/// The playback engine. Owns the playlist session, the open source and the
/// output gate; talks to storage only through its collaborator traits.
pub struct PlayerEngine<S: AudioSink> {
    tree: Box<dyn MediaTree>,
    opener: Box<dyn TrackOpener>,
    store: Box<dyn ResumeStore>,
    gate: OutputGate<S>,
    config: EngineConfig,
    session: Option<Session>,
    source: Option<Box<dyn SampleSource>>,
    pending: Option<PendingAction>,
    paused: bool,
    status: StatusBoard,
    events: VecDeque<PlayerEvent>,
    now_ms: u32,
}

impl<S: AudioSink> PlayerEngine<S> {
    pub fn new(
        tree: Box<dyn MediaTree>,
        opener: Box<dyn TrackOpener>,
        store: Box<dyn ResumeStore>,
        sink: S,
        config: EngineConfig,
    ) -> Self {
        Self {
            tree,
            opener,
            store,
            gate: OutputGate::new(sink),
            config,
            session: None,
            source: None,
            pending: None,
            paused: false,
            status: StatusBoard::new(),
            events: VecDeque::new(),
            now_ms: 0,
        }
    }

    /// Begin a play session for `dir` under the resume key `key`.
    ///
    /// Any prior session is ended (and persisted) first. A stored resume
    /// path is restored through the playlist's own clamping logic, so
    /// stale or malformed data can only park the cursor, never corrupt it.
    pub fn start_session(&mut self, key: &str, dir: &str) {
        self.end_session();

        let mut playlist = Playlist::open(self.tree.as_ref(), dir);
        match self.store.load(key) {
            Ok(Some(saved)) => {
                debug!(key, resume = %saved, "restoring resume position");
                playlist.unserialize(self.tree.as_ref(), &saved);
            }
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "resume load failed, starting from the top"),
        }

        info!(key, dir, "session started");
        self.session = Some(Session {
            key: key.to_string(),
            playlist,
        });
        self.paused = false;
        self.pending = None;
        self.events.push_back(PlayerEvent::SessionStarted {
            key: key.to_string(),
        });

        let path = {
            let Self { tree, session, .. } = &mut *self;
            match session.as_mut() {
                Some(s) => {
                    let restored = s.playlist.current();
                    if restored.is_some() {
                        restored
                    } else {
                        s.playlist.next(&**tree)
                    }
                }
                None => None,
            }
        };
        match path {
            Some(p) => self.open_track(&p, true),
            None => {
                warn!(dir, "playlist is empty, nothing to play");
                self.status.set_phase(PlayPhase::Idle);
            }
        }
    }

    /// End the session, persisting its resume position.
    pub fn end_session(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.persist_position();
        self.session = None;
        self.source = None;
        self.pending = None;
        self.paused = false;
        self.status.set_phase(PlayPhase::Idle);
        self.events.push_back(PlayerEvent::SessionEnded);
        info!("session ended");
    }

    /// Handle one transport command from the input layer.
    pub fn handle_command(&mut self, command: TransportCommand) {
        if self.session.is_none() {
            return;
        }
        match command {
            TransportCommand::Next => self.request(PendingAction::Advance),
            TransportCommand::Previous => self.request(PendingAction::Retreat),
            TransportCommand::Restart => self.request(PendingAction::Reopen),
            TransportCommand::SeekForward => {
                // chunks chain while the button stays held: a fresh swallow
                // is armed only once the previous one has elapsed
                if self.audio_flowing() && !self.gate.is_special_mode_active() {
                    debug!(frames = self.config.seek_chunk, "seek chunk");
                    self.gate.set_swallow(self.config.seek_chunk);
                }
            }
        }
    }

    /// Fade out then act, or act immediately when no samples are flowing.
    fn request(&mut self, action: PendingAction) {
        if self.audio_flowing() {
            self.gate.fade_out(self.config.skip_fade);
            self.pending = Some(action);
        } else {
            self.apply_action(action);
        }
    }

    /// Fade out and stop feeding. Used by the tag layer on tag removal and
    /// by the console shell.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        if self.audio_flowing() {
            self.gate.fade_out(self.config.pause_fade);
            self.pending = Some(PendingAction::Pause);
        } else {
            self.apply_action(PendingAction::Pause);
        }
    }

    /// Resume feeding with a fade-in.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.source.is_none() {
            // end-of-playlist rest state: play again from wherever the
            // cursor sits (a reset playlist starts over)
            let path = {
                let Self { tree, session, .. } = &mut *self;
                match session.as_mut() {
                    Some(s) => {
                        let cur = s.playlist.current();
                        if cur.is_some() {
                            cur
                        } else {
                            s.playlist.next(&**tree)
                        }
                    }
                    None => None,
                }
            };
            match path {
                Some(p) => {
                    self.open_track(&p, false);
                }
                None => {
                    self.paused = true;
                    return;
                }
            }
        }
        self.gate.fade_in(self.config.pause_fade);
        self.status.set_phase(PlayPhase::Playing);
        self.events.push_back(PlayerEvent::Resumed);
    }

    /// One decode slice: feed frames until the sink backs up, the armed
    /// window elapses, or the track ends.
    pub fn pump(&mut self) {
        if self.paused || self.source.is_none() {
            return;
        }
        if !self.gate.is_special_mode_active() {
            self.gate.set_timeout(self.config.control_budget);
        }

        let mut track_ended = false;
        let mut decode_failed = false;
        while let Some(source) = self.source.as_mut() {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    if !self.gate.consume_sample(frame) {
                        break;
                    }
                }
                Ok(None) => {
                    track_ended = true;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "decode failed mid-track, skipping ahead");
                    decode_failed = true;
                    track_ended = true;
                    break;
                }
            }
        }

        if track_ended {
            if decode_failed {
                self.status.set_error(true);
                if let Some(path) = self.current_track() {
                    self.status.raise(Notice::TrackFailed, self.now_ms);
                    self.events.push_back(PlayerEvent::TrackError { path });
                }
            }
            self.on_track_end();
            return;
        }

        if !self.gate.is_special_mode_active() {
            // budget elapsed (not backpressure): the armed window is done
            if let Some(action) = self.pending.take() {
                self.apply_action(action);
            }
        }
    }

    /// Housekeeping once per outer-loop iteration.
    pub fn tick(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
        self.status.tick(now_ms);
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        self.events.drain(..).collect()
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The active leaf path, if a session is live.
    pub fn current_track(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.playlist.current())
    }

    pub fn sink(&self) -> &S {
        self.gate.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.gate.sink_mut()
    }

    fn audio_flowing(&self) -> bool {
        !self.paused && self.source.is_some()
    }

    fn apply_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Advance => self.advance(true),
            PendingAction::Retreat => self.retreat(),
            PendingAction::Reopen => {
                if let Some(path) = self.current_track() {
                    self.open_track(&path, true);
                }
            }
            PendingAction::Pause => {
                self.paused = true;
                self.status.set_phase(PlayPhase::Paused);
                self.events.push_back(PlayerEvent::Paused);
            }
        }
    }

    /// Natural end of track: advance without a fade, the boundary is
    /// already silent.
    ///
    /// A command issued shortly before the end arms a fade the track may
    /// finish mid-window; its pending action still stands and is applied
    /// here (an in-flight Advance simply coincides with the natural one).
    fn on_track_end(&mut self) {
        self.source = None;
        self.gate.set_timeout(0); // drop any leftover budget
        match self.pending.take() {
            None | Some(PendingAction::Advance) => self.advance(false),
            Some(PendingAction::Retreat) => self.retreat(),
            Some(PendingAction::Reopen) => {
                if let Some(path) = self.current_track() {
                    self.open_track(&path, true);
                }
            }
            Some(PendingAction::Pause) => {
                self.apply_action(PendingAction::Pause);
                self.advance(false);
            }
        }
    }

    fn advance(&mut self, fade: bool) {
        let next = {
            let Self { tree, session, .. } = &mut *self;
            match session.as_mut() {
                Some(s) => s.playlist.next(&**tree),
                None => return,
            }
        };
        match next {
            Some(path) => self.open_track(&path, fade),
            None => self.finish_playlist(),
        }
    }

    fn retreat(&mut self) {
        let prev = {
            let Self { tree, session, .. } = &mut *self;
            match session.as_mut() {
                Some(s) => {
                    let p = s.playlist.previous(&**tree);
                    if p.is_some() {
                        p
                    } else {
                        // stepped past the start: land back on the first leaf
                        s.playlist.next(&**tree)
                    }
                }
                None => return,
            }
        };
        if let Some(path) = prev {
            self.open_track(&path, true);
        }
    }

    /// Open a leaf, skipping forward past unopenable ones.
    fn open_track(&mut self, path: &str, fade: bool) {
        let mut path = path.to_string();
        loop {
            match self.opener.open(&path) {
                Ok(source) => {
                    info!(%path, "track started");
                    self.source = Some(source);
                    self.status.set_error(false);
                    if fade {
                        self.gate.fade_in(self.config.skip_fade);
                    }
                    self.persist_position();
                    self.status.set_phase(if self.paused {
                        PlayPhase::Paused
                    } else {
                        PlayPhase::Playing
                    });
                    self.status.raise(Notice::TrackChanged, self.now_ms);
                    self.events.push_back(PlayerEvent::TrackStarted { path });
                    return;
                }
                Err(e) => {
                    warn!(%path, error = %e, "cannot open track, skipping");
                    self.status.set_error(true);
                    self.status.raise(Notice::TrackFailed, self.now_ms);
                    self.events
                        .push_back(PlayerEvent::TrackError { path: path.clone() });
                    let next = {
                        let Self { tree, session, .. } = &mut *self;
                        match session.as_mut() {
                            Some(s) => s.playlist.next(&**tree),
                            None => return,
                        }
                    };
                    match next {
                        Some(p) => path = p,
                        None => {
                            self.finish_playlist();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Forward exhaustion: rest paused at a reset playlist so a resume
    /// starts the session over.
    fn finish_playlist(&mut self) {
        info!("playlist finished");
        self.source = None;
        self.pending = None;
        if let Some(s) = self.session.as_mut() {
            s.playlist.reset();
        }
        self.persist_position();
        self.paused = true;
        self.status.set_phase(PlayPhase::Paused);
        self.status.raise(Notice::EndOfPlaylist, self.now_ms);
        self.events.push_back(PlayerEvent::PlaylistFinished);
    }

    fn persist_position(&mut self) {
        let Self { store, session, .. } = &mut *self;
        if let Some(s) = session.as_ref() {
            let resume = s.playlist.serialize();
            if let Err(e) = store.save(&s.key, &resume) {
                warn!(key = %s.key, error = %e, "failed to persist resume position");
            }
        }
    }
}
