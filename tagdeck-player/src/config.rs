//! Configuration for the player shell.
//!
//! Two layers, merged in priority order CLI > environment > TOML file >
//! built-in default. The TOML file is bootstrap-only: nothing here changes
//! while the player runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Bootstrap configuration loaded from `tagdeck.toml`.
///
/// Every field has a built-in default, so a missing file is a warning,
/// never a startup failure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder of the media library
    pub library_root: Option<PathBuf>,

    /// Path of the resume-position JSON file
    pub resume_file: Option<PathBuf>,

    pub logging: LoggingConfig,
    pub buttons: ButtonConfig,
    pub audio: AudioConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Button timing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub debounce_ms: u32,
    pub hold_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: tagdeck_core::input::button::DEFAULT_DEBOUNCE_MS,
            hold_ms: tagdeck_core::input::button::DEFAULT_HOLD_MS,
        }
    }
}

/// Audio output and gate timing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output device name (None = system default)
    pub device: Option<String>,

    pub sample_rate: u32,

    /// Decode slice length: how often control returns to the loop
    pub control_interval_ms: u32,

    /// Fade window around skips and pause/resume
    pub fade_ms: u32,

    /// Audio swallowed per seek step while forward is held
    pub seek_chunk_ms: u32,

    /// Length of each stand-in tone track, seconds
    pub tone_secs: u32,

    /// Device ring buffer size in frames
    pub ring_frames: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: 44_100,
            control_interval_ms: 100,
            fade_ms: 50,
            seek_chunk_ms: 1000,
            tone_secs: 10,
            ring_frames: 8192,
        }
    }
}

impl TomlConfig {
    /// Load from `path`, or fall back to defaults if the file is absent.
    ///
    /// A present-but-malformed file is an error: silently ignoring a typo
    /// in real config is worse than refusing to start.
    ///
    /// Runs before the tracing subscriber exists, so it emits nothing;
    /// the caller reports the outcome once logging is up.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Fully resolved settings the shell runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub library_root: PathBuf,
    pub resume_file: PathBuf,
    pub log_level: String,
    pub buttons: ButtonConfig,
    pub device: Option<String>,
    pub sample_rate: u32,
    pub tone_secs: u32,
    pub ring_frames: usize,
    pub poll_interval: Duration,
    pub engine: tagdeck_core::playback::EngineConfig,
}

impl Settings {
    /// Merge CLI overrides onto the TOML layer.
    pub fn resolve(
        toml: TomlConfig,
        cli_library: Option<PathBuf>,
        cli_resume: Option<PathBuf>,
        cli_device: Option<String>,
    ) -> Self {
        let library_root = cli_library
            .or(toml.library_root)
            .unwrap_or_else(|| PathBuf::from("."));
        let resume_file = cli_resume
            .or(toml.resume_file)
            .unwrap_or_else(|| PathBuf::from("tagdeck-resume.json"));
        let device = cli_device.or(toml.audio.device.clone());

        let per_ms = toml.audio.sample_rate as u64;
        let frames = |ms: u32| -> u32 { (ms as u64 * per_ms / 1000) as u32 };

        Self {
            library_root,
            resume_file,
            log_level: toml.logging.level.clone(),
            buttons: toml.buttons.clone(),
            device,
            sample_rate: toml.audio.sample_rate,
            tone_secs: toml.audio.tone_secs,
            ring_frames: toml.audio.ring_frames,
            poll_interval: Duration::from_millis(10),
            engine: tagdeck_core::playback::EngineConfig {
                control_budget: frames(toml.audio.control_interval_ms).max(1),
                skip_fade: frames(toml.audio.fade_ms),
                pause_fade: frames(toml.audio.fade_ms),
                seek_chunk: frames(toml.audio.seek_chunk_ms).max(1),
            },
        }
    }
}
