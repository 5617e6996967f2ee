//! Tagdeck Player - Main entry point
//!
//! Wires the playback core to the real world: filesystem library, JSON
//! resume store, cpal audio device, and a console front end standing in
//! for tag reader and buttons.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagdeck_core::clock::{MillisClock, SystemClock};
use tagdeck_core::input::{Controls, DebouncedButton};
use tagdeck_core::playback::{PlayerEngine, ToneOpener};
use tagdeck_player::config::{Settings, TomlConfig};
use tagdeck_player::console::Console;
use tagdeck_player::device::DeviceSink;
use tagdeck_player::fs_tree::FsTree;
use tagdeck_player::store::JsonStore;

/// Command-line arguments for tagdeck-player
#[derive(Parser, Debug)]
#[command(name = "tagdeck-player")]
#[command(about = "Console shell for the tagdeck playback core")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "tagdeck.toml", env = "TAGDECK_CONFIG")]
    config: PathBuf,

    /// Root folder of the media library
    #[arg(short, long, env = "TAGDECK_LIBRARY")]
    library: Option<PathBuf>,

    /// Resume-position file
    #[arg(long, env = "TAGDECK_RESUME_FILE")]
    resume_file: Option<PathBuf>,

    /// Audio output device name
    #[arg(short, long, env = "TAGDECK_DEVICE")]
    device: Option<String>,

    /// List audio output devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // loaded silently: the log level lives in the file, so the subscriber
    // cannot exist yet
    let config_present = args.config.exists();
    let toml = TomlConfig::load(&args.config).context("Failed to load configuration")?;
    let settings = Settings::resolve(toml, args.library, args.resume_file, args.device);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tagdeck_player={0},tagdeck_core={0}", settings.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config_present {
        info!("Configuration loaded from {}", args.config.display());
    } else {
        warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }

    if args.list_devices {
        for name in DeviceSink::list_devices().context("Failed to list audio devices")? {
            println!("{name}");
        }
        return Ok(());
    }

    info!("Starting tagdeck player");
    info!("Library root: {}", settings.library_root.display());

    let tree = FsTree::new(settings.library_root.clone());
    let store = JsonStore::open(settings.resume_file.clone());
    let sink = DeviceSink::open(
        settings.device.as_deref(),
        settings.sample_rate,
        settings.ring_frames,
    )
    .context("Failed to open audio device")?;

    // tone stand-in for the external decoder; pitch varies per track
    let opener = ToneOpener::new(
        settings.sample_rate,
        settings.tone_secs * settings.sample_rate,
    );

    let engine = PlayerEngine::new(
        Box::new(tree),
        Box::new(opener),
        Box::new(store),
        sink,
        settings.engine,
    );

    let clock = SystemClock::new();
    let now = clock.now_ms();
    let controls = Controls::new(
        DebouncedButton::new(settings.buttons.debounce_ms, settings.buttons.hold_ms, now),
        DebouncedButton::new(settings.buttons.debounce_ms, settings.buttons.hold_ms, now),
    );

    let mut console = Console::new(
        engine,
        controls,
        clock,
        settings.poll_interval,
        settings.buttons.debounce_ms,
        settings.buttons.hold_ms,
    );
    console.run();

    info!("Shutdown complete");
    Ok(())
}
