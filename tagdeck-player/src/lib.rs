//! # Tagdeck Player
//!
//! The shell around tagdeck-core: filesystem media tree, JSON-file resume
//! store, cpal audio device sink, TOML+CLI configuration and a console
//! front end that drives the cooperative loop with virtual button presses.

pub mod config;
pub mod console;
pub mod device;
pub mod error;
pub mod fs_tree;
pub mod store;

pub use error::{Error, Result};
