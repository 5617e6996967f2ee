//! Resume position persistence.
//!
//! One string per session key: the playlist's serialized resume path.
//! Where the string actually lives (a small file, a key/value store) is
//! the shell's business.

use std::collections::HashMap;

use crate::error::Result;

/// Persisted store for resume paths, keyed by play session.
pub trait ResumeStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, path: &str) -> Result<()>;
}

/// In-memory store for tests and embedding without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, path: &str) -> Self {
        let mut store = Self::new();
        store.map.insert(key.to_string(), path.to_string());
        store
    }
}

impl ResumeStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn save(&mut self, key: &str, path: &str) -> Result<()> {
        self.map.insert(key.to_string(), path.to_string());
        Ok(())
    }
}
