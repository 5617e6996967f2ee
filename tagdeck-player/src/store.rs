//! JSON-file resume store.
//!
//! One small JSON object mapping session key to resume path, rewritten on
//! every save through a sibling temp file so a power cut mid-write leaves
//! the previous file intact.

use std::collections::HashMap;
use std::path::PathBuf;

use tagdeck_core::store::ResumeStore;
use tagdeck_core::{Error, Result};
use tracing::{debug, warn};

/// Resume store persisted as a single JSON file.
pub struct JsonStore {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl JsonStore {
    /// Open the store, loading existing contents.
    ///
    /// A missing file starts empty; an unreadable or malformed file also
    /// starts empty (losing resume positions beats refusing to play).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed resume file, starting fresh");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read resume file, starting fresh");
                HashMap::new()
            }
        };
        Self { path, map }
    }

    fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.map)
            .map_err(|e| Error::Store(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ResumeStore for JsonStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn save(&mut self, key: &str, path: &str) -> Result<()> {
        self.map.insert(key.to_string(), path.to_string());
        self.flush()?;
        debug!(key, resume = path, "resume position saved");
        Ok(())
    }
}
