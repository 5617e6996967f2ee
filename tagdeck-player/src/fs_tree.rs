//! Filesystem-backed media tree.
//!
//! Paths handed to the core are library-relative with `/` separators, so
//! resume files stay valid if the library moves. The root directory is the
//! empty string, matching the core's convention.

use std::path::{Path, PathBuf};

use tagdeck_core::library::{EntryKind, MediaEntry, MediaTree};
use tagdeck_core::{Error, Result};
use tracing::debug;

/// Lists directories under a fixed library root via `std::fs`.
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a tree-relative path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl MediaTree for FsTree {
    fn list(&self, dir: &str) -> Result<Vec<MediaEntry>> {
        let full = if dir.is_empty() {
            self.root.clone()
        } else {
            self.root.join(dir)
        };
        let read = std::fs::read_dir(&full)
            .map_err(|e| Error::Listing(format!("{}: {}", full.display(), e)))?;

        let mut entries = Vec::new();
        for item in read {
            let item = item.map_err(|e| Error::Listing(format!("{}: {}", full.display(), e)))?;
            let file_type = item
                .file_type()
                .map_err(|e| Error::Listing(format!("{}: {}", full.display(), e)))?;
            let name = match item.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    debug!(dir, "skipping entry with non-UTF-8 name");
                    continue;
                }
            };
            let path = if dir.is_empty() {
                name
            } else {
                format!("{dir}/{name}")
            };
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(MediaEntry { path, kind });
        }
        Ok(entries)
    }
}
