//! Media tree collaborator: one-level directory listings.
//!
//! The playlist never touches storage directly. It asks a [`MediaTree`] for
//! the entries of one directory at a time; the kind field answers the
//! "is this a directory" question and listing a child directory is how a
//! nested level is opened.
//!
//! Paths are tree-relative, `/`-separated, with the tree root written as
//! the empty string.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Whether an entry is a playable file or a nested directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One directory entry, path relative to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl MediaEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Directory listing collaborator.
pub trait MediaTree {
    /// List the immediate entries of `dir` (`""` = tree root).
    ///
    /// Order is not significant; the playlist sorts.
    fn list(&self, dir: &str) -> Result<Vec<MediaEntry>>;
}

/// In-memory media tree built from leaf paths.
///
/// Intermediate directories are registered implicitly, so a whole nested
/// fixture is one `from_paths` call.
#[derive(Debug, Default)]
pub struct MemoryTree {
    dirs: BTreeMap<String, BTreeMap<String, EntryKind>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for p in paths {
            tree.insert_file(p.as_ref());
        }
        tree
    }

    /// Register one leaf file, creating every directory on its path.
    pub fn insert_file(&mut self, path: &str) {
        let mut parent = String::new();
        let mut so_far = String::new();
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        for (i, component) in components.iter().enumerate() {
            if !so_far.is_empty() {
                so_far.push('/');
            }
            so_far.push_str(component);
            let kind = if i + 1 == components.len() {
                EntryKind::File
            } else {
                EntryKind::Directory
            };
            self.dirs
                .entry(parent.clone())
                .or_default()
                .insert(so_far.clone(), kind);
            if kind == EntryKind::Directory {
                self.dirs.entry(so_far.clone()).or_default();
            }
            parent = so_far.clone();
        }
    }
}

impl MediaTree for MemoryTree {
    fn list(&self, dir: &str) -> Result<Vec<MediaEntry>> {
        let children = self
            .dirs
            .get(dir)
            .ok_or_else(|| Error::Listing(format!("no such directory: {:?}", dir)))?;
        Ok(children
            .iter()
            .map(|(path, kind)| MediaEntry {
                path: path.clone(),
                kind: *kind,
            })
            .collect())
    }
}
