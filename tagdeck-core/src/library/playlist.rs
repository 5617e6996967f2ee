//! Recursive playlist over a nested directory tree.
//!
//! Holds one directory's worth of sorted entries plus, while a directory
//! entry is active, an exclusively owned sub-playlist for it. Traversal is
//! depth-first in sorted order: `next()` visits every leaf under the root
//! exactly once, `previous()` retraces the same leaves in exact reverse
//! order. Sub-playlists are created lazily on descent and destroyed the
//! moment they are exhausted, so the live chain always mirrors the current
//! navigation path.
//!
//! The cursor ranges over `[-1, len]`: `-1` is "before the first entry",
//! `len` is "past the last". Both rest states are retained (rather than
//! clamping to the last valid index) so that reversing direction after
//! exhaustion revisits the boundary leaf.

use tracing::{debug, warn};

use crate::library::tree::{EntryKind, MediaEntry, MediaTree};

/// One level of the nested playlist.
#[derive(Debug)]
pub struct Playlist {
    entries: Vec<MediaEntry>,
    current: i32,
    sublist: Option<Box<Playlist>>,
}

impl Playlist {
    /// Build the playlist for one directory.
    ///
    /// Keeps sub-directories and files with an `.mp3` extension
    /// (case-insensitive), sorted by path. A listing failure collapses to
    /// an empty playlist; an unreadable directory is not a fatal condition.
    pub fn open(tree: &dyn MediaTree, dir: &str) -> Playlist {
        let mut entries = match tree.list(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir, error = %e, "unreadable directory, playlist is empty");
                Vec::new()
            }
        };
        entries.retain(|e| {
            e.kind == EntryKind::Directory || e.path.to_ascii_lowercase().ends_with(".mp3")
        });
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(dir, entries = entries.len(), "playlist created");
        Playlist {
            entries,
            current: -1,
            sublist: None,
        }
    }

    /// Advance to the next leaf in depth-first sorted order.
    ///
    /// `None` means this (sub)list is exhausted; for the root that is the
    /// end of the whole tree.
    pub fn next(&mut self, tree: &dyn MediaTree) -> Option<String> {
        if let Some(sub) = self.sublist.as_mut() {
            if let Some(path) = sub.next(tree) {
                return Some(path);
            }
            // sublist depleted
            self.sublist = None;
        }

        let len = self.entries.len() as i32;
        if self.current >= len {
            return None;
        }
        self.current += 1;
        if self.current >= len {
            return None;
        }

        let entry = &self.entries[self.current as usize];
        if entry.kind == EntryKind::Directory {
            self.sublist = Some(Box::new(Playlist::open(tree, &entry.path)));
            // recurse on self: the sublist might be empty
            return self.next(tree);
        }
        Some(entry.path.clone())
    }

    /// Step back to the previous leaf, exactly retracing forward order.
    ///
    /// Entering a directory backwards starts at its last leaf.
    pub fn previous(&mut self, tree: &dyn MediaTree) -> Option<String> {
        if let Some(sub) = self.sublist.as_mut() {
            if let Some(path) = sub.previous(tree) {
                return Some(path);
            }
            // sublist depleted
            self.sublist = None;
        }

        if self.current < 0 {
            return None;
        }
        self.current -= 1;
        if self.current < 0 {
            return None;
        }

        let entry = &self.entries[self.current as usize];
        if entry.kind == EntryKind::Directory {
            let mut sub = Playlist::open(tree, &entry.path);
            // park past the end so the pre-decrement lands on the last entry
            sub.current = sub.entries.len() as i32;
            self.sublist = Some(Box::new(sub));
            return self.previous(tree);
        }
        Some(entry.path.clone())
    }

    /// The active leaf, without advancing.
    pub fn current(&self) -> Option<String> {
        if let Some(sub) = self.sublist.as_ref() {
            return sub.current();
        }
        if self.current < 0 || self.current >= self.entries.len() as i32 {
            return None;
        }
        Some(self.entries[self.current as usize].path.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop any live sublist and return the cursor to before-first.
    pub fn reset(&mut self) {
        self.sublist = None;
        self.current = -1;
    }

    /// The resume path: comma-joined cursor indices, root level first.
    pub fn serialize(&self) -> String {
        let mut out = self.current.to_string();
        if let Some(sub) = self.sublist.as_ref() {
            out.push(',');
            out.push_str(&sub.serialize());
        }
        out
    }

    /// Restore a resume path produced by [`serialize`](Self::serialize).
    ///
    /// Each level consumes one index, parks the cursor just before it and
    /// re-enters through `next()`, so restoration reuses the normal
    /// traversal and expansion logic. Malformed tokens clamp to 0 and
    /// out-of-range indices fall out through `next()`'s own bounds; bad
    /// data can park the cursor but never corrupt the sublist chain.
    pub fn unserialize(&mut self, tree: &dyn MediaTree, path: &str) {
        let positions: Vec<&str> = path.split(',').collect();
        self.apply_positions(tree, &positions);
    }

    fn apply_positions(&mut self, tree: &dyn MediaTree, positions: &[&str]) {
        let Some((first, rest)) = positions.split_first() else {
            return;
        };
        let pos: i32 = match first.trim().parse() {
            Ok(pos) => pos,
            Err(_) => {
                warn!(token = *first, "malformed resume index, clamping to 0");
                0
            }
        };
        self.current = (pos - 1).clamp(-1, self.entries.len() as i32);
        self.next(tree);
        if let Some(sub) = self.sublist.as_mut() {
            sub.apply_positions(tree, rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::tree::MemoryTree;

    fn flat_tree() -> MemoryTree {
        MemoryTree::from_paths(["a.mp3", "b.mp3", "c.mp3"])
    }

    #[test]
    fn flat_forward_traversal() {
        let tree = flat_tree();
        let mut p = Playlist::open(&tree, "");
        assert_eq!(p.next(&tree).as_deref(), Some("a.mp3"));
        assert_eq!(p.next(&tree).as_deref(), Some("b.mp3"));
        assert_eq!(p.next(&tree).as_deref(), Some("c.mp3"));
        assert_eq!(p.next(&tree), None);
        assert_eq!(p.next(&tree), None);
    }

    #[test]
    fn reverse_after_exhaustion_revisits_last_leaf() {
        let tree = flat_tree();
        let mut p = Playlist::open(&tree, "");
        while p.next(&tree).is_some() {}
        assert_eq!(p.previous(&tree).as_deref(), Some("c.mp3"));
        assert_eq!(p.previous(&tree).as_deref(), Some("b.mp3"));
    }

    #[test]
    fn non_mp3_files_are_filtered() {
        let tree = MemoryTree::from_paths(["a.mp3", "cover.jpg", "notes.txt"]);
        let mut p = Playlist::open(&tree, "");
        assert_eq!(p.next(&tree).as_deref(), Some("a.mp3"));
        assert_eq!(p.next(&tree), None);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tree = MemoryTree::from_paths(["LOUD.MP3"]);
        let mut p = Playlist::open(&tree, "");
        assert_eq!(p.next(&tree).as_deref(), Some("LOUD.MP3"));
    }

    #[test]
    fn unreadable_directory_collapses_to_empty() {
        let tree = MemoryTree::new();
        let mut p = Playlist::open(&tree, "missing");
        assert!(p.is_empty());
        assert_eq!(p.next(&tree), None);
        assert_eq!(p.previous(&tree), None);
        assert_eq!(p.current(), None);
    }

    #[test]
    fn empty_directory_entry_is_skipped() {
        // directory "b" exists but holds no playable files
        let mut tree = MemoryTree::from_paths(["a.mp3", "b/ignore.txt", "c.mp3"]);
        tree.insert_file("b/also_ignored.dat");
        let mut p = Playlist::open(&tree, "");
        assert_eq!(p.next(&tree).as_deref(), Some("a.mp3"));
        assert_eq!(p.next(&tree).as_deref(), Some("c.mp3"));
        assert_eq!(p.next(&tree), None);
    }

    #[test]
    fn reset_drops_sublist_and_cursor() {
        let tree = MemoryTree::from_paths(["d/x.mp3", "d/y.mp3"]);
        let mut p = Playlist::open(&tree, "");
        assert_eq!(p.next(&tree).as_deref(), Some("d/x.mp3"));
        p.reset();
        assert_eq!(p.serialize(), "-1");
        assert_eq!(p.current(), None);
        assert_eq!(p.next(&tree).as_deref(), Some("d/x.mp3"));
    }

    #[test]
    fn serialize_tracks_descent() {
        let tree = MemoryTree::from_paths(["a.mp3", "d/x.mp3", "d/y.mp3"]);
        let mut p = Playlist::open(&tree, "");
        p.next(&tree);
        assert_eq!(p.serialize(), "0");
        p.next(&tree);
        assert_eq!(p.serialize(), "1,0");
        p.next(&tree);
        assert_eq!(p.serialize(), "1,1");
    }

    #[test]
    fn unserialize_with_garbage_token_starts_from_first() {
        let tree = flat_tree();
        let mut p = Playlist::open(&tree, "");
        p.unserialize(&tree, "banana");
        assert_eq!(p.current().as_deref(), Some("a.mp3"));
    }

    #[test]
    fn unserialize_out_of_range_parks_exhausted() {
        let tree = flat_tree();
        let mut p = Playlist::open(&tree, "");
        p.unserialize(&tree, "99");
        assert_eq!(p.current(), None);
        // no dangling sublist, and backward traversal still works
        assert_eq!(p.previous(&tree).as_deref(), Some("c.mp3"));
    }

    #[test]
    fn unserialize_negative_index_stays_before_first() {
        let tree = flat_tree();
        let mut p = Playlist::open(&tree, "");
        p.unserialize(&tree, "-5");
        // clamped to -1, then next() lands on the first entry
        assert_eq!(p.current().as_deref(), Some("a.mp3"));
    }
}
