//! Shell collaborator tests against real files.
//!
//! FsTree listing a temp directory tree, playlist traversal over it, and
//! JsonStore persistence including recovery from a corrupt file.

use std::fs;

use tagdeck_core::library::{EntryKind, MediaTree, Playlist};
use tagdeck_core::store::ResumeStore;
use tagdeck_player::fs_tree::FsTree;
use tagdeck_player::store::JsonStore;
use tempfile::TempDir;

fn library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("02-album/03-nested")).unwrap();
    for leaf in [
        "01-intro.mp3",
        "02-album/01-first.mp3",
        "02-album/02-second.mp3",
        "02-album/03-nested/01-deep.mp3",
        "03-outro.mp3",
        "cover.jpg",
    ] {
        fs::write(root.join(leaf), b"x").unwrap();
    }
    dir
}

#[test]
fn fs_tree_lists_relative_paths_one_level_deep() {
    let dir = library();
    let tree = FsTree::new(dir.path());

    let mut root = tree.list("").unwrap();
    root.sort_by(|a, b| a.path.cmp(&b.path));
    let names: Vec<_> = root.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        names,
        ["01-intro.mp3", "02-album", "03-outro.mp3", "cover.jpg"]
    );
    assert_eq!(root[1].kind, EntryKind::Directory);

    let album = tree.list("02-album").unwrap();
    assert!(album.iter().all(|e| e.path.starts_with("02-album/")));
}

#[test]
fn fs_tree_missing_directory_errors() {
    let dir = library();
    let tree = FsTree::new(dir.path());
    assert!(tree.list("no-such-dir").is_err());
}

#[test]
fn playlist_walks_a_real_directory_tree() {
    let dir = library();
    let tree = FsTree::new(dir.path());
    let mut playlist = Playlist::open(&tree, "");

    let mut visited = Vec::new();
    while let Some(path) = playlist.next(&tree) {
        visited.push(path);
    }
    assert_eq!(
        visited,
        [
            "01-intro.mp3",
            "02-album/01-first.mp3",
            "02-album/02-second.mp3",
            "02-album/03-nested/01-deep.mp3",
            "03-outro.mp3",
        ]
    );
}

#[test]
fn json_store_round_trips_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");

    let mut store = JsonStore::open(&path);
    assert_eq!(store.load("tag-1").unwrap(), None);
    store.save("tag-1", "1,2").unwrap();
    store.save("tag-2", "-1").unwrap();
    store.save("tag-1", "1,3").unwrap();

    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.load("tag-1").unwrap().as_deref(), Some("1,3"));
    assert_eq!(reopened.load("tag-2").unwrap().as_deref(), Some("-1"));
}

#[test]
fn json_store_survives_a_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    fs::write(&path, b"{ this is not json").unwrap();

    let mut store = JsonStore::open(&path);
    assert_eq!(store.load("tag-1").unwrap(), None);
    store.save("tag-1", "0").unwrap();
    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.load("tag-1").unwrap().as_deref(), Some("0"));
}
