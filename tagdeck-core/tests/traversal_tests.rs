//! Whole-tree traversal properties for the nested playlist.
//!
//! Runs the depth-first visitation, reverse retrace and resume round-trip
//! properties against a representative nested fixture.

use tagdeck_core::library::{MediaTree, MemoryTree, Playlist};

/// Leaves listed in expected depth-first lexicographic order.
const LEAVES: &[&str] = &[
    "01-intro.mp3",
    "02-album/01-first.mp3",
    "02-album/02-second.mp3",
    "02-album/03-nested/01-deep.mp3",
    "02-album/03-nested/02-deeper.mp3",
    "02-album/04-last.mp3",
    "03-outro.mp3",
];

fn fixture() -> MemoryTree {
    MemoryTree::from_paths(LEAVES.iter().copied())
}

#[test]
fn forward_pass_visits_every_leaf_once_in_order() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    assert!(!playlist.is_empty());

    let mut visited = Vec::new();
    while let Some(path) = playlist.next(&tree) {
        visited.push(path);
    }
    assert_eq!(visited, LEAVES);
    // the (K+1)th call stays empty
    assert_eq!(playlist.next(&tree), None);
}

#[test]
fn backward_pass_exactly_retraces_forward_order() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    while playlist.next(&tree).is_some() {}

    let mut reversed = Vec::new();
    while let Some(path) = playlist.previous(&tree) {
        reversed.push(path);
    }
    let mut expected: Vec<&str> = LEAVES.to_vec();
    expected.reverse();
    assert_eq!(reversed, expected);
    assert_eq!(playlist.previous(&tree), None);
}

#[test]
fn backward_entry_starts_at_a_directorys_last_leaf() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    // walk to 03-outro.mp3, then step back into 02-album
    while playlist.next(&tree).as_deref() != Some("03-outro.mp3") {}
    assert_eq!(
        playlist.previous(&tree).as_deref(),
        Some("02-album/04-last.mp3")
    );
}

#[test]
fn resume_round_trip_restores_every_leaf() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    for expected in LEAVES {
        playlist.next(&tree);
        assert_eq!(playlist.current().as_deref(), Some(*expected));

        let resume = playlist.serialize();
        let mut restored = Playlist::open(&tree, "");
        restored.unserialize(&tree, &resume);
        assert_eq!(
            restored.current().as_deref(),
            Some(*expected),
            "resume path {:?} should land on {}",
            resume,
            expected
        );
        // a restored playlist re-serializes to the same path
        assert_eq!(restored.serialize(), resume);
    }
}

#[test]
fn restore_after_backward_entry_matches_forward_entry() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    while playlist.next(&tree).is_some() {}
    // enter 02-album backwards, landing on its last leaf
    playlist.previous(&tree);
    assert_eq!(
        playlist.previous(&tree).as_deref(),
        Some("02-album/04-last.mp3")
    );

    let resume = playlist.serialize();
    let mut restored = Playlist::open(&tree, "");
    restored.unserialize(&tree, &resume);
    assert_eq!(
        restored.current().as_deref(),
        Some("02-album/04-last.mp3")
    );
    // restoration re-enters forward, so continuing forward leaves the album
    assert_eq!(restored.next(&tree).as_deref(), Some("03-outro.mp3"));
}

#[test]
fn out_of_range_resume_levels_do_not_corrupt_deeper_state() {
    let tree = fixture();
    let mut playlist = Playlist::open(&tree, "");
    // root index valid, nested index absurd
    playlist.unserialize(&tree, "1,99");
    // the offending level parks exhausted; traversal still functions
    assert_eq!(playlist.next(&tree).as_deref(), Some("03-outro.mp3"));

    let mut playlist = Playlist::open(&tree, "");
    playlist.unserialize(&tree, "99,0");
    assert_eq!(playlist.current(), None);
    assert!(playlist.previous(&tree).is_some());
}

#[test]
fn empty_tree_yields_nothing() {
    let tree = MemoryTree::new();
    let mut playlist = Playlist::open(&tree, "");
    assert!(playlist.is_empty());
    assert_eq!(playlist.next(&tree), None);
    assert_eq!(playlist.previous(&tree), None);
    assert_eq!(playlist.serialize(), "-1");
}

#[test]
fn traversal_only_lists_directories_on_descent() {
    // MediaTree is consulted lazily: listing "" then each directory once
    // per descent. CountingTree verifies no eager whole-tree walk.
    struct CountingTree {
        inner: MemoryTree,
        calls: std::cell::RefCell<Vec<String>>,
    }
    impl MediaTree for CountingTree {
        fn list(&self, dir: &str) -> tagdeck_core::Result<Vec<tagdeck_core::library::MediaEntry>> {
            self.calls.borrow_mut().push(dir.to_string());
            self.inner.list(dir)
        }
    }

    let tree = CountingTree {
        inner: fixture(),
        calls: Default::default(),
    };
    let mut playlist = Playlist::open(&tree, "");
    assert_eq!(tree.calls.borrow().as_slice(), ["".to_string()]);
    playlist.next(&tree); // 01-intro.mp3, no descent yet
    assert_eq!(tree.calls.borrow().len(), 1);
    playlist.next(&tree); // descends into 02-album
    assert_eq!(
        tree.calls.borrow().as_slice(),
        ["".to_string(), "02-album".to_string()]
    );
}
