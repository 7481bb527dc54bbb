//! End-to-end scenarios through the public API

use blockstore_sim::{
    AllocationKind, BlockMarker, BlockStore, BlockStoreError, SharedBlockStore,
};

/// The canonical walkthrough: capacity 10, 1-byte blocks.
#[test]
fn test_mixed_strategy_walkthrough() {
    let mut store = BlockStore::with_block_size(10, 1);

    // "a", 3 bytes contiguous: blocks [0, 2].
    let a = store.allocate_contiguous("a", 3).unwrap();
    assert_eq!((a.start_block, a.end_block), (0, 2));
    assert_eq!(a.allocation_kind, AllocationKind::Contiguous);

    // "b", 4 bytes linked: first four free blocks, ascending.
    let b = store.allocate_linked("b", 4).unwrap();
    assert_eq!((b.start_block, b.end_block), (3, 6));
    assert_eq!(store.file_blocks("b").unwrap(), vec![3, 4, 5, 6]);

    // Deleting "a" frees [0, 2] and leaves "b" untouched.
    store.delete_file("a").unwrap();
    assert_eq!(store.wasted_blocks(), 6);
    assert_eq!(store.file_blocks("b").unwrap(), vec![3, 4, 5, 6]);

    // Rename keeps the block range identical.
    store.rename_file("b", "c").unwrap();
    let c = store.file("c").unwrap();
    assert_eq!((c.start_block, c.end_block), (3, 6));
    assert!(store.file("b").is_none());

    let names: Vec<_> = store.list_files().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c"]);
}

#[test]
fn test_linked_reuses_freed_gap_before_tail() {
    let mut store = BlockStore::with_block_size(10, 1);
    store.allocate_contiguous("a", 3).unwrap(); // 0..=2
    store.allocate_contiguous("b", 3).unwrap(); // 3..=5
    store.delete_file("a").unwrap();

    // Linked allocation takes the freed gap first, then spills past "b".
    store.allocate_linked("c", 5).unwrap();
    assert_eq!(store.file_blocks("c").unwrap(), vec![0, 1, 2, 6, 7]);

    let markers = store.render_blocks();
    assert_eq!(markers[2], BlockMarker::Linked { next: 6 });
    assert_eq!(markers[7], BlockMarker::Occupied); // chain terminal
    assert_eq!(markers[8], BlockMarker::Free);
}

#[test]
fn test_contiguous_fails_where_linked_succeeds() {
    let mut store = BlockStore::with_block_size(8, 1);
    store.allocate_contiguous("a", 2).unwrap(); // 0..=1
    store.allocate_contiguous("b", 2).unwrap(); // 2..=3
    store.allocate_contiguous("c", 2).unwrap(); // 4..=5
    store.delete_file("b").unwrap();

    // 4 free blocks total (2..=3, 6..=7), but no run of 4.
    assert!(matches!(
        store.allocate_contiguous("d", 4),
        Err(BlockStoreError::InsufficientSpace { required: 4, .. })
    ));

    let d = store.allocate_linked("d", 4).unwrap();
    assert_eq!((d.start_block, d.end_block), (2, 7));
    assert_eq!(store.file_blocks("d").unwrap(), vec![2, 3, 6, 7]);
    assert_eq!(store.wasted_blocks(), 0);
}

#[test]
fn test_creation_order_survives_churn() {
    let mut store = BlockStore::new(64);
    for name in ["one", "two", "three", "four"] {
        store.allocate_contiguous(name, 512).unwrap();
    }
    store.delete_file("two").unwrap();
    store.allocate_linked("five", 512).unwrap();

    let names: Vec<_> = store.list_files().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["one", "three", "four", "five"]);
}

#[test]
fn test_freed_names_can_be_reused() {
    let mut store = BlockStore::new(16);
    store.allocate_contiguous("scratch", 512).unwrap();
    store.delete_file("scratch").unwrap();

    // Only active files hold their name.
    let record = store.allocate_linked("scratch", 1024).unwrap();
    assert_eq!(record.allocation_kind, AllocationKind::Linked);
}

#[test]
fn test_full_store_drains_and_refills() {
    let mut store = BlockStore::with_block_size(6, 1);
    store.allocate_contiguous("a", 6).unwrap();
    assert_eq!(store.fragmentation_percentage(), 100.0);
    assert_eq!(store.wasted_blocks(), 0);

    assert!(matches!(
        store.allocate_linked("b", 1),
        Err(BlockStoreError::InsufficientSpace { .. })
    ));

    store.delete_file("a").unwrap();
    assert_eq!(store.fragmentation_percentage(), 0.0);
    assert_eq!(store, BlockStore::with_block_size(6, 1));

    store.allocate_linked("b", 6).unwrap();
    assert_eq!(store.wasted_blocks(), 0);
}

#[test]
fn test_store_survives_serde_round_trip() {
    let mut store = BlockStore::with_block_size(16, 2);
    store.allocate_contiguous("doc", 5).unwrap();
    store.allocate_linked("log", 7).unwrap();
    store.delete_file("doc").unwrap();

    let json = serde_json::to_string(&store).unwrap();
    let mut restored: BlockStore = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, store);

    // The restored store keeps operating with the same semantics.
    restored.rename_file("log", "log.old").unwrap();
    restored.delete_file("log.old").unwrap();
    assert_eq!(restored.wasted_blocks(), 16);
}

#[test]
fn test_shared_store_serializes_operations() {
    use std::thread;

    let shared = SharedBlockStore::new(BlockStore::with_block_size(32, 1));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                let name = format!("file{worker}");
                shared.lock().allocate_contiguous(&name, 4).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = shared.lock();
    assert_eq!(store.list_files().len(), 8);
    assert_eq!(store.wasted_blocks(), 0);

    // Every block is owned by exactly one file.
    let mut owned = vec![false; 32];
    for record in store.list_files() {
        for block in store.file_blocks(&record.name).unwrap() {
            assert!(!owned[block]);
            owned[block] = true;
        }
    }
    assert!(owned.into_iter().all(|o| o));
}
