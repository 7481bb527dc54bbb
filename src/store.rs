//! Block store: the shared block table plus the file catalog
//!
//! The store owns both structures exclusively. Every operation either
//! completes in full or leaves both exactly as they were - allocation
//! only mutates after a complete placement has been found, and deletion
//! validates a linked chain in full before freeing its first block.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocator::{self, contiguous, linked, AllocationKind, Placement};
use crate::catalog::{Catalog, FileRecord};
use crate::error::{BlockStoreError, Result};
use crate::table::{BlockMarker, BlockTable};

/// Default simulated block size in bytes
pub const DEFAULT_BLOCK_SIZE: u64 = 512;

/// Simulated block storage: a fixed-size block table and a catalog of
/// active files
///
/// Single-threaded and synchronous; wrap in [`SharedBlockStore`] when
/// several threads need access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStore {
    table: BlockTable,
    catalog: Catalog,
    block_size: u64,
}

/// One-shot snapshot of space utilization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreStats {
    pub total_blocks: usize,
    pub free_blocks: usize,
    pub occupied_blocks: usize,
    pub file_count: usize,
    pub fragmentation_percentage: f64,
}

impl BlockStore {
    /// Create a store with `capacity` blocks of [`DEFAULT_BLOCK_SIZE`]
    /// bytes, all free
    pub fn new(capacity: usize) -> Self {
        Self::with_block_size(capacity, DEFAULT_BLOCK_SIZE)
    }

    /// Create a store with a custom block size in bytes
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn with_block_size(capacity: usize, block_size: u64) -> Self {
        assert!(block_size > 0, "block size must be positive");
        BlockStore {
            table: BlockTable::new(capacity),
            catalog: Catalog::new(),
            block_size,
        }
    }

    /// Simulated block size in bytes
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Total number of blocks
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Allocate a file as a contiguous run of blocks
    ///
    /// First-fit: the lowest-indexed run of enough consecutive free
    /// blocks wins. Fails with `DuplicateName`, `InvalidSize` or
    /// `InsufficientSpace`; a failed call changes nothing.
    pub fn allocate_contiguous(&mut self, name: &str, size_bytes: u64) -> Result<FileRecord> {
        let required = self.admit(name, size_bytes)?;
        let placement = contiguous::reserve(&mut self.table, required)?;
        Ok(self.commit(name, size_bytes, AllocationKind::Contiguous, placement))
    }

    /// Allocate a file as a chain over the first free blocks, in
    /// ascending index order
    ///
    /// The blocks need not be adjacent; each points to the next in
    /// collection order. Fails with `DuplicateName`, `InvalidSize` or
    /// `InsufficientSpace`; a failed call changes nothing.
    pub fn allocate_linked(&mut self, name: &str, size_bytes: u64) -> Result<FileRecord> {
        let required = self.admit(name, size_bytes)?;
        let placement = linked::reserve(&mut self.table, required)?;
        Ok(self.commit(name, size_bytes, AllocationKind::Linked, placement))
    }

    /// Allocate with the strategy chosen by `kind`
    pub fn allocate(
        &mut self,
        name: &str,
        size_bytes: u64,
        kind: AllocationKind,
    ) -> Result<FileRecord> {
        match kind {
            AllocationKind::Contiguous => self.allocate_contiguous(name, size_bytes),
            AllocationKind::Linked => self.allocate_linked(name, size_bytes),
        }
    }

    /// Shared admission checks: name uniqueness, then size
    fn admit(&self, name: &str, size_bytes: u64) -> Result<usize> {
        if self.catalog.contains(name) {
            return Err(BlockStoreError::DuplicateName(name.to_string()));
        }
        allocator::blocks_required(size_bytes, self.block_size)
    }

    /// Record a successful reservation in the catalog
    fn commit(
        &mut self,
        name: &str,
        size_bytes: u64,
        kind: AllocationKind,
        placement: Placement,
    ) -> FileRecord {
        let record = FileRecord {
            name: name.to_string(),
            size: size_bytes,
            allocation_kind: kind,
            start_block: placement.start_block,
            end_block: placement.end_block,
        };
        debug!(
            name,
            size_bytes,
            ?kind,
            start_block = placement.start_block,
            end_block = placement.end_block,
            blocks = placement.block_count,
            "allocated file"
        );
        self.catalog.push(record.clone());
        record
    }

    /// Delete a file, releasing every block it owns
    ///
    /// Contiguous files free their recorded range; linked files free
    /// exactly the blocks reached by walking the chain from
    /// `start_block`. A chain that disagrees with the record's block
    /// count is a consistency fault and frees nothing.
    pub fn delete_file(&mut self, name: &str) -> Result<()> {
        let record = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| BlockStoreError::NotFound(name.to_string()))?;

        match record.allocation_kind {
            AllocationKind::Contiguous => {
                contiguous::release(&mut self.table, record.start_block, record.end_block)?;
            }
            AllocationKind::Linked => {
                let expected = allocator::blocks_required(record.size, self.block_size)?;
                linked::release(&mut self.table, record.start_block, expected)?;
            }
        }

        self.catalog.remove(name);
        debug!(name, "deleted file");
        Ok(())
    }

    /// Rename a file in place; blocks and size are untouched
    ///
    /// Fails with `NotFound` if `old_name` is absent, then with
    /// `DuplicateName` if `new_name` already names another file.
    /// Renaming a file to its own name succeeds without effect.
    pub fn rename_file(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if !self.catalog.contains(old_name) {
            return Err(BlockStoreError::NotFound(old_name.to_string()));
        }
        if new_name != old_name && self.catalog.contains(new_name) {
            return Err(BlockStoreError::DuplicateName(new_name.to_string()));
        }
        if let Some(record) = self.catalog.get_mut(old_name) {
            record.name = new_name.to_string();
        }
        debug!(old_name, new_name, "renamed file");
        Ok(())
    }

    /// Percentage of blocks currently occupied, over total capacity
    ///
    /// A descriptive utilization figure, not fragmentation in the
    /// classic external-fragmentation sense; the name follows the
    /// domain it simulates.
    pub fn fragmentation_percentage(&self) -> f64 {
        if self.table.capacity() == 0 {
            return 0.0;
        }
        self.table.occupied_blocks() as f64 / self.table.capacity() as f64 * 100.0
    }

    /// Number of blocks currently free
    pub fn wasted_blocks(&self) -> usize {
        self.table.free_blocks()
    }

    /// Active file records in creation order
    pub fn list_files(&self) -> &[FileRecord] {
        self.catalog.records()
    }

    /// Look up a file record by exact name
    pub fn file(&self, name: &str) -> Option<&FileRecord> {
        self.catalog.get(name)
    }

    /// The exact blocks a file occupies, in range or chain order
    pub fn file_blocks(&self, name: &str) -> Result<Vec<usize>> {
        let record = self
            .catalog
            .get(name)
            .ok_or_else(|| BlockStoreError::NotFound(name.to_string()))?;

        match record.allocation_kind {
            AllocationKind::Contiguous => Ok((record.start_block..=record.end_block).collect()),
            AllocationKind::Linked => {
                let expected = allocator::blocks_required(record.size, self.block_size)?;
                linked::chain_blocks(&self.table, record.start_block, expected)
            }
        }
    }

    /// One marker per block, for the presentation layer
    pub fn render_blocks(&self) -> Vec<BlockMarker> {
        self.table.render()
    }

    /// Snapshot of space utilization
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_blocks: self.table.capacity(),
            free_blocks: self.table.free_blocks(),
            occupied_blocks: self.table.occupied_blocks(),
            file_count: self.catalog.len(),
            fragmentation_percentage: self.fragmentation_percentage(),
        }
    }
}

/// Thread-safe handle around a [`BlockStore`]
///
/// A single lock guards the whole store: every operation's
/// scan-then-mark sequence runs atomically with respect to other
/// threads, so two concurrent allocations can never claim overlapping
/// blocks. Clones share the same underlying store.
#[derive(Clone)]
pub struct SharedBlockStore {
    inner: Arc<Mutex<BlockStore>>,
}

impl SharedBlockStore {
    /// Wrap a store for shared access
    pub fn new(store: BlockStore) -> Self {
        SharedBlockStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, BlockStore> {
        self.inner.lock()
    }
}
