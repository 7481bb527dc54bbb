//! Fixed-size block table shared by both allocation strategies
//!
//! Every block is either `Free` or `Occupied`. Occupied blocks of a
//! linked file additionally carry the index of the next block in the
//! chain; contiguous blocks and chain tails carry `None`. The tagged
//! representation means a free block can never be confused with a
//! successor pointer to block 0.

use crate::error::{BlockStoreError, Result};
use serde::{Deserialize, Serialize};

/// State of a single block slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    /// Not claimed by any file
    Free,
    /// Claimed by exactly one file
    ///
    /// `successor` is the next block of the same linked chain, or
    /// `None` for contiguous blocks and the last block of a chain.
    Occupied { successor: Option<usize> },
}

/// Rendered view of a block for presentation layers
///
/// Purely representational: callers turn these into whatever block-map
/// display they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockMarker {
    Free,
    Occupied,
    /// Occupied block that chains to `next`
    Linked { next: usize },
}

/// Ordered sequence of block slots with a maintained free counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTable {
    blocks: Vec<BlockState>,
    free_blocks: usize,
}

impl BlockTable {
    /// Create a table of `capacity` slots, all free
    pub fn new(capacity: usize) -> Self {
        BlockTable {
            blocks: vec![BlockState::Free; capacity],
            free_blocks: capacity,
        }
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.blocks.len()
    }

    /// Number of free slots
    pub fn free_blocks(&self) -> usize {
        self.free_blocks
    }

    /// Number of occupied slots
    pub fn occupied_blocks(&self) -> usize {
        self.blocks.len() - self.free_blocks
    }

    /// State of the block at `index`
    pub fn state(&self, index: usize) -> Result<BlockState> {
        self.blocks
            .get(index)
            .copied()
            .ok_or(BlockStoreError::InvalidBlockIndex(index))
    }

    /// Whether the block at `index` is free (out-of-range counts as not free)
    pub fn is_free(&self, index: usize) -> bool {
        matches!(self.blocks.get(index), Some(BlockState::Free))
    }

    /// Successor pointer of an occupied block
    ///
    /// Fails with `InternalInconsistency` if the block is free: a chain
    /// walk that lands on a free block means the table was corrupted by
    /// an earlier bug.
    pub fn successor(&self, index: usize) -> Result<Option<usize>> {
        match self.state(index)? {
            BlockState::Occupied { successor } => Ok(successor),
            BlockState::Free => Err(BlockStoreError::InternalInconsistency(format!(
                "chain walk reached free block {index}"
            ))),
        }
    }

    /// Mark the run `[start, start + len)` occupied, no successors
    ///
    /// Caller guarantees the run is in range and currently free.
    pub(crate) fn occupy_run(&mut self, start: usize, len: usize) {
        for slot in &mut self.blocks[start..start + len] {
            debug_assert_eq!(*slot, BlockState::Free);
            *slot = BlockState::Occupied { successor: None };
        }
        self.free_blocks -= len;
    }

    /// Mark `chain` occupied, linking each block to the next in order
    ///
    /// The last block becomes the chain terminal (`successor: None`).
    /// Caller guarantees the blocks are in range and currently free.
    pub(crate) fn occupy_chain(&mut self, chain: &[usize]) {
        for (position, &index) in chain.iter().enumerate() {
            debug_assert_eq!(self.blocks[index], BlockState::Free);
            self.blocks[index] = BlockState::Occupied {
                successor: chain.get(position + 1).copied(),
            };
        }
        self.free_blocks -= chain.len();
    }

    /// Return the block at `index` to the free pool
    ///
    /// Releasing a block that is already free indicates the catalog and
    /// table disagree, which is a consistency fault, not a user error.
    pub(crate) fn release(&mut self, index: usize) -> Result<()> {
        match self.state(index)? {
            BlockState::Occupied { .. } => {
                self.blocks[index] = BlockState::Free;
                self.free_blocks += 1;
                Ok(())
            }
            BlockState::Free => Err(BlockStoreError::InternalInconsistency(format!(
                "double release of block {index}"
            ))),
        }
    }

    /// One marker per block, in table order
    pub fn render(&self) -> Vec<BlockMarker> {
        self.blocks
            .iter()
            .map(|state| match *state {
                BlockState::Free => BlockMarker::Free,
                BlockState::Occupied { successor: None } => BlockMarker::Occupied,
                BlockState::Occupied {
                    successor: Some(next),
                } => BlockMarker::Linked { next },
            })
            .collect()
    }
}
