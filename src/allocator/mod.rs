//! Allocation strategies over the shared block table
//!
//! Two strategies are supported:
//! - [`contiguous`] - first-fit runs of consecutive blocks
//! - [`linked`] - chains through successor pointers, no contiguity needed
//!
//! Both reserve blocks only after a complete placement has been found,
//! so a failed reservation never leaves a partial allocation behind.

pub mod contiguous;
pub mod linked;

use crate::error::{BlockStoreError, Result};
use serde::{Deserialize, Serialize};

/// Which strategy placed a file's blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationKind {
    /// Blocks form the closed range `[start_block, end_block]`
    Contiguous,
    /// Blocks form a chain reachable from `start_block` via successor
    /// pointers, terminating at `end_block`
    Linked,
}

/// Blocks claimed by a successful reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First block of the range or chain
    pub start_block: usize,
    /// Last block of the range or chain
    pub end_block: usize,
    /// Number of blocks claimed
    pub block_count: usize,
}

/// Number of blocks needed to hold `size_bytes`
///
/// Rounds up to whole blocks. A zero-byte file is rejected: every
/// active file occupies at least one block.
pub fn blocks_required(size_bytes: u64, block_size: u64) -> Result<usize> {
    if size_bytes == 0 {
        return Err(BlockStoreError::InvalidSize(size_bytes));
    }
    Ok(size_bytes.div_ceil(block_size) as usize)
}
