//! Linked allocation through successor pointers
//!
//! Claims the first free blocks found in ascending index order, not
//! necessarily adjacent, and chains them in that order. External
//! fragmentation never blocks a request: any set of free blocks is
//! usable, at the cost of per-block successor bookkeeping and a chain
//! walk on delete.

use crate::allocator::Placement;
use crate::error::{BlockStoreError, Result};
use crate::table::BlockTable;

/// Reserve the first `required` free blocks, chained in index order
///
/// On success each claimed block points to the next, with the last
/// block as chain terminal. On failure the table is untouched.
pub fn reserve(table: &mut BlockTable, required: usize) -> Result<Placement> {
    let chain = collect_free(table, required).ok_or(BlockStoreError::InsufficientSpace {
        required,
        free: table.free_blocks(),
    })?;

    table.occupy_chain(&chain);

    Ok(Placement {
        start_block: chain[0],
        end_block: chain[required - 1],
        block_count: required,
    })
}

/// Indices of the first `required` free blocks, ascending
fn collect_free(table: &BlockTable, required: usize) -> Option<Vec<usize>> {
    let mut chain = Vec::with_capacity(required.min(table.capacity()));

    for index in 0..table.capacity() {
        if table.is_free(index) {
            chain.push(index);
            if chain.len() == required {
                return Some(chain);
            }
        }
    }

    None
}

/// Walk the chain from `start`, expecting exactly `expected` blocks
///
/// The walk is read-only. It fails with `InternalInconsistency` if the
/// chain is longer or shorter than the owning record says, or if it
/// runs through a free block - both mean the table was corrupted by an
/// earlier bug.
pub fn chain_blocks(table: &BlockTable, start: usize, expected: usize) -> Result<Vec<usize>> {
    let mut blocks = Vec::with_capacity(expected);
    let mut current = Some(start);

    while let Some(index) = current {
        if blocks.len() == expected {
            return Err(BlockStoreError::InternalInconsistency(format!(
                "chain from block {start} exceeds its recorded length of {expected}"
            )));
        }
        current = table.successor(index)?;
        blocks.push(index);
    }

    if blocks.len() != expected {
        return Err(BlockStoreError::InternalInconsistency(format!(
            "chain from block {start} has {} blocks, record says {expected}",
            blocks.len()
        )));
    }

    Ok(blocks)
}

/// Free the chain starting at `start`
///
/// The chain is validated in full before any block is freed, so even a
/// consistency fault leaves the table exactly as it was.
pub fn release(table: &mut BlockTable, start: usize, expected: usize) -> Result<()> {
    for index in chain_blocks(table, start, expected)? {
        table.release(index)?;
    }
    Ok(())
}
