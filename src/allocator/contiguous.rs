//! First-fit contiguous allocation
//!
//! Scans the table left to right for the first run of consecutive free
//! blocks long enough for the request. Ties are impossible by
//! construction: the lowest start index always wins, which makes every
//! placement outcome deterministic.

use crate::allocator::Placement;
use crate::error::{BlockStoreError, Result};
use crate::table::BlockTable;

/// Reserve the first run of `required` consecutive free blocks
///
/// On success the run is marked occupied. On failure the table is
/// untouched.
pub fn reserve(table: &mut BlockTable, required: usize) -> Result<Placement> {
    let start = find_first_fit(table, required).ok_or(BlockStoreError::InsufficientSpace {
        required,
        free: table.free_blocks(),
    })?;

    table.occupy_run(start, required);

    Ok(Placement {
        start_block: start,
        end_block: start + required - 1,
        block_count: required,
    })
}

/// Lowest start index of a free run of at least `required` blocks
fn find_first_fit(table: &BlockTable, required: usize) -> Option<usize> {
    let mut run_start = 0;
    let mut run_len = 0;

    for index in 0..table.capacity() {
        if table.is_free(index) {
            if run_len == 0 {
                run_start = index;
            }
            run_len += 1;
            if run_len == required {
                return Some(run_start);
            }
        } else {
            run_len = 0;
        }
    }

    None
}

/// Free every block in the closed range `[start, end]`
///
/// The range comes from the owning file's record, never from a rescan
/// of the table, so a neighbouring file's blocks can never be caught.
pub fn release(table: &mut BlockTable, start: usize, end: usize) -> Result<()> {
    for index in start..=end {
        table.release(index)?;
    }
    Ok(())
}
