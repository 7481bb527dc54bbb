//! # blockstore-sim - Simulated Block-Storage Allocator
//!
//! An in-memory simulation of file allocation over a fixed-size table
//! of blocks, supporting two strategies:
//!
//! - **Contiguous**: first-fit runs of consecutive blocks
//! - **Linked**: chains through per-block successor pointers
//!
//! The crate is the storage core only. Menus, input parsing and block
//! rendering belong to the caller, which invokes these operations with
//! validated arguments and presents the typed results. Nothing touches
//! a real disk and no state survives the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use blockstore_sim::{BlockStore, Result};
//!
//! fn main() -> Result<()> {
//!     // 10 blocks of 1 byte each
//!     let mut store = BlockStore::with_block_size(10, 1);
//!
//!     let a = store.allocate_contiguous("a.txt", 3)?;
//!     assert_eq!((a.start_block, a.end_block), (0, 2));
//!
//!     let b = store.allocate_linked("b.txt", 4)?;
//!     assert_eq!(store.file_blocks("b.txt")?, vec![3, 4, 5, 6]);
//!
//!     store.delete_file("a.txt")?;
//!     assert_eq!(store.wasted_blocks(), 6);
//!
//!     store.rename_file("b.txt", "c.txt")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Every occupied block belongs to exactly one active file; the
//!   blocks referenced by the catalog are exactly the occupied set
//! - A failed operation leaves the table and catalog bit-for-bit
//!   unchanged - there are no partial allocations
//! - Contiguous placement is deterministic first-fit by ascending
//!   start index
//!
//! Every operation completes in at most O(capacity) steps. The store
//! itself is single-threaded; [`SharedBlockStore`] guards one with a
//! single lock for concurrent callers.

pub mod allocator;
pub mod catalog;
pub mod error;
pub mod store;
pub mod table;

// Re-export commonly used types
pub use allocator::AllocationKind;
pub use catalog::{Catalog, FileRecord};
pub use error::{BlockStoreError, Result};
pub use store::{BlockStore, SharedBlockStore, StoreStats, DEFAULT_BLOCK_SIZE};
pub use table::{BlockMarker, BlockState, BlockTable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
