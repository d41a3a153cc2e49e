//! Fixed-partition memory allocation.
//!
//! Models a static partition table serviced by first-fit, best-fit or
//! worst-fit search. Partitions are never split or coalesced: a block
//! that serves a smaller request wastes its remainder until released.
//!
//! # Strategies
//!
//! | Strategy | Picks |
//! |----------|-------|
//! | First-Fit | First sufficient free block in table order |
//! | Best-Fit | Smallest sufficient free block |
//! | Worst-Fit | Largest sufficient free block |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2

mod fit;
mod table;

pub use fit::{FitStrategy, ParseFitStrategyError};
pub use table::{AllocationError, BlockId, MemoryTable, Partition};
