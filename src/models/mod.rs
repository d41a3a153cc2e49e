//! Simulation domain models.
//!
//! Provides the data types shared by the scheduler, the memory allocator
//! and the timeline synthesizer.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutated |
//! |------|-----------|---------|
//! | Process | Caller / loader | Never |
//! | MemoryBlock | Partition table | Occupancy only |
//! | Schedule | Scheduler | Append-only during a run |

mod memory_block;
mod process;
mod schedule;

pub use memory_block::MemoryBlock;
pub use process::{Process, ProcessId};
pub use schedule::{AllocationFailure, Schedule, ScheduledProcess};
