//! Non-preemptive CPU scheduler.
//!
//! One event-driven engine serves every policy; the policy only supplies
//! the ready-queue ordering (see [`crate::dispatching`]). Memory awareness
//! is optional and attached with [`Scheduler::with_memory`].
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod engine;

pub use engine::{schedule, MemoryPlan, Scheduler};
