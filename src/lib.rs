//! Non-preemptive CPU scheduling simulator.
//!
//! Simulates First-Come-First-Served and Shortest-Job-First scheduling on a
//! single CPU, optionally coupled with a fixed-partition memory allocator
//! (first-fit, best-fit, worst-fit), and derives a Gantt timeline plus
//! waiting/turnaround metrics from the result.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `MemoryBlock`, `Schedule`,
//!   `ScheduledProcess`, `AllocationFailure`
//! - **`dispatching`**: `Policy` and the named ready-queue orderings
//! - **`scheduler`**: The event-driven scheduling engine
//! - **`memory`**: Partition table and fit strategies
//! - **`timeline`**: Timeline/metrics synthesis and Gantt rendering
//! - **`validation`**: Input precondition checks
//! - **`loader`**, **`config`**, **`simulation`**: Outer layers for callers
//!   that start from files
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_procsim::dispatching::Policy;
//! use u_procsim::models::Process;
//! use u_procsim::scheduler::schedule;
//! use u_procsim::timeline::{synthesize, GanttChart};
//!
//! let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3), Process::new(3, 2, 8)];
//! let schedule = schedule(&processes, Policy::Sjf);
//! let (timeline, metrics) = synthesize(&schedule);
//!
//! assert_eq!(metrics.total_waiting_time, 10);
//! print!("{}", GanttChart::new(&timeline));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5, 9
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod loader;
pub mod logging;
pub mod memory;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod timeline;
pub mod validation;
pub mod workload;

pub use error::{Result, SimError};
