//! Process model.
//!
//! A process is the unit of work handed to the CPU scheduler. It is an
//! immutable input record: the scheduler never writes into it, and start
//! times live on [`ScheduledProcess`](super::ScheduledProcess) instead.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier as supplied by the input.
pub type ProcessId = u32;

/// A process to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (positive).
    pub id: ProcessId,
    /// Tick at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required (must be > 0).
    pub burst_time: i64,
    /// Memory units required. `0` = no allocation needed.
    pub memory_required: i64,
    /// Priority carried from the input record. Informational only.
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a process that needs no memory.
    pub fn new(id: ProcessId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            memory_required: 0,
            priority: None,
        }
    }

    /// Sets the memory requirement.
    pub fn with_memory(mut self, memory_required: i64) -> Self {
        self.memory_required = memory_required;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process must hold a memory block while running.
    #[inline]
    pub fn needs_memory(&self) -> bool {
        self.memory_required > 0
    }

    /// Label used in timelines and charts (`p<id>`).
    pub fn label(&self) -> String {
        format!("p{}", self.id)
    }
}

impl From<(ProcessId, i64, i64, i64)> for Process {
    fn from((id, arrival, burst, memory): (ProcessId, i64, i64, i64)) -> Self {
        Self::new(id, arrival, burst).with_memory(memory)
    }
}
