//! Schedule (simulation output) model.
//!
//! A schedule is the ordered execution record of one simulation run:
//! every admitted process paired with its start time, in execution order,
//! plus the processes that were skipped because no memory block fit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MemoryBlock, Process, ProcessId};
use crate::memory::AllocationError;

/// Result of one scheduling run.
///
/// Insertion order is execution order, which may differ from arrival
/// or input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Executed processes in execution order.
    pub entries: Vec<ScheduledProcess>,
    /// Processes skipped because memory could not be allocated.
    pub allocation_failures: Vec<AllocationFailure>,
}

/// A process together with the start time the scheduler assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledProcess {
    /// The input record (unchanged).
    pub process: Process,
    /// Assigned start tick.
    pub start_time: i64,
    /// Position of the process in the caller's input slice.
    pub input_order: usize,
    /// Memory block held while running, as it looked when allocated.
    pub block: Option<MemoryBlock>,
}

/// A process that could not be admitted because of memory exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFailure {
    /// Skipped process.
    pub process_id: ProcessId,
    /// Memory units requested.
    pub requested: i64,
    /// Why the allocation failed.
    pub reason: AllocationError,
}

impl ScheduledProcess {
    /// Creates a scheduled entry without a memory block.
    pub fn new(process: Process, start_time: i64, input_order: usize) -> Self {
        Self {
            process,
            start_time,
            input_order,
            block: None,
        }
    }

    /// Attaches the memory block held by this process.
    pub fn with_block(mut self, block: MemoryBlock) -> Self {
        self.block = Some(block);
        self
    }

    /// Process identifier.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.process.id
    }

    /// `start_time + burst_time`.
    #[inline]
    pub fn finish_time(&self) -> i64 {
        self.start_time + self.process.burst_time
    }

    /// `finish_time - arrival_time`.
    #[inline]
    pub fn turnaround_time(&self) -> i64 {
        self.finish_time() - self.process.arrival_time
    }

    /// `turnaround_time - burst_time`.
    #[inline]
    pub fn waiting_time(&self) -> i64 {
        self.turnaround_time() - self.process.burst_time
    }

    /// `start_time - arrival_time`. Equal to waiting time without preemption.
    #[inline]
    pub fn response_time(&self) -> i64 {
        self.start_time - self.process.arrival_time
    }
}

impl fmt::Display for AllocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Process {} could not be allocated ({})",
            self.process_id, self.reason
        )
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an executed process.
    pub fn push(&mut self, entry: ScheduledProcess) {
        self.entries.push(entry);
    }

    /// Records an allocation failure.
    pub fn add_failure(&mut self, failure: AllocationFailure) {
        self.allocation_failures.push(failure);
    }

    /// Whether nothing was executed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of executed processes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every process was admitted.
    pub fn is_complete(&self) -> bool {
        self.allocation_failures.is_empty()
    }

    /// Finish time of the last executed process (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.entries
            .iter()
            .map(ScheduledProcess::finish_time)
            .max()
            .unwrap_or(0)
    }

    /// Total CPU busy time.
    pub fn busy_time(&self) -> i64 {
        self.entries.iter().map(|e| e.process.burst_time).sum()
    }

    /// Sum of waiting times over executed processes.
    pub fn total_waiting_time(&self) -> i64 {
        self.entries.iter().map(ScheduledProcess::waiting_time).sum()
    }

    /// Process IDs in execution order.
    pub fn execution_order(&self) -> Vec<ProcessId> {
        self.entries.iter().map(ScheduledProcess::id).collect()
    }

    /// Finds the entry for a process.
    pub fn entry_for(&self, process_id: ProcessId) -> Option<&ScheduledProcess> {
        self.entries.iter().find(|e| e.id() == process_id)
    }

    /// Finds the allocation failure for a process.
    pub fn failure_for(&self, process_id: ProcessId) -> Option<&AllocationFailure> {
        self.allocation_failures
            .iter()
            .find(|f| f.process_id == process_id)
    }

    /// Longest burst among executed processes.
    pub fn longest_burst(&self) -> Option<i64> {
        self.entries.iter().map(|e| e.process.burst_time).max()
    }
}
