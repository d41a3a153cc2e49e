//! Schedule performance metrics.
//!
//! Computes per-process and aggregate indicators from a completed
//! schedule. Processes skipped for lack of memory are not part of any
//! average.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time (WT) | turnaround - burst |
//! | Turnaround time (TAT) | finish - arrival |
//! | Response time | start - arrival |
//! | Makespan | Latest finish time |
//! | CPU utilization | busy / makespan |
//! | Throughput | processes / makespan |
//!
//! # Empty Schedules
//! Averages, utilization and throughput are `None` when there is nothing
//! to average over; they are never reported as a silent `0/0`.

use serde::{Deserialize, Serialize};

use crate::models::{ProcessId, Schedule, ScheduledProcess};

/// Timing of a single executed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub process_id: ProcessId,
    /// Tick the process became ready.
    pub arrival_time: i64,
    /// CPU time consumed.
    pub burst_time: i64,
    /// Tick the process was dispatched.
    pub start_time: i64,
    /// Tick the process completed.
    pub finish_time: i64,
    /// Ticks spent ready but not running.
    pub waiting_time: i64,
    /// Ticks from arrival to completion.
    pub turnaround_time: i64,
    /// Ticks from arrival to first dispatch.
    pub response_time: i64,
}

impl From<&ScheduledProcess> for ProcessMetrics {
    fn from(entry: &ScheduledProcess) -> Self {
        Self {
            process_id: entry.id(),
            arrival_time: entry.process.arrival_time,
            burst_time: entry.process.burst_time,
            start_time: entry.start_time,
            finish_time: entry.finish_time(),
            waiting_time: entry.waiting_time(),
            turnaround_time: entry.turnaround_time(),
            response_time: entry.response_time(),
        }
    }
}

/// Aggregate schedule indicators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Per-process timing in execution order.
    pub per_process: Vec<ProcessMetrics>,
    /// Latest finish time.
    pub makespan: i64,
    /// Ticks the CPU was running a process.
    pub busy_time: i64,
    /// Ticks the CPU was idle within `[0, makespan)`.
    pub idle_time: i64,
    /// Sum of waiting times.
    pub total_waiting_time: i64,
    /// Sum of turnaround times.
    pub total_turnaround_time: i64,
    /// Mean waiting time. `None` when nothing ran.
    pub average_waiting_time: Option<f64>,
    /// Mean turnaround time. `None` when nothing ran.
    pub average_turnaround_time: Option<f64>,
    /// Mean response time. `None` when nothing ran.
    pub average_response_time: Option<f64>,
    /// busy / makespan. `None` when makespan is zero.
    pub cpu_utilization: Option<f64>,
    /// Completed processes per tick. `None` when makespan is zero.
    pub throughput: Option<f64>,
    /// Processes excluded for lack of memory.
    pub skipped: usize,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let per_process: Vec<ProcessMetrics> =
            schedule.entries.iter().map(ProcessMetrics::from).collect();

        let count = per_process.len();
        let makespan = schedule.makespan();
        let busy_time = schedule.busy_time();
        let total_waiting_time: i64 = per_process.iter().map(|m| m.waiting_time).sum();
        let total_turnaround_time: i64 = per_process.iter().map(|m| m.turnaround_time).sum();
        let total_response_time: i64 = per_process.iter().map(|m| m.response_time).sum();

        let mean = |total: i64| -> Option<f64> {
            if count == 0 {
                None
            } else {
                Some(total as f64 / count as f64)
            }
        };

        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                Some(busy_time as f64 / makespan as f64),
                Some(count as f64 / makespan as f64),
            )
        } else {
            (None, None)
        };

        Self {
            per_process,
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            total_waiting_time,
            total_turnaround_time,
            average_waiting_time: mean(total_waiting_time),
            average_turnaround_time: mean(total_turnaround_time),
            average_response_time: mean(total_response_time),
            cpu_utilization,
            throughput,
            skipped: schedule.allocation_failures.len(),
        }
    }

    /// Metrics of one process.
    pub fn for_process(&self, process_id: ProcessId) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.process_id == process_id)
    }

    /// Number of processes the averages are taken over.
    pub fn executed(&self) -> usize {
        self.per_process.len()
    }
}
