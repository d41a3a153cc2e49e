//! Built-in dispatching rules.
//!
//! # Key Convention
//! All rules return lower keys for processes that should run first.
//! Every rule ends in input order, so ties are deterministic.

use super::{DispatchingRule, ReadyKey};
use crate::models::Process;

/// First-Come-First-Served.
///
/// Orders by arrival time; simultaneous arrivals run in input order
/// (first declared, first served).
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn ready_key(&self, process: &Process, input_order: usize) -> ReadyKey {
        ReadyKey {
            primary: process.arrival_time,
            secondary: 0,
            input_order,
        }
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest Job First (non-preemptive).
///
/// Orders ready processes by burst time, then arrival time, then input
/// order. Minimizes mean waiting time on a single machine when all
/// processes are available.
///
/// # Reference
/// Smith (1956), SPT is optimal for mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn ready_key(&self, process: &Process, input_order: usize) -> ReadyKey {
        ReadyKey {
            primary: process.burst_time,
            secondary: process.arrival_time,
            input_order,
        }
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}
