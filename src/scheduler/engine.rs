//! Event-driven non-preemptive CPU scheduler.
//!
//! # Algorithm
//!
//! 1. Order process indices by arrival time (then input order) into a
//!    pending list.
//! 2. Move every pending process with `arrival_time <= now` into a ready
//!    min-heap keyed by the policy's [`ReadyKey`].
//! 3. Pop the minimum, allocate memory if required, run it to completion,
//!    release its memory.
//! 4. If the heap is empty but processes are pending, jump the clock to the
//!    next arrival instead of ticking.
//!
//! Produces the same schedule as recomputing the ready set every tick.
//!
//! # Complexity
//! O(n log n) for n processes, plus O(b) per allocation for b blocks.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, instrument, warn};

use crate::dispatching::{Policy, ReadyKey};
use crate::memory::{FitStrategy, MemoryTable};
use crate::models::{AllocationFailure, Process, Schedule, ScheduledProcess};

/// Memory configuration attached to a scheduler.
///
/// The table is a template: each run allocates from its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPlan {
    /// Partition table at the start of every run.
    pub table: MemoryTable,
    /// Block search strategy.
    pub strategy: FitStrategy,
}

/// Non-preemptive single-CPU scheduler.
///
/// # Example
///
/// ```
/// use u_procsim::dispatching::Policy;
/// use u_procsim::models::Process;
/// use u_procsim::scheduler::Scheduler;
///
/// let processes = vec![
///     Process::new(1, 0, 5),
///     Process::new(2, 1, 3),
///     Process::new(3, 2, 8),
/// ];
/// let schedule = Scheduler::new(Policy::Fcfs).schedule(&processes);
///
/// let starts: Vec<i64> = schedule.entries.iter().map(|e| e.start_time).collect();
/// assert_eq!(starts, vec![0, 5, 8]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    policy: Policy,
    memory: Option<MemoryPlan>,
}

impl Scheduler {
    /// Creates a scheduler without memory awareness.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            memory: None,
        }
    }

    /// Enables memory allocation against `table` using `strategy`.
    pub fn with_memory(mut self, table: MemoryTable, strategy: FitStrategy) -> Self {
        self.memory = Some(MemoryPlan { table, strategy });
        self
    }

    /// Scheduling policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Memory configuration, if enabled.
    pub fn memory_plan(&self) -> Option<&MemoryPlan> {
        self.memory.as_ref()
    }

    /// Runs the simulation.
    ///
    /// Input must satisfy [`validate_processes`](crate::validation::validate_processes).
    /// Processes whose memory request cannot be served are left out of the
    /// execution order and reported in [`Schedule::allocation_failures`].
    #[instrument(skip_all, fields(policy = %self.policy, processes = processes.len()))]
    pub fn schedule(&self, processes: &[Process]) -> Schedule {
        let rule = self.policy.rule();
        let mut memory = self.memory.clone();
        let mut schedule = Schedule::new();

        let mut pending: Vec<usize> = (0..processes.len()).collect();
        pending.sort_by_key(|&i| (processes[i].arrival_time, i));
        let mut next_pending = 0;

        let mut ready: BinaryHeap<Reverse<(ReadyKey, usize)>> = BinaryHeap::new();
        let mut current_time: i64 = 0;

        loop {
            while let Some(&i) = pending.get(next_pending) {
                if processes[i].arrival_time > current_time {
                    break;
                }
                ready.push(Reverse((rule.ready_key(&processes[i], i), i)));
                next_pending += 1;
            }

            let Some(Reverse((_, index))) = ready.pop() else {
                match pending.get(next_pending) {
                    Some(&i) => {
                        current_time = processes[i].arrival_time;
                        continue;
                    }
                    None => break,
                }
            };

            let process = &processes[index];
            let mut entry = ScheduledProcess::new(process.clone(), current_time, index);

            if let Some(plan) = memory.as_mut().filter(|_| process.needs_memory()) {
                match plan
                    .table
                    .allocate_for(process.id, process.memory_required, plan.strategy)
                {
                    Ok(block_id) => {
                        if let Some(block) = plan.table.block(block_id) {
                            debug!(pid = process.id, block = %block, "memory allocated");
                            entry = entry.with_block(block.clone());
                        }
                        // Single CPU: the burst completes before anything else runs.
                        plan.table.free(block_id);
                    }
                    Err(reason) => {
                        warn!(
                            pid = process.id,
                            requested = process.memory_required,
                            largest_free = ?plan.table.largest_free(),
                            %reason,
                            "process skipped"
                        );
                        schedule.add_failure(AllocationFailure {
                            process_id: process.id,
                            requested: process.memory_required,
                            reason,
                        });
                        continue;
                    }
                }
            }

            debug!(
                pid = process.id,
                start = current_time,
                burst = process.burst_time,
                "dispatch"
            );
            current_time += process.burst_time;
            schedule.push(entry);
        }

        debug_assert_eq!(
            schedule.len() + schedule.allocation_failures.len(),
            processes.len(),
            "every process must be either executed or reported"
        );
        schedule
    }
}

/// Schedules `processes` under `policy` without memory awareness.
pub fn schedule(processes: &[Process], policy: Policy) -> Schedule {
    Scheduler::new(policy).schedule(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{AllocationError, Partition};
    use crate::workload::WorkloadGenerator;

    fn scenario_processes() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 8),
        ]
    }

    fn starts(schedule: &Schedule) -> Vec<i64> {
        schedule.entries.iter().map(|e| e.start_time).collect()
    }

    /// Reference SJF: rebuild the ready set on every tick.
    fn naive_sjf(processes: &[Process]) -> Vec<(u32, i64)> {
        let mut done = vec![false; processes.len()];
        let mut time = 0;
        let mut out = Vec::new();
        while out.len() < processes.len() {
            let pick = (0..processes.len())
                .filter(|&i| !done[i] && processes[i].arrival_time <= time)
                .min_by_key(|&i| (processes[i].burst_time, processes[i].arrival_time, i));
            match pick {
                Some(i) => {
                    out.push((processes[i].id, time));
                    time += processes[i].burst_time;
                    done[i] = true;
                }
                None => time += 1,
            }
        }
        out
    }

    #[test]
    fn test_fcfs_scenario() {
        let s = schedule(&scenario_processes(), Policy::Fcfs);
        assert_eq!(s.execution_order(), vec![1, 2, 3]);
        assert_eq!(starts(&s), vec![0, 5, 8]);
        let finish: Vec<i64> = s.entries.iter().map(|e| e.finish_time()).collect();
        let wt: Vec<i64> = s.entries.iter().map(|e| e.waiting_time()).collect();
        let tat: Vec<i64> = s.entries.iter().map(|e| e.turnaround_time()).collect();
        assert_eq!(finish, vec![5, 8, 16]);
        assert_eq!(wt, vec![0, 4, 6]);
        assert_eq!(tat, vec![5, 7, 14]);
    }

    #[test]
    fn test_sjf_scenario() {
        let s = schedule(&scenario_processes(), Policy::Sjf);
        assert_eq!(s.execution_order(), vec![1, 2, 3]);
        assert_eq!(starts(&s), vec![0, 5, 8]);
    }

    #[test]
    fn test_sjf_prefers_short_ready_job() {
        let procs = vec![
            Process::new(1, 0, 6),
            Process::new(2, 1, 8),
            Process::new(3, 2, 2),
            Process::new(4, 3, 4),
        ];
        let s = schedule(&procs, Policy::Sjf);
        assert_eq!(s.execution_order(), vec![1, 3, 4, 2]);
        assert_eq!(starts(&s), vec![0, 6, 8, 12]);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let procs = vec![Process::new(1, 0, 2), Process::new(2, 10, 3)];
        let s = schedule(&procs, Policy::Fcfs);
        assert_eq!(starts(&s), vec![0, 10]);
    }

    #[test]
    fn test_fcfs_unsorted_input_and_ties() {
        let procs = vec![
            Process::new(10, 4, 1),
            Process::new(20, 0, 2),
            Process::new(30, 4, 1),
            Process::new(40, 0, 1),
        ];
        let s = schedule(&procs, Policy::Fcfs);
        assert_eq!(s.execution_order(), vec![20, 40, 10, 30]);
        assert_eq!(starts(&s), vec![0, 2, 4, 5]);
        assert_eq!(
            s.entries.iter().map(|e| e.input_order).collect::<Vec<_>>(),
            vec![1, 3, 0, 2]
        );
    }

    #[test]
    fn test_sjf_late_first_arrival() {
        // Nothing arrives before t=3: clock jumps, no tick-by-tick wait.
        let procs = vec![Process::new(1, 3, 4), Process::new(2, 3, 1)];
        let s = schedule(&procs, Policy::Sjf);
        assert_eq!(s.execution_order(), vec![2, 1]);
        assert_eq!(starts(&s), vec![3, 4]);
    }

    #[test]
    fn test_empty_input() {
        for policy in Policy::all() {
            let s = schedule(&[], policy);
            assert!(s.is_empty());
            assert!(s.is_complete());
        }
    }

    #[test]
    fn test_input_not_mutated_and_reusable() {
        let procs = scenario_processes();
        let scheduler = Scheduler::new(Policy::Sjf);
        let first = scheduler.schedule(&procs);
        let second = scheduler.schedule(&procs);
        assert_eq!(first.entries, second.entries);
        assert_eq!(procs, scenario_processes());
    }

    #[test]
    fn test_sjf_matches_naive_reference() {
        let mut generator = WorkloadGenerator::new(7);
        for _ in 0..200 {
            let procs = generator.generate(12);
            let s = schedule(&procs, Policy::Sjf);
            let got: Vec<(u32, i64)> = s.entries.iter().map(|e| (e.id(), e.start_time)).collect();
            assert_eq!(got, naive_sjf(&procs));
        }
    }

    #[test]
    fn test_fcfs_order_is_stable_arrival_sort() {
        let mut generator = WorkloadGenerator::new(11);
        for _ in 0..200 {
            let procs = generator.generate(15);
            let s = schedule(&procs, Policy::Fcfs);

            let mut expected: Vec<usize> = (0..procs.len()).collect();
            expected.sort_by_key(|&i| procs[i].arrival_time);
            let expected_ids: Vec<u32> = expected.iter().map(|&i| procs[i].id).collect();
            assert_eq!(s.execution_order(), expected_ids);
        }
    }

    #[test]
    fn test_no_start_before_arrival_and_no_overlap() {
        let mut generator = WorkloadGenerator::new(3);
        for _ in 0..200 {
            let procs = generator.generate(10);
            for policy in Policy::all() {
                let s = schedule(&procs, policy);
                assert_eq!(s.len(), procs.len());
                for e in &s.entries {
                    assert!(e.start_time >= e.process.arrival_time);
                }
                for pair in s.entries.windows(2) {
                    assert!(pair[0].finish_time() <= pair[1].start_time);
                }
            }
        }
    }

    #[test]
    fn test_sjf_never_worse_than_fcfs_total_waiting() {
        let mut generator = WorkloadGenerator::new(42).with_arrival_window(0);
        for _ in 0..200 {
            let procs = generator.generate(8);
            let fcfs = schedule(&procs, Policy::Fcfs).total_waiting_time();
            let sjf = schedule(&procs, Policy::Sjf).total_waiting_time();
            assert!(sjf <= fcfs, "sjf={sjf} fcfs={fcfs}");
        }
    }

    #[test]
    fn test_memory_reference_table() {
        let procs = vec![
            Process::new(1, 0, 4).with_memory(250),
            Process::new(2, 1, 2).with_memory(90),
            Process::new(3, 2, 3).with_memory(0),
        ];
        let scheduler =
            Scheduler::new(Policy::Fcfs).with_memory(MemoryTable::reference(), FitStrategy::BestFit);
        let s = scheduler.schedule(&procs);

        assert!(s.is_complete());
        assert_eq!(s.entry_for(1).unwrap().block.as_ref().unwrap().start, 300);
        assert_eq!(s.entry_for(2).unwrap().block.as_ref().unwrap().start, 0);
        assert!(s.entry_for(3).unwrap().block.is_none());
        // Template is untouched by the run.
        assert_eq!(scheduler.memory_plan().unwrap().table.occupied_count(), 0);
    }

    #[test]
    fn test_memory_failure_skips_process() {
        let procs = vec![
            Process::new(1, 0, 5).with_memory(50),
            Process::new(2, 1, 3).with_memory(500),
            Process::new(3, 2, 8).with_memory(400),
        ];
        let s = Scheduler::new(Policy::Sjf)
            .with_memory(MemoryTable::reference(), FitStrategy::FirstFit)
            .schedule(&procs);

        assert_eq!(s.execution_order(), vec![1, 3]);
        // P3 starts where P1 ended: the skipped process takes no CPU time.
        assert_eq!(s.entry_for(3).unwrap().start_time, 5);
        let failure = s.failure_for(2).unwrap();
        assert_eq!(failure.requested, 500);
        assert_eq!(
            failure.reason,
            AllocationError::ExceedsLargestBlock {
                requested: 500,
                largest: 400
            }
        );
    }

    #[test]
    fn test_memory_sequential_reuse_of_single_block() {
        let table = MemoryTable::from_partitions(&[Partition { base: 0, size: 10 }]);
        let procs = vec![
            Process::new(1, 0, 2).with_memory(5),
            Process::new(2, 1, 2).with_memory(8),
        ];
        let s = Scheduler::new(Policy::Fcfs)
            .with_memory(table, FitStrategy::WorstFit)
            .schedule(&procs);
        assert!(s.is_complete());
        assert_eq!(s.len(), 2);
    }
}
