//! Seeded synthetic workloads.
//!
//! Generates random but reproducible process sets for experiments and
//! randomized tests. The same seed always yields the same sequence of
//! workloads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::Process;

/// Random process-set generator.
///
/// # Example
///
/// ```
/// use u_procsim::workload::WorkloadGenerator;
///
/// let a = WorkloadGenerator::new(1).generate(5);
/// let b = WorkloadGenerator::new(1).generate(5);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|p| p.burst_time >= 1));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: SmallRng,
    arrival_window: i64,
    min_burst: i64,
    max_burst: i64,
    max_memory: i64,
}

impl WorkloadGenerator {
    /// Creates a generator: arrivals in `0..=20`, bursts in `1..=10`,
    /// no memory requirements.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            arrival_window: 20,
            min_burst: 1,
            max_burst: 10,
            max_memory: 0,
        }
    }

    /// Sets the latest possible arrival time. `0` = all arrive at t=0.
    pub fn with_arrival_window(mut self, window: i64) -> Self {
        self.arrival_window = window.max(0);
        self
    }

    /// Sets the inclusive burst range (clamped so bursts stay >= 1).
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.min_burst = min.max(1);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Sets the largest memory request. `0` = no memory requirements.
    pub fn with_max_memory(mut self, max_memory: i64) -> Self {
        self.max_memory = max_memory.max(0);
        self
    }

    /// Generates `count` processes with ids `1..=count` in input order.
    pub fn generate(&mut self, count: usize) -> Vec<Process> {
        (1..=count as u32)
            .map(|id| {
                let arrival = self.rng.random_range(0..=self.arrival_window);
                let burst = self.rng.random_range(self.min_burst..=self.max_burst);
                let memory = self.rng.random_range(0..=self.max_memory);
                Process::new(id, arrival, burst).with_memory(memory)
            })
            .collect()
    }
}
