//! End-to-end simulation driver.
//!
//! Validates the input, runs the configured scheduler, and synthesizes
//! the timeline and metrics in one call.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::SimulationConfig;
use crate::dispatching::Policy;
use crate::error::{Result, SimError};
use crate::loader::load_processes;
use crate::models::{Process, Schedule};
use crate::timeline::{synthesize, GanttChart, GanttStyle, ScheduleMetrics, Timeline};
use crate::validation::validate_processes;

/// Everything a caller needs to render a run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Policy the run used.
    pub policy: Policy,
    /// Execution order, start times and allocation failures.
    pub schedule: Schedule,
    /// CPU timeline with idle segments.
    pub timeline: Timeline,
    /// Per-process and aggregate metrics.
    pub metrics: ScheduleMetrics,
    #[serde(skip)]
    gantt_style: GanttStyle,
}

impl SimulationReport {
    /// Gantt chart of the timeline, using the configured style.
    pub fn gantt(&self) -> GanttChart<'_> {
        GanttChart::new(&self.timeline).with_style(self.gantt_style)
    }

    /// Whether nothing was executed.
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Validates and simulates a process set.
///
/// # Errors
/// [`SimError::Invalid`] listing every validation problem. Memory
/// exhaustion is not an error; see `report.schedule.allocation_failures`.
///
/// # Example
///
/// ```
/// use u_procsim::config::SimulationConfig;
/// use u_procsim::dispatching::Policy;
/// use u_procsim::models::Process;
/// use u_procsim::simulation::simulate;
///
/// let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3), Process::new(3, 2, 8)];
/// let report = simulate(&processes, &SimulationConfig::new(Policy::Fcfs)).unwrap();
///
/// let waiting: Vec<i64> = report.metrics.per_process.iter().map(|m| m.waiting_time).collect();
/// assert_eq!(waiting, vec![0, 4, 6]);
/// ```
#[instrument(skip_all, fields(policy = %config.policy, processes = processes.len()))]
pub fn simulate(processes: &[Process], config: &SimulationConfig) -> Result<SimulationReport> {
    validate_processes(processes).map_err(SimError::Invalid)?;

    let schedule = config.scheduler().schedule(processes);
    let (timeline, metrics) = synthesize(&schedule);

    info!(
        executed = metrics.executed(),
        skipped = metrics.skipped,
        makespan = metrics.makespan,
        "simulation complete"
    );

    Ok(SimulationReport {
        policy: config.policy,
        schedule,
        timeline,
        metrics,
        gantt_style: config.gantt,
    })
}

/// Loads a process record file and simulates it.
pub fn simulate_file(path: impl AsRef<Path>, config: &SimulationConfig) -> Result<SimulationReport> {
    let processes = load_processes(path)?;
    simulate(&processes, config)
}
