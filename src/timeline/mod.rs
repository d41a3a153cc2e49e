//! Timeline and metrics synthesis.
//!
//! Turns a [`Schedule`] into a renderable sequence of labeled segments,
//! inserting idle segments wherever the CPU waits for the next arrival,
//! and computes the schedule's performance metrics.
//!
//! # Algorithm
//! Walk the schedule in execution order with a clock starting at 0.
//! Before each process, emit `Idle [clock, start)` if `start > clock`;
//! then emit `Run [start, start + burst)` and move the clock to its end.
//! The result covers `[0, makespan)` without gaps or overlaps.

mod gantt;
mod metrics;

pub use gantt::{GanttChart, GanttStyle};
pub use metrics::{ProcessMetrics, ScheduleMetrics};

use serde::{Deserialize, Serialize};

use crate::models::{ProcessId, Schedule};

/// One interval of the CPU timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// A process occupying the CPU during `[start, end)`.
    Run {
        process_id: ProcessId,
        start: i64,
        end: i64,
    },
    /// No process on the CPU during `[start, end)`.
    Idle { start: i64, end: i64 },
}

impl Segment {
    /// Segment start (inclusive).
    pub fn start(&self) -> i64 {
        match *self {
            Segment::Run { start, .. } | Segment::Idle { start, .. } => start,
        }
    }

    /// Segment end (exclusive).
    pub fn end(&self) -> i64 {
        match *self {
            Segment::Run { end, .. } | Segment::Idle { end, .. } => end,
        }
    }

    /// `end - start`.
    pub fn duration(&self) -> i64 {
        self.end() - self.start()
    }

    /// Whether this is an idle segment.
    pub fn is_idle(&self) -> bool {
        matches!(self, Segment::Idle { .. })
    }

    /// Chart label: `p<id>` or `idle`.
    pub fn label(&self) -> String {
        match self {
            Segment::Run { process_id, .. } => format!("p{process_id}"),
            Segment::Idle { .. } => "idle".to_string(),
        }
    }
}

/// Read-only CPU timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Segments in time order.
    pub segments: Vec<Segment>,
}

impl Timeline {
    /// Builds the timeline of a schedule.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut segments = Vec::with_capacity(schedule.len() * 2);
        let mut current_time: i64 = 0;

        for entry in &schedule.entries {
            if entry.start_time > current_time {
                segments.push(Segment::Idle {
                    start: current_time,
                    end: entry.start_time,
                });
            }
            let end = entry.finish_time();
            segments.push(Segment::Run {
                process_id: entry.id(),
                start: entry.start_time,
                end,
            });
            current_time = current_time.max(end);
        }

        Self { segments }
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment (0 when empty).
    pub fn end(&self) -> i64 {
        self.segments.last().map(Segment::end).unwrap_or(0)
    }

    /// Total idle ticks.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Segment boundary times: the start of the first segment followed by
    /// the end of every segment.
    pub fn boundaries(&self) -> Vec<i64> {
        match self.segments.first() {
            None => Vec::new(),
            Some(first) => std::iter::once(first.start())
                .chain(self.segments.iter().map(Segment::end))
                .collect(),
        }
    }

    /// Longest single run segment.
    pub fn longest_run(&self) -> Option<i64> {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .max()
    }
}

/// Derives the timeline and metrics of a schedule.
///
/// # Example
///
/// ```
/// use u_procsim::dispatching::Policy;
/// use u_procsim::models::Process;
/// use u_procsim::scheduler::schedule;
/// use u_procsim::timeline::{synthesize, Segment};
///
/// let s = schedule(&[Process::new(1, 0, 2), Process::new(2, 10, 3)], Policy::Fcfs);
/// let (timeline, metrics) = synthesize(&s);
///
/// assert_eq!(timeline.segments[1], Segment::Idle { start: 2, end: 10 });
/// assert_eq!(metrics.makespan, 13);
/// ```
pub fn synthesize(schedule: &Schedule) -> (Timeline, ScheduleMetrics) {
    (
        Timeline::from_schedule(schedule),
        ScheduleMetrics::calculate(schedule),
    )
}
