//! Text Gantt chart.
//!
//! Renders a [`Timeline`] as two lines: labeled cells separated by `|`,
//! and the boundary times, each starting directly under its bar.
//!
//! ```text
//! |     p1     |  p2   |         p3         |
//! 0            5       8                    16
//! ```
//!
//! Cell width is proportional to the segment duration relative to the
//! longest run, clamped to `[min_width, max_width]`. Widths are
//! presentation only; boundary times are exact.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timeline;

/// Cell sizing for [`GanttChart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttStyle {
    /// Width of the longest run.
    pub max_width: usize,
    /// Minimum width of any cell.
    pub min_width: usize,
}

impl Default for GanttStyle {
    fn default() -> Self {
        Self {
            max_width: 20,
            min_width: 5,
        }
    }
}

/// A renderable Gantt chart over a timeline.
#[derive(Debug, Clone)]
pub struct GanttChart<'a> {
    timeline: &'a Timeline,
    style: GanttStyle,
}

impl<'a> GanttChart<'a> {
    /// Creates a chart with the default style.
    pub fn new(timeline: &'a Timeline) -> Self {
        Self {
            timeline,
            style: GanttStyle::default(),
        }
    }

    /// Sets the cell style.
    pub fn with_style(mut self, style: GanttStyle) -> Self {
        self.style = style;
        self
    }

    /// Width of a cell lasting `duration` ticks.
    pub fn cell_width(&self, duration: i64) -> usize {
        let longest = self.timeline.longest_run().unwrap_or(1).max(1) as usize;
        let max = self.style.max_width.max(self.style.min_width);
        let scaled = (duration.max(0) as usize).saturating_mul(self.style.max_width) / longest;
        scaled.clamp(self.style.min_width, max)
    }

    /// Renders the bar line and the time line, each newline-terminated.
    /// An empty timeline renders as an empty string.
    pub fn render(&self) -> String {
        if self.timeline.is_empty() {
            return String::new();
        }

        let mut bars = String::from("|");
        let mut positions = vec![0];

        for segment in &self.timeline.segments {
            let width = self.cell_width(segment.duration());
            let label = segment.label();
            let left = width.saturating_sub(label.len()) / 2;
            let right = width.saturating_sub(left + label.len());

            bars.push_str(&" ".repeat(left));
            bars.push_str(&label);
            bars.push_str(&" ".repeat(right));
            bars.push('|');
            positions.push(bars.len() - 1);
        }

        let mut times = " ".repeat(bars.len());
        for (pos, time) in positions.into_iter().zip(self.timeline.boundaries()) {
            let text = time.to_string();
            let needed = pos + text.len();
            if needed > times.len() {
                let extra = needed - times.len();
                times.push_str(&" ".repeat(extra));
                bars.push_str(&" ".repeat(extra));
            }
            times.replace_range(pos..needed, &text);
        }

        format!("{}\n{}\n", bars.trim_end(), times.trim_end())
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Policy;
    use crate::models::Process;
    use crate::scheduler::schedule;

    fn chart_for(processes: &[Process]) -> String {
        let timeline = Timeline::from_schedule(&schedule(processes, Policy::Fcfs));
        GanttChart::new(&timeline).render()
    }

    #[test]
    fn test_render_contiguous() {
        let out = chart_for(&[
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 8),
        ]);
        let expected = concat!(
            "|     p1     |  p2   |         p3         |\n",
            "0            5       8                    16\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_idle_cell() {
        let out = chart_for(&[Process::new(1, 0, 2), Process::new(2, 10, 3)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("idle"));

        let bar_cols: Vec<usize> = lines[0]
            .char_indices()
            .filter(|&(_, c)| c == '|')
            .map(|(i, _)| i)
            .collect();
        assert_eq!(bar_cols.len(), 4);
        for (col, time) in bar_cols.iter().zip(["0", "2", "10", "13"]) {
            assert_eq!(&lines[1][*col..*col + time.len()], time);
        }
    }

    #[test]
    fn test_min_width_keeps_short_bursts_legible() {
        let timeline = Timeline::from_schedule(&schedule(
            &[Process::new(1, 0, 1), Process::new(2, 0, 100)],
            Policy::Fcfs,
        ));
        let chart = GanttChart::new(&timeline);
        assert_eq!(chart.cell_width(1), 5);
        assert_eq!(chart.cell_width(100), 20);
        assert_eq!(chart.cell_width(1_000), 20);
    }

    #[test]
    fn test_custom_style() {
        let timeline = Timeline::from_schedule(&schedule(&[Process::new(1, 0, 4)], Policy::Fcfs));
        let chart = GanttChart::new(&timeline).with_style(GanttStyle {
            max_width: 8,
            min_width: 2,
        });
        assert_eq!(chart.to_string(), "|   p1   |\n0        4\n");
    }

    #[test]
    fn test_render_empty() {
        let timeline = Timeline::default();
        assert_eq!(GanttChart::new(&timeline).render(), "");
    }
}
