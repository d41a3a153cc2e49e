//! Dispatching rules and scheduling policies.
//!
//! A dispatching rule decides which ready process the CPU takes next.
//! Each rule exposes its ordering as a named key function so it can be
//! tested on its own, independent of the simulation loop.
//!
//! # Usage
//!
//! ```
//! use u_procsim::dispatching::{DispatchingRule, Policy};
//! use u_procsim::models::Process;
//!
//! let short = Process::new(1, 4, 2);
//! let long = Process::new(2, 0, 9);
//!
//! let sjf = Policy::Sjf.rule();
//! assert!(sjf.ready_key(&short, 0) < sjf.ready_key(&long, 1));
//!
//! let fcfs = Policy::Fcfs.rule();
//! assert!(fcfs.ready_key(&long, 1) < fcfs.ready_key(&short, 0));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::models::Process;

/// Ordering key of a ready process.
///
/// **Lower key = dispatched first.** Fields compare lexicographically;
/// `input_order` is always the final tie-breaker so keys never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadyKey {
    /// Main criterion of the rule.
    pub primary: i64,
    /// First tie-breaker.
    pub secondary: i64,
    /// Position in the caller's input.
    pub input_order: usize,
}

/// A non-preemptive dispatching rule.
///
/// # Key Convention
/// Among the processes that have arrived, the one with the smallest
/// [`ReadyKey`] runs next.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS", "SJF").
    fn name(&self) -> &'static str;

    /// Ready-queue key of a process at position `input_order` in the input.
    fn ready_key(&self, process: &Process, input_order: usize) -> ReadyKey;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Served.
    #[default]
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
}

impl Policy {
    /// The dispatching rule implementing this policy.
    pub fn rule(self) -> &'static dyn DispatchingRule {
        match self {
            Policy::Fcfs => &rules::Fcfs,
            Policy::Sjf => &rules::Sjf,
        }
    }

    /// All supported policies.
    pub fn all() -> [Policy; 2] {
        [Policy::Fcfs, Policy::Sjf]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule().name())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheduling policy '{0}' (expected fcfs or sjf)")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" | "1" => Ok(Policy::Fcfs),
            "sjf" | "spt" | "2" => Ok(Policy::Sjf),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}
