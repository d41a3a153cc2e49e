//! Simulation configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration (FCFS, no memory awareness, default chart style).
//!
//! ```json
//! {
//!   "policy": "sjf",
//!   "memory": {
//!     "strategy": "best_fit",
//!     "partitions": [{ "base": 0, "size": 100 }, { "base": 100, "size": 200 }]
//!   },
//!   "gantt": { "max_width": 20, "min_width": 5 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatching::Policy;
use crate::memory::{FitStrategy, MemoryTable, Partition};
use crate::scheduler::Scheduler;
use crate::timeline::GanttStyle;

/// Errors raised while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid partition at index {index}: size must be positive, got {size}")]
    InvalidPartition { index: usize, size: i64 },
}

/// Memory-awareness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Block search strategy.
    pub strategy: FitStrategy,
    /// Partition table, in table order.
    pub partitions: Vec<Partition>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            strategy: FitStrategy::default(),
            partitions: MemoryTable::reference_partitions(),
        }
    }
}

/// Configuration of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// CPU scheduling policy.
    pub policy: Policy,
    /// Memory settings. `None` disables allocation entirely.
    pub memory: Option<MemoryConfig>,
    /// Gantt chart sizing.
    pub gantt: GanttStyle,
}

impl SimulationConfig {
    /// Creates a configuration for `policy` with all other defaults.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Enables memory awareness.
    pub fn with_memory(mut self, strategy: FitStrategy, partitions: Vec<Partition>) -> Self {
        self.memory = Some(MemoryConfig {
            strategy,
            partitions,
        });
        self
    }

    /// Parses and checks a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks partition sizes.
    pub fn check(&self) -> Result<(), ConfigError> {
        if let Some(memory) = &self.memory {
            if let Some((index, p)) = memory
                .partitions
                .iter()
                .enumerate()
                .find(|(_, p)| p.size <= 0)
            {
                return Err(ConfigError::InvalidPartition {
                    index,
                    size: p.size,
                });
            }
        }
        Ok(())
    }

    /// Builds the scheduler described by this configuration.
    pub fn scheduler(&self) -> Scheduler {
        let scheduler = Scheduler::new(self.policy);
        match &self.memory {
            Some(memory) => scheduler.with_memory(
                MemoryTable::from_partitions(&memory.partitions),
                memory.strategy,
            ),
            None => scheduler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = SimulationConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.policy, Policy::Fcfs);
        assert!(config.memory.is_none());
        assert_eq!(config.gantt, GanttStyle::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "policy": "sjf",
            "memory": {
                "strategy": "worst_fit",
                "partitions": [{"base": 0, "size": 64}, {"base": 64, "size": 128}]
            },
            "gantt": {"max_width": 30}
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.policy, Policy::Sjf);
        let memory = config.memory.as_ref().unwrap();
        assert_eq!(memory.strategy, FitStrategy::WorstFit);
        assert_eq!(memory.partitions.len(), 2);
        assert_eq!(config.gantt.max_width, 30);
        assert_eq!(config.gantt.min_width, 5);

        let scheduler = config.scheduler();
        assert_eq!(scheduler.policy(), Policy::Sjf);
        assert_eq!(scheduler.memory_plan().unwrap().table.len(), 2);
    }

    #[test]
    fn test_memory_section_defaults_to_reference_table() {
        let config = SimulationConfig::from_json_str(r#"{"memory": {}}"#).unwrap();
        let memory = config.memory.unwrap();
        assert_eq!(memory.strategy, FitStrategy::FirstFit);
        assert_eq!(memory.partitions, MemoryTable::reference_partitions());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = SimulationConfig::from_json_str(r#"{"policy": "round_robin"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_partition_rejected() {
        let json = r#"{"memory": {"partitions": [{"base": 0, "size": 10}, {"base": 10, "size": 0}]}}"#;
        let err = SimulationConfig::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPartition { index: 1, size: 0 }
        ));
    }

    #[test]
    fn test_round_trip() {
        let config = SimulationConfig::new(Policy::Sjf)
            .with_memory(FitStrategy::BestFit, MemoryTable::reference_partitions());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }
}
