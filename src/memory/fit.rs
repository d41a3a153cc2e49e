//! Partition search strategies.
//!
//! All strategies are O(blocks) linear scans over the partition table.
//! Ties are always resolved in table order.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::models::MemoryBlock;

/// Block selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// First free block (table order) that is large enough.
    #[default]
    FirstFit,
    /// Smallest free block that is large enough.
    BestFit,
    /// Largest free block that is large enough.
    WorstFit,
}

impl FitStrategy {
    /// Returns the index of the block this strategy would pick for
    /// `request` units, without changing any block.
    pub fn select(self, blocks: &[MemoryBlock], request: i64) -> Option<usize> {
        let mut candidates = blocks.iter().enumerate().filter(|(_, b)| b.fits(request));

        match self {
            FitStrategy::FirstFit => candidates.next().map(|(i, _)| i),
            // min_by_key keeps the first of equal minima.
            FitStrategy::BestFit => candidates.min_by_key(|(_, b)| b.size).map(|(i, _)| i),
            // max_by_key keeps the last of equal maxima; prefer lower indices.
            FitStrategy::WorstFit => candidates
                .max_by_key(|&(i, b)| (b.size, Reverse(i)))
                .map(|(i, _)| i),
        }
    }

    /// Short name (`first-fit`, `best-fit`, `worst-fit`).
    pub fn name(self) -> &'static str {
        match self {
            FitStrategy::FirstFit => "first-fit",
            FitStrategy::BestFit => "best-fit",
            FitStrategy::WorstFit => "worst-fit",
        }
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fit strategy '{0}' (expected first, best or worst)")]
pub struct ParseFitStrategyError(pub String);

impl FromStr for FitStrategy {
    type Err = ParseFitStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first" | "first-fit" | "1" => Ok(FitStrategy::FirstFit),
            "best" | "best-fit" | "2" => Ok(FitStrategy::BestFit),
            "worst" | "worst-fit" | "3" => Ok(FitStrategy::WorstFit),
            _ => Err(ParseFitStrategyError(s.to_string())),
        }
    }
}
