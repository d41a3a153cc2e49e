//! Fixed memory partition model.
//!
//! Blocks are created once from a partition table and are never resized,
//! split, or merged. Allocation only toggles occupancy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProcessId;

/// A fixed memory partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Base address.
    pub start: i64,
    /// Capacity in memory units (> 0).
    pub size: i64,
    /// Whether the block is available for allocation.
    pub is_free: bool,
    /// Process currently holding the block.
    pub owner: Option<ProcessId>,
}

impl MemoryBlock {
    /// Creates a free block.
    pub fn new(start: i64, size: i64) -> Self {
        Self {
            start,
            size,
            is_free: true,
            owner: None,
        }
    }

    /// Last address covered by the block (inclusive).
    #[inline]
    pub fn end(&self) -> i64 {
        self.start + self.size - 1
    }

    /// Whether the block is free and large enough for `request` units.
    #[inline]
    pub fn fits(&self, request: i64) -> bool {
        self.is_free && self.size >= request
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}-{}] ({})",
            self.start,
            self.end(),
            if self.is_free { "Free" } else { "Used" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_display() {
        let mut b = MemoryBlock::new(100, 200);
        assert_eq!(b.to_string(), "[100-299] (Free)");
        b.is_free = false;
        assert_eq!(b.to_string(), "[100-299] (Used)");
    }

    #[test]
    fn test_block_fits() {
        let mut b = MemoryBlock::new(0, 100);
        assert!(b.fits(100));
        assert!(b.fits(1));
        assert!(!b.fits(101));
        b.is_free = false;
        assert!(!b.fits(1));
    }
}
