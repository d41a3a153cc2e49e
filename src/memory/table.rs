//! Fixed partition table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FitStrategy;
use crate::models::{MemoryBlock, ProcessId};

/// Handle to a block inside a [`MemoryTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Position of the block in table order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A `(base, size)` partition description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Base address.
    pub base: i64,
    /// Capacity in memory units.
    pub size: i64,
}

/// Why an allocation request could not be served.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationError {
    /// No block in the table is large enough, free or not.
    #[error("Not enough memory: requested {requested} units, largest partition is {largest}")]
    ExceedsLargestBlock { requested: i64, largest: i64 },

    /// Some block is large enough but every such block is occupied.
    #[error("Not enough memory: requested {requested} units, no sufficient partition is free")]
    NoFreeBlock { requested: i64 },
}

/// The partition table of one simulation run.
///
/// Blocks keep their table order for the lifetime of the table.
/// `allocate` only flips `is_free`; `free` is idempotent.
///
/// # Example
///
/// ```
/// use u_procsim::memory::{FitStrategy, MemoryTable};
///
/// let mut table = MemoryTable::reference();
/// let id = table.allocate(150, FitStrategy::BestFit).unwrap();
/// assert_eq!(table.block(id).unwrap().size, 200);
///
/// table.free(id);
/// table.free(id);
/// assert!(table.block(id).unwrap().is_free);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTable {
    blocks: Vec<MemoryBlock>,
}

impl MemoryTable {
    /// Creates a table from existing blocks.
    pub fn new(blocks: Vec<MemoryBlock>) -> Self {
        Self { blocks }
    }

    /// Creates a table of free blocks from partition descriptions.
    pub fn from_partitions(partitions: &[Partition]) -> Self {
        Self::new(
            partitions
                .iter()
                .map(|p| MemoryBlock::new(p.base, p.size))
                .collect(),
        )
    }

    /// The four-partition reference layout: 100/200/300/400 units
    /// at bases 0/100/300/600.
    pub fn reference() -> Self {
        Self::from_partitions(&Self::reference_partitions())
    }

    /// Partition descriptions of [`MemoryTable::reference`].
    pub fn reference_partitions() -> Vec<Partition> {
        [(0, 100), (100, 200), (300, 300), (600, 400)]
            .into_iter()
            .map(|(base, size)| Partition { base, size })
            .collect()
    }

    /// All blocks in table order.
    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Looks up a block.
    pub fn block(&self, id: BlockId) -> Option<&MemoryBlock> {
        self.blocks.get(id.0)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the table has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Allocates a block for `size` units, marking it occupied.
    ///
    /// Returns `None` when no free block is large enough.
    pub fn allocate(&mut self, size: i64, strategy: FitStrategy) -> Option<BlockId> {
        let index = strategy.select(&self.blocks, size)?;
        self.blocks[index].is_free = false;
        Some(BlockId(index))
    }

    /// Allocates a block on behalf of a process, recording the owner and
    /// explaining failures.
    pub fn allocate_for(
        &mut self,
        process_id: ProcessId,
        size: i64,
        strategy: FitStrategy,
    ) -> Result<BlockId, AllocationError> {
        match self.allocate(size, strategy) {
            Some(id) => {
                self.blocks[id.0].owner = Some(process_id);
                Ok(id)
            }
            None => Err(self.explain_failure(size)),
        }
    }

    /// Marks a block free. Freeing a free block is a no-op.
    pub fn free(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.get_mut(id.0) {
            block.is_free = true;
            block.owner = None;
        }
    }

    /// Sum of the sizes of free blocks.
    pub fn free_capacity(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.is_free)
            .map(|b| b.size)
            .sum()
    }

    /// Size of the largest free block.
    pub fn largest_free(&self) -> Option<i64> {
        self.blocks.iter().filter(|b| b.is_free).map(|b| b.size).max()
    }

    /// Size of the largest block regardless of occupancy.
    pub fn largest_block(&self) -> Option<i64> {
        self.blocks.iter().map(|b| b.size).max()
    }

    /// Number of occupied blocks.
    pub fn occupied_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_free).count()
    }

    fn explain_failure(&self, requested: i64) -> AllocationError {
        let largest = self.largest_block().unwrap_or(0);
        if requested > largest {
            AllocationError::ExceedsLargestBlock { requested, largest }
        } else {
            AllocationError::NoFreeBlock { requested }
        }
    }
}

impl From<Vec<Partition>> for MemoryTable {
    fn from(partitions: Vec<Partition>) -> Self {
        Self::from_partitions(&partitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout() {
        let table = MemoryTable::reference();
        let layout: Vec<(i64, i64)> = table.blocks().iter().map(|b| (b.start, b.size)).collect();
        assert_eq!(layout, vec![(0, 100), (100, 200), (300, 300), (600, 400)]);
        assert_eq!(table.free_capacity(), 1000);
        assert_eq!(table.occupied_count(), 0);
    }

    #[test]
    fn test_allocate_marks_occupied() {
        let mut table = MemoryTable::reference();
        let id = table.allocate(250, FitStrategy::FirstFit).unwrap();
        assert_eq!(id.index(), 2);
        assert!(!table.block(id).unwrap().is_free);
        assert_eq!(table.occupied_count(), 1);
        assert_eq!(table.free_capacity(), 700);
    }

    #[test]
    fn test_free_is_idempotent() {
        let mut table = MemoryTable::reference();
        let id = table.allocate_for(1, 50, FitStrategy::FirstFit).unwrap();
        assert_eq!(table.block(id).unwrap().owner, Some(1));

        table.free(id);
        let after_first = table.clone();
        table.free(id);

        assert_eq!(table, after_first);
        assert!(table.block(id).unwrap().is_free);
        assert_eq!(table.block(id).unwrap().owner, None);
    }

    #[test]
    fn test_sequential_requests_reuse_block() {
        let mut table = MemoryTable::from_partitions(&[Partition { base: 0, size: 10 }]);

        let first = table.allocate(5, FitStrategy::FirstFit).unwrap();
        table.free(first);
        assert!(table.allocate(8, FitStrategy::FirstFit).is_some());
    }

    #[test]
    fn test_concurrent_requests_exhaust_block() {
        let mut table = MemoryTable::from_partitions(&[Partition { base: 0, size: 10 }]);

        assert!(table.allocate_for(1, 5, FitStrategy::FirstFit).is_ok());
        let err = table.allocate_for(2, 8, FitStrategy::FirstFit).unwrap_err();
        assert_eq!(err, AllocationError::NoFreeBlock { requested: 8 });
    }

    #[test]
    fn test_request_larger_than_any_block() {
        let mut table = MemoryTable::reference();
        let err = table.allocate_for(9, 401, FitStrategy::WorstFit).unwrap_err();
        assert_eq!(
            err,
            AllocationError::ExceedsLargestBlock {
                requested: 401,
                largest: 400
            }
        );
        assert_eq!(table.occupied_count(), 0);
    }

    #[test]
    fn test_empty_table() {
        let mut table = MemoryTable::default();
        assert!(table.is_empty());
        assert_eq!(table.largest_free(), None);
        assert!(matches!(
            table.allocate_for(1, 1, FitStrategy::BestFit),
            Err(AllocationError::ExceedsLargestBlock { largest: 0, .. })
        ));
    }

    #[test]
    fn test_largest_free_tracks_occupancy() {
        let mut table = MemoryTable::reference();
        let big = table.allocate(350, FitStrategy::FirstFit).unwrap();
        assert_eq!(table.largest_free(), Some(300));
        table.free(big);
        assert_eq!(table.occupied_count(), 0);
        assert_eq!(table.largest_free(), Some(400));
    }
}
