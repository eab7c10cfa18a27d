use super::partition::PartitionKind;
use crate::shared::constants::{MAX_RUNNING_THREAD_SIZE, PIXEL_POOL_SIZE, SECTOR_POOL_SIZE};

/// Worker-count policy for one parallel strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolSize {
    /// Always this many workers.
    Fixed(usize),
    /// One worker per work unit.
    PerUnit,
    /// One worker per work unit, up to the ceiling.
    PerUnitCapped(usize),
}

impl PoolSize {
    /// Worker count for an invocation with `units` work units. Never zero.
    pub fn resolve(self, units: usize) -> usize {
        let n = match self {
            PoolSize::Fixed(n) => n,
            PoolSize::PerUnit => units,
            PoolSize::PerUnitCapped(cap) => units.min(cap),
        };
        n.max(1)
    }
}

/// Pool sizing for every parallel strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyConfig {
    pub row: PoolSize,
    pub column: PoolSize,
    pub sector: PoolSize,
    pub pixel: PoolSize,
}

impl StrategyConfig {
    /// Row and column pools get one worker per unit instead of the cap.
    pub fn max_effort() -> Self {
        Self {
            row: PoolSize::PerUnit,
            column: PoolSize::PerUnit,
            ..Self::default()
        }
    }

    /// Every strategy uses exactly `workers` threads.
    pub fn uniform(workers: usize) -> Self {
        let size = PoolSize::Fixed(workers);
        Self {
            row: size,
            column: size,
            sector: size,
            pixel: size,
        }
    }

    pub fn with_pixel_workers(mut self, workers: usize) -> Self {
        self.pixel = PoolSize::Fixed(workers);
        self
    }

    pub fn pool_size(&self, kind: PartitionKind) -> PoolSize {
        match kind {
            PartitionKind::Row => self.row,
            PartitionKind::Column => self.column,
            PartitionKind::Sector => self.sector,
            PartitionKind::Pixel => self.pixel,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            row: PoolSize::PerUnitCapped(MAX_RUNNING_THREAD_SIZE),
            column: PoolSize::PerUnitCapped(MAX_RUNNING_THREAD_SIZE),
            sector: PoolSize::Fixed(SECTOR_POOL_SIZE),
            pixel: PoolSize::Fixed(PIXEL_POOL_SIZE),
        }
    }
}
