use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::partition::PartitionKind;
use crate::pool::worker_pool::PoolError;
use crate::shared::picture::Picture;

#[derive(Error, Debug)]
pub enum BlurError {
    #[error("worker pool failed during {strategy}: {source}")]
    Pool {
        strategy: StrategyKind,
        #[source]
        source: PoolError,
    },
}

/// Domain interface for blurring the interior of a picture in place.
///
/// A strategy either updates every interior pixel and returns `Ok`, or
/// fails; there is no partially-applied success.
pub trait BlurStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn blur(&self, picture: &mut Picture) -> Result<(), BlurError>;
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown blur strategy '{0}'")]
pub struct UnknownStrategy(pub String);

/// Named blur strategies selectable at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Sequential,
    Row,
    Column,
    Sector,
    Pixel,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Sequential,
        StrategyKind::Row,
        StrategyKind::Column,
        StrategyKind::Sector,
        StrategyKind::Pixel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "blur_picture",
            StrategyKind::Row => "parallel_row_blur",
            StrategyKind::Column => "parallel_col_blur",
            StrategyKind::Sector => "parallel_sector_blur",
            StrategyKind::Pixel => "parallel_blur_picture",
        }
    }

    /// The partition a parallel strategy dispatches, `None` for the baseline.
    pub fn partition_kind(self) -> Option<PartitionKind> {
        match self {
            StrategyKind::Sequential => None,
            StrategyKind::Row => Some(PartitionKind::Row),
            StrategyKind::Column => Some(PartitionKind::Column),
            StrategyKind::Sector => Some(PartitionKind::Sector),
            StrategyKind::Pixel => Some(PartitionKind::Pixel),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
