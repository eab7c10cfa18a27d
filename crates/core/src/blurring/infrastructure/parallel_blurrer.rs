use crate::blurring::domain::blur_strategy::{BlurError, BlurStrategy, StrategyKind};
use crate::blurring::domain::partition::{partition, PartitionKind};
use crate::blurring::domain::strategy_config::PoolSize;
use crate::pool::worker_pool::with_pool;
use crate::shared::picture::Picture;

/// Blurs by dispatching one work unit per partition element to a worker pool.
///
/// Each call snapshots the picture, spins up a fresh pool, submits every
/// unit, waits on the completion barrier, and tears the pool down before the
/// snapshot is dropped. Units own disjoint views of the live picture, so
/// workers write without locks.
pub struct ParallelBlurrer {
    partition: PartitionKind,
    pool_size: PoolSize,
}

impl ParallelBlurrer {
    pub fn new(partition: PartitionKind, pool_size: PoolSize) -> Self {
        Self {
            partition,
            pool_size,
        }
    }

    pub fn partition_kind(&self) -> PartitionKind {
        self.partition
    }

    pub fn pool_size(&self) -> PoolSize {
        self.pool_size
    }
}

impl BlurStrategy for ParallelBlurrer {
    fn kind(&self) -> StrategyKind {
        match self.partition {
            PartitionKind::Row => StrategyKind::Row,
            PartitionKind::Column => StrategyKind::Column,
            PartitionKind::Sector => StrategyKind::Sector,
            PartitionKind::Pixel => StrategyKind::Pixel,
        }
    }

    fn blur(&self, picture: &mut Picture) -> Result<(), BlurError> {
        let units = self
            .partition
            .unit_count(picture.width(), picture.height());
        let workers = self.pool_size.resolve(units);
        log::debug!(
            "{}: dispatching {units} {:?} units to {workers} workers",
            self.kind(),
            self.partition
        );

        let snapshot = picture.snapshot();
        let snapshot = &snapshot;
        let work = partition(self.partition, picture);

        with_pool(workers, move |pool| {
            for unit in work {
                pool.submit(move || unit.run(snapshot))?;
            }
            Ok(())
        })
        .map_err(|source| BlurError::Pool {
            strategy: self.kind(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blurring::infrastructure::sequential_blurrer::SequentialBlurrer;
    use crate::shared::pixel::Pixel;
    use rstest::rstest;

    fn noise(width: usize, height: usize, seed: u32) -> Picture {
        let mut state = seed.max(1);
        let mut next = move || {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        let mut pic = Picture::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                pic.set_pixel(x, y, Pixel::new(next(), next(), next()));
            }
        }
        pic
    }

    fn blurrer(kind: PartitionKind, workers: usize) -> ParallelBlurrer {
        ParallelBlurrer::new(kind, PoolSize::Fixed(workers))
    }

    fn border(pic: &Picture) -> Vec<Pixel> {
        let (w, h) = (pic.width(), pic.height());
        let mut out = Vec::new();
        for x in 0..w {
            out.push(pic.get_pixel(x, 0));
            out.push(pic.get_pixel(x, h - 1));
        }
        for y in 0..h {
            out.push(pic.get_pixel(0, y));
            out.push(pic.get_pixel(w - 1, y));
        }
        out
    }

    #[rstest]
    fn test_matches_sequential_baseline(
        #[values(PartitionKind::Row, PartitionKind::Column, PartitionKind::Sector, PartitionKind::Pixel)]
        kind: PartitionKind,
        #[values((3, 3), (5, 5), (10, 7), (7, 10), (33, 18))] size: (usize, usize),
    ) {
        let (width, height) = size;
        let input = noise(width, height, 7);

        let mut expected = input.clone();
        SequentialBlurrer::new().blur(&mut expected).unwrap();

        let mut actual = input;
        blurrer(kind, 4).blur(&mut actual).unwrap();

        assert_eq!(actual, expected);
    }

    #[rstest]
    fn test_border_is_bit_identical(
        #[values(PartitionKind::Row, PartitionKind::Column, PartitionKind::Sector, PartitionKind::Pixel)]
        kind: PartitionKind,
    ) {
        let mut pic = noise(12, 9, 3);
        let before = border(&pic);
        blurrer(kind, 3).blur(&mut pic).unwrap();
        assert_eq!(border(&pic), before);
    }

    #[rstest]
    #[case::single_pixel(1, 1)]
    #[case::two_by_two(2, 2)]
    #[case::thin_column(2, 40)]
    #[case::thin_row(40, 1)]
    fn test_degenerate_sizes_are_noops(#[case] width: usize, #[case] height: usize) {
        for kind in PartitionKind::ALL {
            let mut pic = noise(width, height, 11);
            let original = pic.clone();
            ParallelBlurrer::new(kind, PoolSize::PerUnit)
                .blur(&mut pic)
                .unwrap();
            assert_eq!(pic, original);
        }
    }

    #[rstest]
    fn test_repeated_runs_are_deterministic(
        #[values(PartitionKind::Row, PartitionKind::Column, PartitionKind::Sector, PartitionKind::Pixel)]
        kind: PartitionKind,
    ) {
        let input = noise(24, 16, 5);
        let strategy = blurrer(kind, 8);
        let mut first = input.clone();
        strategy.blur(&mut first).unwrap();
        for _ in 0..5 {
            let mut again = input.clone();
            strategy.blur(&mut again).unwrap();
            assert_eq!(again.to_rgb_bytes(), first.to_rgb_bytes());
        }
    }

    #[test]
    fn test_blurring_twice_differs_from_once() {
        // Not idempotent: a second pass keeps spreading the spot.
        let mut once = Picture::new(7, 7).unwrap();
        once.set_pixel(3, 3, Pixel::gray(255));
        let strategy = blurrer(PartitionKind::Row, 2);
        strategy.blur(&mut once).unwrap();

        let mut twice = once.clone();
        strategy.blur(&mut twice).unwrap();

        assert_ne!(once, twice);
        assert_eq!(once.get_pixel(3, 3), Pixel::gray(28));
        assert_eq!(twice.get_pixel(3, 3), Pixel::gray(28)); // 9 * 28 / 9
        assert_eq!(once.get_pixel(1, 1), Pixel::gray(0));
        assert_eq!(twice.get_pixel(1, 1), Pixel::gray(3)); // 28 / 9
    }

    #[test]
    fn test_single_worker_still_completes() {
        let input = noise(9, 9, 13);
        let mut expected = input.clone();
        SequentialBlurrer::new().blur(&mut expected).unwrap();

        let mut actual = input;
        blurrer(PartitionKind::Pixel, 1).blur(&mut actual).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_more_workers_than_units() {
        let mut pic = noise(5, 5, 17);
        let mut expected = pic.clone();
        SequentialBlurrer::new().blur(&mut expected).unwrap();
        blurrer(PartitionKind::Row, 64).blur(&mut pic).unwrap();
        assert_eq!(pic, expected);
    }

    #[test]
    fn test_kind_follows_partition() {
        assert_eq!(blurrer(PartitionKind::Row, 1).kind(), StrategyKind::Row);
        assert_eq!(blurrer(PartitionKind::Column, 1).kind(), StrategyKind::Column);
        assert_eq!(blurrer(PartitionKind::Sector, 1).kind(), StrategyKind::Sector);
        assert_eq!(blurrer(PartitionKind::Pixel, 1).kind(), StrategyKind::Pixel);
    }
}
