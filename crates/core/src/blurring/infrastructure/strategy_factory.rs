use crate::blurring::domain::blur_strategy::{BlurStrategy, StrategyKind};
use crate::blurring::domain::strategy_config::StrategyConfig;

use super::parallel_blurrer::ParallelBlurrer;
use super::sequential_blurrer::SequentialBlurrer;

/// Builds the strategy registered under `kind`, sized from `config`.
pub fn create_strategy(kind: StrategyKind, config: &StrategyConfig) -> Box<dyn BlurStrategy> {
    match kind.partition_kind() {
        Some(partition) => {
            let pool_size = config.pool_size(partition);
            log::info!("Using {kind} ({partition:?} partition, pool {pool_size:?})");
            Box::new(ParallelBlurrer::new(partition, pool_size))
        }
        None => {
            log::info!("Using {kind} (sequential baseline)");
            Box::new(SequentialBlurrer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::picture::Picture;
    use crate::shared::pixel::Pixel;

    #[test]
    fn test_every_kind_builds_matching_strategy() {
        let config = StrategyConfig::default();
        for kind in StrategyKind::ALL {
            assert_eq!(create_strategy(kind, &config).kind(), kind);
        }
    }

    #[test]
    fn test_factory_strategies_agree() {
        let mut input = Picture::new(20, 11).unwrap();
        for y in 0..11 {
            for x in 0..20 {
                input.set_pixel(x, y, Pixel::new((x * 13) as u8, (y * 29) as u8, (x * y) as u8));
            }
        }

        let config = StrategyConfig::uniform(3);
        let outputs: Vec<Picture> = StrategyKind::ALL
            .iter()
            .map(|&kind| {
                let mut pic = input.clone();
                create_strategy(kind, &config).blur(&mut pic).unwrap();
                pic
            })
            .collect();

        for out in &outputs[1..] {
            assert_eq!(out, &outputs[0]);
        }
        assert_ne!(outputs[0], input);
    }
}
