pub mod parallel_blurrer;
pub mod sequential_blurrer;
pub mod strategy_factory;
