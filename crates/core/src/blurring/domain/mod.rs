pub mod blur_strategy;
pub mod kernel;
pub mod partition;
pub mod strategy_config;
