//! Configuration system for Causeway.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod causeway_config;
pub mod checker_config;
pub mod pruning_config;
pub mod scoring_config;

pub use causeway_config::{CausewayConfig, ConfigOverrides};
pub use checker_config::CheckerConfig;
pub use pruning_config::PruningConfig;
pub use scoring_config::ScoringConfig;
