//! Shared constants for the Causeway engine.

/// Causeway version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of paths returned per query.
pub const DEFAULT_MAX_PATHS: usize = 1;

/// Default maximum path length (edges) accepted for an explanation.
pub const DEFAULT_MAX_PATH_LENGTH: usize = 5;

/// Whether negative nodes with no predecessor are pruned from the signed graph.
pub const DEFAULT_PRUNE_DANGLING_NEGATIVES: bool = true;

/// Standard deviation of the Gaussian observation model.
pub const DEFAULT_SIGMA: f64 = 0.15;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "causeway.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "CAUSEWAY_LOG";
