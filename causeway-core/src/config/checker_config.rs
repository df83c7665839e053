//! Statement checker configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Search bounds and signed-graph construction options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckerConfig {
    /// Maximum paths returned per query. Default: 1.
    pub max_paths: Option<usize>,
    /// Maximum path length in edges. Default: 5.
    pub max_path_length: Option<usize>,
    /// Remove negative signed nodes with no predecessor. Default: true.
    pub prune_dangling_negatives: Option<bool>,
}

impl CheckerConfig {
    pub fn effective_max_paths(&self) -> usize {
        self.max_paths.unwrap_or(constants::DEFAULT_MAX_PATHS)
    }

    pub fn effective_max_path_length(&self) -> usize {
        self.max_path_length
            .unwrap_or(constants::DEFAULT_MAX_PATH_LENGTH)
    }

    pub fn effective_prune_dangling_negatives(&self) -> bool {
        self.prune_dangling_negatives
            .unwrap_or(constants::DEFAULT_PRUNE_DANGLING_NEGATIVES)
    }
}
