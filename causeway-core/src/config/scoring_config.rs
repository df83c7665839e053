//! Path scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Parameters of the Gaussian observation model used to rank paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Standard deviation of measurements. Default: 0.15.
    pub sigma: Option<f64>,
    /// Score as a loss-of-function perturbation (flips predicted signs). Default: false.
    pub loss_of_function: Option<bool>,
    /// Include the last node of each path in the score. Default: false.
    pub include_final_node: Option<bool>,
}

impl ScoringConfig {
    pub fn effective_sigma(&self) -> f64 {
        self.sigma.unwrap_or(constants::DEFAULT_SIGMA)
    }

    pub fn effective_loss_of_function(&self) -> bool {
        self.loss_of_function.unwrap_or(false)
    }

    pub fn effective_include_final_node(&self) -> bool {
        self.include_final_node.unwrap_or(false)
    }
}
