//! Influence map pruning configuration.

use serde::{Deserialize, Serialize};

/// Toggles for the pruning passes. Every pass is enabled unless set to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PruningConfig {
    pub remove_self_loops: Option<bool>,
    pub remove_parameters: Option<bool>,
    pub remove_mutual_redundancy: Option<bool>,
    pub subject_object_coherence: Option<bool>,
    pub degrade_bind_positive: Option<bool>,
    /// Node ids of static model parameters, removed by the parameter pass.
    pub parameters: Vec<String>,
}

impl PruningConfig {
    pub fn effective_remove_self_loops(&self) -> bool {
        self.remove_self_loops.unwrap_or(true)
    }

    pub fn effective_remove_parameters(&self) -> bool {
        self.remove_parameters.unwrap_or(true)
    }

    pub fn effective_remove_mutual_redundancy(&self) -> bool {
        self.remove_mutual_redundancy.unwrap_or(true)
    }

    pub fn effective_subject_object_coherence(&self) -> bool {
        self.subject_object_coherence.unwrap_or(true)
    }

    pub fn effective_degrade_bind_positive(&self) -> bool {
        self.degrade_bind_positive.unwrap_or(true)
    }
}
