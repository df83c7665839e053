//! Top-level Causeway configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CheckerConfig, PruningConfig, ScoringConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`CAUSEWAY_*`)
/// 3. Project config (`causeway.toml` in the project root)
/// 4. User config (`~/.causeway/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CausewayConfig {
    pub checker: CheckerConfig,
    pub pruning: PruningConfig,
    pub scoring: ScoringConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_paths: Option<usize>,
    pub max_path_length: Option<usize>,
    pub sigma: Option<f64>,
    pub loss_of_function: Option<bool>,
}

impl CausewayConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. A broken user file is fatal only if it
        // fails to parse; an unreadable one is skipped.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) | Err(ConfigError::FileNotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CausewayConfig) -> Result<(), ConfigError> {
        if let Some(sigma) = config.scoring.sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.sigma".to_string(),
                    message: "must be a positive, finite number".to_string(),
                });
            }
        }
        if config.checker.max_path_length == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "checker.max_path_length".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the user config path: `~/.causeway/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".causeway").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut CausewayConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CausewayConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut CausewayConfig, other: &CausewayConfig) {
        // Checker
        if other.checker.max_paths.is_some() {
            base.checker.max_paths = other.checker.max_paths;
        }
        if other.checker.max_path_length.is_some() {
            base.checker.max_path_length = other.checker.max_path_length;
        }
        if other.checker.prune_dangling_negatives.is_some() {
            base.checker.prune_dangling_negatives = other.checker.prune_dangling_negatives;
        }

        // Pruning
        if other.pruning.remove_self_loops.is_some() {
            base.pruning.remove_self_loops = other.pruning.remove_self_loops;
        }
        if other.pruning.remove_parameters.is_some() {
            base.pruning.remove_parameters = other.pruning.remove_parameters;
        }
        if other.pruning.remove_mutual_redundancy.is_some() {
            base.pruning.remove_mutual_redundancy = other.pruning.remove_mutual_redundancy;
        }
        if other.pruning.subject_object_coherence.is_some() {
            base.pruning.subject_object_coherence = other.pruning.subject_object_coherence;
        }
        if other.pruning.degrade_bind_positive.is_some() {
            base.pruning.degrade_bind_positive = other.pruning.degrade_bind_positive;
        }
        if !other.pruning.parameters.is_empty() {
            base.pruning.parameters = other.pruning.parameters.clone();
        }

        // Scoring
        if other.scoring.sigma.is_some() {
            base.scoring.sigma = other.scoring.sigma;
        }
        if other.scoring.loss_of_function.is_some() {
            base.scoring.loss_of_function = other.scoring.loss_of_function;
        }
        if other.scoring.include_final_node.is_some() {
            base.scoring.include_final_node = other.scoring.include_final_node;
        }
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut CausewayConfig) {
        if let Ok(val) = std::env::var("CAUSEWAY_MAX_PATHS") {
            if let Ok(v) = val.parse::<usize>() {
                config.checker.max_paths = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_MAX_PATH_LENGTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.checker.max_path_length = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_SIGMA") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.sigma = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_LOSS_OF_FUNCTION") {
            if let Ok(v) = val.parse::<bool>() {
                config.scoring.loss_of_function = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut CausewayConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_paths {
            config.checker.max_paths = Some(v);
        }
        if let Some(v) = overrides.max_path_length {
            config.checker.max_path_length = Some(v);
        }
        if let Some(v) = overrides.sigma {
            config.scoring.sigma = Some(v);
        }
        if let Some(v) = overrides.loss_of_function {
            config.scoring.loss_of_function = Some(v);
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
