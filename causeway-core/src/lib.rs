//! # causeway-core
//!
//! Foundation crate for the Causeway signed-path engine.
//! Defines errors, config, tracing setup, shared collection types, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CausewayConfig;
pub use errors::{CausewayErrorCode, CheckError, ConfigError, GraphError, ScoreError};
