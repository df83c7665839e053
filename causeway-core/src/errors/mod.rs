//! Error handling for Causeway.
//! One error enum per subsystem, `thiserror` only.
//!
//! Expected "no explanation found" outcomes are result codes on the path
//! result, never errors.

pub mod check_error;
pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod score_error;

pub use check_error::CheckError;
pub use config_error::ConfigError;
pub use error_code::CausewayErrorCode;
pub use graph_error::GraphError;
pub use score_error::ScoreError;
