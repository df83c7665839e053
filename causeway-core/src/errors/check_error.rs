//! Statement checking errors.

use super::error_code::{self, CausewayErrorCode};
use super::GraphError;

/// Errors that abort a single statement check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("adapter contract violated: {message}")]
    AdapterContract { message: String },

    #[error("invalid search bounds: {message}")]
    InvalidBounds { message: String },
}

impl CausewayErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::AdapterContract { .. } => error_code::ADAPTER_ERROR,
            Self::InvalidBounds { .. } => error_code::CHECK_ERROR,
        }
    }
}
