//! Path scoring errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors that can occur while scoring paths against observations.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("sigma must be positive and finite, got {sigma}")]
    InvalidSigma { sigma: f64 },

    #[error("normal distribution rejected parameters: {message}")]
    Distribution { message: String },
}

impl CausewayErrorCode for ScoreError {
    fn error_code(&self) -> &'static str {
        error_code::SCORE_ERROR
    }
}
