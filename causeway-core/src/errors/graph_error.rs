//! Influence map and signed graph errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised for malformed graph input. These are true errors, distinct
/// from a query simply having no explanation.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} has no sign")]
    MissingSign { from: String, to: String },

    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    #[error("no edge between {from} and {to}")]
    MissingEdge { from: String, to: String },

    #[error("malformed graph document: {message}")]
    Malformed { message: String },
}

impl CausewayErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
