//! CausewayErrorCode trait for stable, machine-readable error codes.

/// Every error enum maps to a structured code string so callers and logs
/// can classify failures without matching on messages.
pub trait CausewayErrorCode {
    /// Returns the error code string (e.g., "GRAPH_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const CHECK_ERROR: &str = "CHECK_ERROR";
pub const ADAPTER_ERROR: &str = "ADAPTER_ERROR";
pub const SCORE_ERROR: &str = "SCORE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
