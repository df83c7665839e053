//! Ranking of explanatory paths against measured data.

pub mod observations;
pub mod scorer;

pub use observations::ObservationTable;
pub use scorer::{PathScorer, ScoredPath};
