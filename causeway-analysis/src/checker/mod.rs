//! Statement checking: adapter resolution, reachability, and path
//! enumeration combined into one result per query.

pub mod adapter;
pub mod batch;
pub mod statement;

pub use adapter::{
    ObjectCandidate, QueryAdapter, QueryResolution, Resolution, SubjectCandidate, TableAdapter,
};
pub use batch::fallback_code;
pub use statement::{CheckStage, ModelChecker};
