//! Value types shared across the engine: signs, signed nodes, queries, paths,
//! and per-query results.

pub mod path;
pub mod polarity;
pub mod query;

pub use path::{Path, PathMetric, PathResult, ResultCode};
pub use polarity::{Polarity, Sign, SignedNode};
pub use query::{CausalQuery, CausalQueryKind, QueryPolarity};
