//! The raw, edge-signed influence map produced by an upstream model compiler.

pub mod document;
pub mod signs;
pub mod types;

pub use document::{EdgeRecord, InfluenceMapDocument};
pub use signs::{path_polarity, resolve_edge_signs, EdgeSignMap};
pub use types::{InfluenceEdge, InfluenceMap, InfluenceNode, RuleEffect, RuleRole};
