//! # causeway-analysis
//!
//! The signed causal-path engine. Takes an edge-signed influence map, prunes
//! model-compiler artifacts, linearizes sign composition into a node-signed
//! graph, and answers "does X affect Y with polarity P?" with up to N
//! shortest realizing paths, optionally ranked against measured data.

pub mod checker;
pub mod influence;
pub mod model;
pub mod pruning;
pub mod scoring;
pub mod search;
pub mod signed;

pub use checker::{ModelChecker, QueryAdapter, Resolution, TableAdapter};
pub use influence::{InfluenceMap, InfluenceNode, RuleEffect, RuleRole};
pub use model::{
    CausalQuery, CausalQueryKind, Path, PathMetric, PathResult, Polarity, QueryPolarity,
    ResultCode, Sign, SignedNode,
};
pub use pruning::{InfluenceGraphPruner, PruneReport};
pub use scoring::{ObservationTable, PathScorer, ScoredPath};
pub use search::{PathEnumerator, SourceFinder};
pub use signed::SignedGraph;
