//! Self-loop removal: a rule influencing itself is never a causal step.

use petgraph::stable_graph::EdgeIndex;

use crate::influence::InfluenceMap;

/// Every edge `(u, u)`.
pub fn self_loop_edges(map: &InfluenceMap) -> Vec<EdgeIndex> {
    map.edge_indices()
        .filter(|&edge| matches!(map.edge_endpoints(edge), Some((s, t)) if s == t))
        .collect()
}
