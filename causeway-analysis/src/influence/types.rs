//! InfluenceMap: petgraph StableGraph multigraph over rule nodes.

use causeway_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::model::Sign;

/// What a rule does, as far as the contradiction passes care.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleEffect {
    /// The rule lowers the amount of `agent` (degradation).
    DecreaseAmount { agent: String },
    /// The rule binds `participants` together.
    Binding { participants: Vec<String> },
    #[default]
    Other,
}

/// Formalism-specific facts about a rule node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleRole {
    /// Entity acting in the rule.
    pub subject: Option<String>,
    /// Entity acted upon by the rule.
    pub object: Option<String>,
    pub effect: RuleEffect,
}

/// A rule (or other causal step) in the influence map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluenceNode {
    pub id: String,
    #[serde(default)]
    pub role: RuleRole,
}

impl InfluenceNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: RuleRole::default(),
        }
    }

    pub fn with_role(id: impl Into<String>, role: RuleRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// A raw influence edge. The sign may be unknown until checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfluenceEdge {
    pub sign: Option<Sign>,
}

/// The underlying directed multigraph type.
pub type InfluenceStableGraph = StableGraph<InfluenceNode, InfluenceEdge, Directed>;

/// Directed multigraph with O(1) id lookup. Parallel edges are allowed and may
/// disagree on sign.
#[derive(Debug, Clone, Default)]
pub struct InfluenceMap {
    graph: InfluenceStableGraph,
    node_index: FxHashMap<String, NodeIndex>,
}

impl InfluenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return the existing index if the id is already present.
    pub fn add_node(&mut self, node: InfluenceNode) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        idx
    }

    /// Get or create a node with no role information.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        match self.node_index.get(id) {
            Some(&idx) => idx,
            None => self.add_node(InfluenceNode::new(id)),
        }
    }

    /// Add an edge, creating missing endpoints.
    pub fn add_edge(&mut self, from: &str, to: &str, sign: Option<Sign>) -> EdgeIndex {
        let source = self.ensure_node(from);
        let target = self.ensure_node(to);
        self.graph.add_edge(source, target, InfluenceEdge { sign })
    }

    pub fn get_node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&InfluenceNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &InfluenceNode> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Every edge as `(from id, to id, sign)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Option<Sign>)> + '_ {
        self.graph.edge_references().filter_map(move |edge| {
            let from = self.graph.node_weight(edge.source())?;
            let to = self.graph.node_weight(edge.target())?;
            Some((from.id.as_str(), to.id.as_str(), edge.weight().sign))
        })
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    pub fn edge_sign(&self, edge: EdgeIndex) -> Option<Sign> {
        self.graph.edge_weight(edge).and_then(|w| w.sign)
    }

    /// Whether at least one edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.get_node(from), self.get_node(to)) {
            (Some(s), Some(t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    /// Distinct successors of a node.
    pub fn successor_set(&self, idx: NodeIndex) -> FxHashSet<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect()
    }

    /// All parallel edges `from -> to`.
    pub fn edges_between(&self, from: NodeIndex, to: NodeIndex) -> Vec<EdgeIndex> {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .filter(|edge| edge.target() == to)
            .map(|edge| edge.id())
            .collect()
    }

    /// Remove a batch of edges. Already-removed indices are skipped.
    pub(crate) fn remove_edges(&mut self, edges: impl IntoIterator<Item = EdgeIndex>) -> usize {
        edges
            .into_iter()
            .filter(|&edge| self.graph.remove_edge(edge).is_some())
            .count()
    }

    /// Remove a node and all its edges. Returns false if it was not present.
    pub(crate) fn remove_node(&mut self, id: &str) -> bool {
        match self.node_index.remove(id) {
            Some(idx) => {
                self.graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    /// Sorted `(from, to, sign)` listing, for comparing graphs.
    pub fn edge_list(&self) -> Vec<(String, String, Option<i8>)> {
        let mut list: Vec<_> = self
            .edges()
            .map(|(from, to, sign)| (from.to_string(), to.to_string(), sign.map(Sign::value)))
            .collect();
        list.sort();
        list
    }
}
