//! Node-signed graph: each base node appears once per polarity, so sign
//! composition along a path becomes plain reachability.
//!
//! A positive edge `u -> v` links `u(+) -> v(+)` and `u(-) -> v(-)`; a negative
//! edge links `u(+) -> v(-)` and `u(-) -> v(+)`.

use std::collections::VecDeque;

use causeway_core::errors::GraphError;
use causeway_core::types::collections::FxHashMap;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use tracing::debug;

use crate::influence::{resolve_edge_signs, EdgeSignMap, InfluenceMap};
use crate::model::{Polarity, SignedNode};

/// The underlying directed graph type.
pub type SignedStableGraph = StableGraph<SignedNode, (), Directed>;

/// Immutable once built. Shared read-only across queries.
#[derive(Debug, Clone)]
pub struct SignedGraph {
    graph: SignedStableGraph,
    node_index: FxHashMap<SignedNode, NodeIndex>,
}

impl SignedGraph {
    /// Build from a raw map and its resolved edge signs.
    ///
    /// Fails with `GraphError::MissingSign` if any raw edge pair has no entry
    /// in `signs`.
    pub fn build(
        map: &InfluenceMap,
        signs: &EdgeSignMap,
        prune_dangling_negatives: bool,
    ) -> Result<Self, GraphError> {
        let mut signed = Self {
            graph: StableGraph::with_capacity(map.node_count() * 2, map.edge_count() * 2),
            node_index: FxHashMap::default(),
        };

        for node in map.nodes() {
            for polarity in Polarity::BOTH {
                signed.add_node(SignedNode::new(node.id.as_str(), polarity));
            }
        }

        for (from, to, _) in map.edges() {
            let sign = signs
                .get(&(from.to_string(), to.to_string()))
                .copied()
                .ok_or_else(|| GraphError::MissingSign {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;
            for polarity in Polarity::BOTH {
                let source = signed.add_node(SignedNode::new(from, polarity));
                let target = signed.add_node(SignedNode::new(to, polarity.through(sign)));
                signed.graph.update_edge(source, target, ());
            }
        }

        if prune_dangling_negatives {
            let removed = signed.prune_dangling_negatives();
            debug!(nodes_pruned = removed, "dangling negative nodes pruned");
        }

        debug!(
            nodes = signed.node_count(),
            edges = signed.edge_count(),
            "signed graph built"
        );
        Ok(signed)
    }

    /// Resolve edge signs and build in one step.
    pub fn from_influence_map(
        map: &InfluenceMap,
        prune_dangling_negatives: bool,
    ) -> Result<Self, GraphError> {
        let signs = resolve_edge_signs(map)?;
        Self::build(map, &signs, prune_dangling_negatives)
    }

    fn add_node(&mut self, node: SignedNode) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.node_index.insert(node, idx);
        idx
    }

    /// Remove negative nodes without predecessors until none remain. Each
    /// removal can orphan a negative node downstream.
    fn prune_dangling_negatives(&mut self) -> usize {
        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| self.is_dangling_negative(idx))
            .collect();

        let mut removed = 0;
        while let Some(idx) = queue.pop_front() {
            if !self.is_dangling_negative(idx) {
                continue;
            }
            let successors: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .collect();
            if let Some(node) = self.graph.remove_node(idx) {
                self.node_index.remove(&node);
                removed += 1;
            }
            queue.extend(
                successors
                    .into_iter()
                    .filter(|&succ| self.is_dangling_negative(succ)),
            );
        }
        removed
    }

    fn is_dangling_negative(&self, idx: NodeIndex) -> bool {
        self.graph
            .node_weight(idx)
            .is_some_and(|node| node.polarity == Polarity::Negative)
            && self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
    }

    pub(crate) fn stable_graph(&self) -> &SignedStableGraph {
        &self.graph
    }

    pub fn index_of(&self, node: &SignedNode) -> Option<NodeIndex> {
        self.node_index.get(node).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&SignedNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains(&self, node: &SignedNode) -> bool {
        self.node_index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edge(&self, from: &SignedNode, to: &SignedNode) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(s), Some(t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    pub fn predecessors(&self, node: &SignedNode) -> Vec<&SignedNode> {
        self.neighbors(node, Direction::Incoming)
    }

    pub fn successors(&self, node: &SignedNode) -> Vec<&SignedNode> {
        self.neighbors(node, Direction::Outgoing)
    }

    fn neighbors(&self, node: &SignedNode, direction: Direction) -> Vec<&SignedNode> {
        let Some(idx) = self.index_of(node) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.graph.node_weight(n))
            .collect()
    }

    /// Every edge as a pair of signed nodes.
    pub fn edges(&self) -> impl Iterator<Item = (&SignedNode, &SignedNode)> + '_ {
        self.graph.edge_references().filter_map(move |edge| {
            Some((
                self.graph.node_weight(edge.source())?,
                self.graph.node_weight(edge.target())?,
            ))
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SignedNode> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }
}
