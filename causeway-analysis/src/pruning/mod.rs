//! Removal of non-causal artifacts from the raw influence map.
//!
//! Passes run in a fixed order: self loops, parameter nodes, mutual
//! redundancy, then each contradiction pass. Every pass computes its full
//! removal set before touching the graph. Pruning an already pruned map
//! removes nothing.

pub mod contradiction;
pub mod mutual_redundancy;
pub mod parameters;
pub mod self_loops;

use causeway_core::config::PruningConfig;
use causeway_core::types::collections::FxHashSet;
use tracing::{debug, info};

use crate::influence::InfluenceMap;

pub use contradiction::{ContradictionPass, DegradeBindPositive, SubjectObjectCoherence};

/// What a pruning run removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub self_loops_removed: usize,
    pub parameter_nodes_removed: usize,
    pub redundant_edges_removed: usize,
    /// Edges removed per contradiction pass, in pass order.
    pub contradiction_edges_removed: Vec<(&'static str, usize)>,
}

impl PruneReport {
    /// Edges removed directly by edge passes. Edges dropped along with a
    /// parameter node are not counted.
    pub fn edges_removed(&self) -> usize {
        self.self_loops_removed
            + self.redundant_edges_removed
            + self
                .contradiction_edges_removed
                .iter()
                .map(|(_, n)| n)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.edges_removed() == 0 && self.parameter_nodes_removed == 0
    }
}

/// Configurable pipeline of pruning passes.
pub struct InfluenceGraphPruner {
    remove_self_loops: bool,
    remove_parameters: bool,
    remove_mutual_redundancy: bool,
    parameters: FxHashSet<String>,
    contradictions: Vec<Box<dyn ContradictionPass>>,
}

impl InfluenceGraphPruner {
    /// All passes enabled, no parameters, both built-in contradiction passes.
    pub fn new() -> Self {
        Self {
            remove_self_loops: true,
            remove_parameters: true,
            remove_mutual_redundancy: true,
            parameters: FxHashSet::default(),
            contradictions: vec![
                Box::new(SubjectObjectCoherence),
                Box::new(DegradeBindPositive),
            ],
        }
    }

    pub fn from_config(config: &PruningConfig) -> Self {
        let mut contradictions: Vec<Box<dyn ContradictionPass>> = Vec::new();
        if config.effective_subject_object_coherence() {
            contradictions.push(Box::new(SubjectObjectCoherence));
        }
        if config.effective_degrade_bind_positive() {
            contradictions.push(Box::new(DegradeBindPositive));
        }
        Self {
            remove_self_loops: config.effective_remove_self_loops(),
            remove_parameters: config.effective_remove_parameters(),
            remove_mutual_redundancy: config.effective_remove_mutual_redundancy(),
            parameters: config.parameters.iter().cloned().collect(),
            contradictions,
        }
    }

    /// Add parameter node ids to remove.
    pub fn with_parameters<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Append a formalism-specific pass.
    pub fn with_contradiction_pass(mut self, pass: Box<dyn ContradictionPass>) -> Self {
        self.contradictions.push(pass);
        self
    }

    /// Drop all contradiction passes, including the built-in ones.
    pub fn without_contradiction_passes(mut self) -> Self {
        self.contradictions.clear();
        self
    }

    /// Run every enabled pass and return the pruned map.
    pub fn prune(&self, mut map: InfluenceMap) -> (InfluenceMap, PruneReport) {
        let mut report = PruneReport::default();

        if self.remove_self_loops {
            let edges = self_loops::self_loop_edges(&map);
            report.self_loops_removed = map.remove_edges(edges);
            debug!(edges_removed = report.self_loops_removed, "self-loop pass");
        }

        if self.remove_parameters && !self.parameters.is_empty() {
            report.parameter_nodes_removed =
                parameters::remove_parameter_nodes(&mut map, &self.parameters);
            debug!(
                nodes_removed = report.parameter_nodes_removed,
                "parameter pass"
            );
        }

        if self.remove_mutual_redundancy {
            report.redundant_edges_removed = mutual_redundancy::remove_mutual_redundancy(&mut map);
            debug!(
                edges_removed = report.redundant_edges_removed,
                "mutual-redundancy pass"
            );
        }

        for pass in &self.contradictions {
            let edges = pass.contradictory_edges(&map);
            let removed = map.remove_edges(edges);
            debug!(pass = pass.name(), edges_removed = removed, "contradiction pass");
            report.contradiction_edges_removed.push((pass.name(), removed));
        }

        // Contradiction removals can expose new mirror pairs. Contradiction
        // criteria are edge-local, so one more redundancy sweep reaches the
        // fixed point.
        let contradicted: usize = report
            .contradiction_edges_removed
            .iter()
            .map(|(_, n)| n)
            .sum();
        if self.remove_mutual_redundancy && contradicted > 0 {
            let extra = mutual_redundancy::remove_mutual_redundancy(&mut map);
            report.redundant_edges_removed += extra;
            debug!(edges_removed = extra, "mutual-redundancy follow-up pass");
        }

        info!(
            edges_removed = report.edges_removed(),
            nodes_removed = report.parameter_nodes_removed,
            nodes = map.node_count(),
            edges = map.edge_count(),
            "influence map pruned"
        );

        (map, report)
    }
}

impl Default for InfluenceGraphPruner {
    fn default() -> Self {
        Self::new()
    }
}
