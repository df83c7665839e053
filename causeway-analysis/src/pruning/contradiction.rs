//! Formalism-specific contradiction passes.

use petgraph::stable_graph::EdgeIndex;

use crate::influence::{InfluenceMap, RuleEffect};
use crate::model::Sign;

/// A pluggable pass that flags edges contradicting the modeling formalism.
pub trait ContradictionPass: Send + Sync {
    /// Name used in logs and prune reports.
    fn name(&self) -> &'static str;

    /// Edges to drop. Must depend only on the edge and its endpoints so that
    /// repeated application removes nothing new.
    fn contradictory_edges(&self, map: &InfluenceMap) -> Vec<EdgeIndex>;
}

/// Drops `u -> v` when the entity `u` acts upon is not the entity acting in `v`.
/// Edges with an endpoint of unknown role are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectObjectCoherence;

impl ContradictionPass for SubjectObjectCoherence {
    fn name(&self) -> &'static str {
        "subject_object_coherence"
    }

    fn contradictory_edges(&self, map: &InfluenceMap) -> Vec<EdgeIndex> {
        map.edge_indices()
            .filter(|&edge| {
                let Some((u, v)) = map.edge_endpoints(edge) else {
                    return false;
                };
                let (Some(upstream), Some(downstream)) = (map.node(u), map.node(v)) else {
                    return false;
                };
                match (&upstream.role.object, &downstream.role.subject) {
                    (Some(object), Some(subject)) => object != subject,
                    _ => false,
                }
            })
            .collect()
    }
}

/// Drops a positive edge from "decrease amount of X" to "X binds Y".
/// Degrading X cannot enable a binding that needs X present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegradeBindPositive;

impl ContradictionPass for DegradeBindPositive {
    fn name(&self) -> &'static str {
        "degrade_bind_positive"
    }

    fn contradictory_edges(&self, map: &InfluenceMap) -> Vec<EdgeIndex> {
        map.edge_indices()
            .filter(|&edge| {
                if map.edge_sign(edge) != Some(Sign::Positive) {
                    return false;
                }
                let Some((u, v)) = map.edge_endpoints(edge) else {
                    return false;
                };
                let (Some(r1), Some(r2)) = (map.node(u), map.node(v)) else {
                    return false;
                };
                match (&r1.role.effect, &r2.role.effect) {
                    (
                        RuleEffect::DecreaseAmount { agent },
                        RuleEffect::Binding { participants },
                    ) => participants.contains(agent),
                    _ => false,
                }
            })
            .collect()
    }
}
