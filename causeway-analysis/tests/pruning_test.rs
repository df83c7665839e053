//! Influence map pruning passes.

use causeway_analysis::influence::{InfluenceMap, InfluenceNode, RuleEffect, RuleRole};
use causeway_analysis::pruning::mutual_redundancy::mutual_redundant_pairs;
use causeway_analysis::pruning::{ContradictionPass, SubjectObjectCoherence};
use causeway_analysis::{InfluenceGraphPruner, Sign};
use causeway_core::config::PruningConfig;
use petgraph::stable_graph::EdgeIndex;

fn edge_pairs(map: &InfluenceMap) -> Vec<(String, String)> {
    map.edge_list()
        .into_iter()
        .map(|(from, to, _)| (from, to))
        .collect()
}

fn pair(from: &str, to: &str) -> (String, String) {
    (from.to_string(), to.to_string())
}

#[test]
fn test_self_loops_are_removed() {
    let mut map = InfluenceMap::new();
    map.add_edge("A", "A", Some(Sign::Positive));
    map.add_edge("A", "B", Some(Sign::Positive));

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(report.self_loops_removed, 1);
    assert_eq!(edge_pairs(&pruned), vec![pair("A", "B")]);
}

#[test]
fn test_parameter_nodes_are_removed_with_their_edges() {
    let mut map = InfluenceMap::new();
    map.add_edge("kf_bind", "R1", Some(Sign::Positive));
    map.add_edge("R1", "R2", Some(Sign::Positive));

    let (pruned, report) = InfluenceGraphPruner::new()
        .with_parameters(["kf_bind", "not_in_map"])
        .prune(map);
    assert_eq!(report.parameter_nodes_removed, 1);
    assert!(!pruned.contains_node("kf_bind"));
    assert_eq!(edge_pairs(&pruned), vec![pair("R1", "R2")]);
}

#[test]
fn test_mirror_pair_loses_both_directions() {
    let mut map = InfluenceMap::new();
    map.add_edge("fwd", "rev", Some(Sign::Negative));
    map.add_edge("rev", "fwd", Some(Sign::Negative));
    map.add_edge("fwd", "X", Some(Sign::Positive));
    map.add_edge("rev", "X", Some(Sign::Positive));

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(report.redundant_edges_removed, 2);
    assert_eq!(edge_pairs(&pruned), vec![pair("fwd", "X"), pair("rev", "X")]);
}

#[test]
fn test_asymmetric_successors_are_not_mirrored() {
    let mut map = InfluenceMap::new();
    map.add_edge("P", "Q", Some(Sign::Positive));
    map.add_edge("Q", "P", Some(Sign::Positive));
    map.add_edge("P", "X", Some(Sign::Positive));
    map.add_edge("Q", "Y", Some(Sign::Positive));

    assert!(mutual_redundant_pairs(&map).is_empty());
    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(report.redundant_edges_removed, 0);
    assert_eq!(pruned.edge_count(), 4);
}

#[test]
fn test_mirror_pair_parallel_edges_all_go() {
    let mut map = InfluenceMap::new();
    map.add_edge("P", "Q", Some(Sign::Positive));
    map.add_edge("P", "Q", Some(Sign::Negative));
    map.add_edge("Q", "P", Some(Sign::Positive));

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(report.redundant_edges_removed, 3);
    assert_eq!(pruned.edge_count(), 0);
}

#[test]
fn test_subject_object_mismatch_is_cut() {
    let mut map = InfluenceMap::new();
    map.add_node(InfluenceNode::with_role(
        "phos_Y_by_X",
        RuleRole {
            subject: Some("X".into()),
            object: Some("Y".into()),
            effect: RuleEffect::Other,
        },
    ));
    map.add_node(InfluenceNode::with_role(
        "Z_acts",
        RuleRole {
            subject: Some("Z".into()),
            ..Default::default()
        },
    ));
    map.add_node(InfluenceNode::with_role(
        "Y_acts",
        RuleRole {
            subject: Some("Y".into()),
            ..Default::default()
        },
    ));
    map.add_edge("phos_Y_by_X", "Z_acts", Some(Sign::Positive));
    map.add_edge("phos_Y_by_X", "Y_acts", Some(Sign::Positive));
    map.add_edge("Y_acts", "unknown", Some(Sign::Positive));

    let flagged: Vec<EdgeIndex> = SubjectObjectCoherence.contradictory_edges(&map);
    assert_eq!(flagged.len(), 1);

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(
        report.contradiction_edges_removed,
        vec![("subject_object_coherence", 1), ("degrade_bind_positive", 0)]
    );
    assert!(!pruned.has_edge("phos_Y_by_X", "Z_acts"));
    assert!(pruned.has_edge("phos_Y_by_X", "Y_acts"));
    assert!(pruned.has_edge("Y_acts", "unknown"));
}

#[test]
fn test_degradation_cannot_promote_binding() {
    let mut map = InfluenceMap::new();
    map.add_node(InfluenceNode::with_role(
        "deg_X",
        RuleRole {
            effect: RuleEffect::DecreaseAmount { agent: "X".into() },
            ..Default::default()
        },
    ));
    map.add_node(InfluenceNode::with_role(
        "bind_X_Y",
        RuleRole {
            effect: RuleEffect::Binding {
                participants: vec!["X".into(), "Y".into()],
            },
            ..Default::default()
        },
    ));
    map.add_node(InfluenceNode::with_role(
        "bind_Y_Z",
        RuleRole {
            effect: RuleEffect::Binding {
                participants: vec!["Y".into(), "Z".into()],
            },
            ..Default::default()
        },
    ));
    map.add_edge("deg_X", "bind_X_Y", Some(Sign::Positive));
    map.add_edge("deg_X", "bind_Y_Z", Some(Sign::Positive));
    map.add_edge("bind_Y_Z", "bind_X_Y", Some(Sign::Negative));

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert_eq!(report.contradiction_edges_removed[1], ("degrade_bind_positive", 1));
    assert!(!pruned.has_edge("deg_X", "bind_X_Y"));
    assert!(pruned.has_edge("deg_X", "bind_Y_Z"));
}

#[test]
fn test_negative_degradation_edge_is_kept() {
    let mut map = InfluenceMap::new();
    map.add_node(InfluenceNode::with_role(
        "deg_X",
        RuleRole {
            effect: RuleEffect::DecreaseAmount { agent: "X".into() },
            ..Default::default()
        },
    ));
    map.add_node(InfluenceNode::with_role(
        "bind_X_Y",
        RuleRole {
            effect: RuleEffect::Binding {
                participants: vec!["X".into(), "Y".into()],
            },
            ..Default::default()
        },
    ));
    map.add_edge("deg_X", "bind_X_Y", Some(Sign::Negative));

    let (pruned, report) = InfluenceGraphPruner::new().prune(map);
    assert!(report.is_empty());
    assert_eq!(pruned.edge_count(), 1);
}

#[test]
fn test_disabled_passes_do_nothing() {
    let mut map = InfluenceMap::new();
    map.add_edge("A", "A", Some(Sign::Positive));
    map.add_edge("P", "Q", Some(Sign::Positive));
    map.add_edge("Q", "P", Some(Sign::Positive));

    let config = PruningConfig {
        remove_self_loops: Some(false),
        remove_mutual_redundancy: Some(false),
        ..Default::default()
    };
    let (pruned, report) = InfluenceGraphPruner::from_config(&config).prune(map);
    assert!(report.is_empty());
    assert_eq!(pruned.edge_count(), 3);
}

#[test]
fn test_configured_parameters_are_used() {
    let mut map = InfluenceMap::new();
    map.add_edge("k1", "R1", Some(Sign::Positive));
    let config = PruningConfig {
        parameters: vec!["k1".into()],
        ..Default::default()
    };
    let (pruned, report) = InfluenceGraphPruner::from_config(&config).prune(map);
    assert_eq!(report.parameter_nodes_removed, 1);
    assert_eq!(pruned.node_count(), 1);
}

#[test]
fn test_second_prune_removes_nothing() {
    let mut map = InfluenceMap::new();
    map.add_edge("A", "A", Some(Sign::Positive));
    map.add_edge("P", "Q", Some(Sign::Positive));
    map.add_edge("Q", "P", Some(Sign::Positive));
    map.add_edge("P", "R", Some(Sign::Negative));
    map.add_edge("Q", "R", Some(Sign::Negative));
    map.add_edge("R", "S", Some(Sign::Positive));

    let pruner = InfluenceGraphPruner::new();
    let (once, _) = pruner.prune(map);
    let before = once.edge_list();
    let (twice, report) = pruner.prune(once);
    assert!(report.is_empty());
    assert_eq!(twice.edge_list(), before);
}
