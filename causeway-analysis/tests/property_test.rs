//! Property tests over small random influence maps.

use proptest::prelude::*;

use causeway_analysis::influence::resolve_edge_signs;
use causeway_analysis::pruning::mutual_redundancy::{
    is_mirror_pair, mutual_redundant_edges, mutual_redundant_pairs,
};
use causeway_analysis::search::find_sources;
use causeway_analysis::{
    CausalQuery, InfluenceGraphPruner, InfluenceMap, ModelChecker, PathEnumerator, ResultCode,
    Sign, SignedGraph, SignedNode, TableAdapter,
};
use causeway_core::types::collections::FxHashSet;

const NODES: usize = 8;

fn build_map(edges: &[(usize, usize, bool)]) -> InfluenceMap {
    let mut map = InfluenceMap::new();
    for i in 0..NODES {
        map.ensure_node(&format!("n{i}"));
    }
    for &(from, to, positive) in edges {
        let sign = if positive { Sign::Positive } else { Sign::Negative };
        map.add_edge(&format!("n{from}"), &format!("n{to}"), Some(sign));
    }
    map
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..NODES, 0..NODES, any::<bool>()), 0..NODES * 3)
}

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

proptest! {
    #[test]
    fn test_signed_edges_compose_with_raw_signs(edges in edge_strategy()) {
        let map = build_map(&edges);
        let signs = resolve_edge_signs(&map).unwrap();
        let graph = SignedGraph::build(&map, &signs, false).unwrap();

        prop_assert_eq!(graph.edge_count(), signs.len() * 2);
        for (from, to) in graph.edges() {
            let sign = signs[&(from.base.clone(), to.base.clone())];
            prop_assert_eq!(to.polarity, from.polarity.through(sign));
        }
    }

    #[test]
    fn test_pruning_twice_changes_nothing(
        edges in edge_strategy(),
        parameter in 0..NODES,
    ) {
        let pruner = InfluenceGraphPruner::new().with_parameters([format!("n{parameter}")]);
        let (once, _) = pruner.prune(build_map(&edges));
        let expected = once.edge_list();
        let (twice, report) = pruner.prune(once);
        prop_assert!(report.is_empty(), "second prune removed something: {:?}", report);
        prop_assert_eq!(twice.edge_list(), expected);
    }

    #[test]
    fn test_mirror_grouping_matches_all_pairs(edges in edge_strategy()) {
        let map = build_map(&edges);
        let indices: Vec<_> = map.node_indices().collect();

        let mut naive = FxHashSet::default();
        for (i, &p1) in indices.iter().enumerate() {
            for &p2 in &indices[i + 1..] {
                let (s1, s2) = (map.successor_set(p1), map.successor_set(p2));
                if is_mirror_pair(p1, &s1, p2, &s2) {
                    naive.insert(unordered(p1.index(), p2.index()));
                }
            }
        }
        let grouped: FxHashSet<_> = mutual_redundant_pairs(&map)
            .into_iter()
            .map(|(a, b)| unordered(a.index(), b.index()))
            .collect();
        prop_assert_eq!(grouped, naive);
    }

    #[test]
    fn test_mirror_removal_is_symmetric(edges in edge_strategy()) {
        let map = build_map(&edges);
        let removed: FxHashSet<(usize, usize)> = mutual_redundant_edges(&map)
            .into_iter()
            .filter_map(|edge| map.edge_endpoints(edge))
            .map(|(a, b)| (a.index(), b.index()))
            .collect();
        for &(a, b) in &removed {
            prop_assert!(removed.contains(&(b, a)));
        }
    }

    #[test]
    fn test_every_reported_source_has_a_path_of_that_length(
        edges in edge_strategy(),
        target in 0..NODES,
        negative_target in any::<bool>(),
    ) {
        let graph = SignedGraph::from_influence_map(&build_map(&edges), true).unwrap();
        let target = if negative_target {
            SignedNode::negative(format!("n{target}"))
        } else {
            SignedNode::positive(format!("n{target}"))
        };

        for (source, length) in find_sources(&graph, &target, None) {
            prop_assert!(source.polarity.is_positive());
            let found = PathEnumerator::enumerate_within(&graph, &source, &target, length)
                .any(|path| path.len() == length);
            prop_assert!(found, "no path of length {} from {} to {}", length, source, target);
        }

        let itself: FxHashSet<SignedNode> = [target.clone()].into_iter().collect();
        for (source, length) in find_sources(&graph, &target, Some(&itself)) {
            prop_assert_eq!(&source, &target);
            let found = PathEnumerator::enumerate_within(&graph, &source, &target, length)
                .any(|path| path.len() == length);
            prop_assert!(found, "no loop of length {} through {}", length, target);
        }
    }

    #[test]
    fn test_loop_paths_close_on_their_source(
        edges in edge_strategy(),
        node in 0..NODES,
        max_len in 1_usize..5,
    ) {
        let graph = SignedGraph::from_influence_map(&build_map(&edges), false).unwrap();
        let source = SignedNode::positive(format!("n{node}"));
        for path in PathEnumerator::enumerate_within(&graph, &source, &source, max_len) {
            prop_assert!(path.is_loop());
            prop_assert!(path.len() >= 2);
            prop_assert!(path.len() <= max_len);
            let interior: FxHashSet<&SignedNode> = path.nodes()[..path.len()].iter().collect();
            prop_assert_eq!(interior.len(), path.len());
        }
    }

    #[test]
    fn test_results_respect_max_paths(
        edges in edge_strategy(),
        subject in 0..NODES,
        object in 0..NODES,
        max_paths in 0_usize..4,
        max_path_length in 1_usize..5,
    ) {
        let mut adapter = TableAdapter::new();
        for i in 0..NODES {
            let id = format!("n{i}");
            adapter = adapter
                .with_sources(&id, [id.clone()])
                .with_observable(&id, &id, Sign::Positive);
        }
        let graph = SignedGraph::from_influence_map(&build_map(&edges), true).unwrap();
        let checker = ModelChecker::new(graph, adapter);
        let query = CausalQuery::decreases(&format!("n{subject}"), &format!("n{object}"));

        let result = checker.check_statement(&query, max_paths, max_path_length).unwrap();
        prop_assert!(result.paths.len() <= max_paths);
        prop_assert!(result.paths.iter().all(|p| p.len() <= max_path_length));
        if max_paths == 0 && !result.path_metrics.is_empty() {
            prop_assert_eq!(result.result_code, ResultCode::MaxPathsZero);
            prop_assert!(result.path_found);
            prop_assert!(result.paths.is_empty());
        }
        if result.result_code == ResultCode::PathsFound {
            prop_assert!(!result.paths.is_empty());
        }
    }
}
