//! Mutual-redundancy removal.
//!
//! Two nodes whose successor sets differ only by pointing at each other form a
//! mirror pair emitted by the model compiler. Both directed edges between them
//! are dropped. The condition forces equal successor-set sizes, so candidates
//! are only compared within a size group.

use causeway_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::influence::InfluenceMap;

/// Unordered mirror pairs in the current map.
pub fn mutual_redundant_pairs(map: &InfluenceMap) -> Vec<(NodeIndex, NodeIndex)> {
    let mut by_size: FxHashMap<usize, Vec<(NodeIndex, FxHashSet<NodeIndex>)>> =
        FxHashMap::default();
    for idx in map.node_indices() {
        let successors = map.successor_set(idx);
        by_size
            .entry(successors.len())
            .or_default()
            .push((idx, successors));
    }

    let mut pairs = Vec::new();
    for group in by_size.values() {
        for (i, (p1, succ1)) in group.iter().enumerate() {
            for (p2, succ2) in &group[i + 1..] {
                if is_mirror_pair(*p1, succ1, *p2, succ2) {
                    pairs.push((*p1, *p2));
                }
            }
        }
    }
    pairs
}

/// `succ1 \ succ2 == {p2}` and `succ2 \ succ1 == {p1}`.
pub fn is_mirror_pair(
    p1: NodeIndex,
    succ1: &FxHashSet<NodeIndex>,
    p2: NodeIndex,
    succ2: &FxHashSet<NodeIndex>,
) -> bool {
    let mut only_in_1 = succ1.difference(succ2);
    let mut only_in_2 = succ2.difference(succ1);
    only_in_1.next() == Some(&p2)
        && only_in_1.next().is_none()
        && only_in_2.next() == Some(&p1)
        && only_in_2.next().is_none()
}

/// All edges, in both directions, between mirror pairs.
pub fn mutual_redundant_edges(map: &InfluenceMap) -> Vec<EdgeIndex> {
    mutual_redundant_pairs(map)
        .into_iter()
        .flat_map(|(p1, p2)| {
            let mut edges = map.edges_between(p1, p2);
            edges.extend(map.edges_between(p2, p1));
            edges
        })
        .collect()
}

/// Repeat the sweep until no mirror pair remains. Removing one pair can turn
/// a neighbouring pair into a mirror pair.
pub fn remove_mutual_redundancy(map: &mut InfluenceMap) -> usize {
    let mut removed = 0;
    loop {
        let edges = mutual_redundant_edges(map);
        if edges.is_empty() {
            return removed;
        }
        removed += map.remove_edges(edges);
    }
}
