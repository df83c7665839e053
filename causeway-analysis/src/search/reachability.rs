//! Backward BFS from a target: "which candidate sources are upstream, and
//! how far?"

use std::collections::VecDeque;

use causeway_core::types::collections::FxHashSet;
use petgraph::stable_graph::{NodeIndex, Neighbors};
use petgraph::Direction;

use crate::model::SignedNode;
use crate::signed::SignedGraph;

/// Lazy, restartable-by-construction source search.
///
/// Yields `(source, distance)` in nondecreasing distance for every upstream
/// node that is a candidate and positive. Negative senses never count as
/// sources. When the target itself is an explicit candidate, the first cycle
/// closing back on it is yielded once with the cycle length.
pub struct SourceFinder<'g> {
    graph: &'g SignedGraph,
    target: Option<NodeIndex>,
    candidates: Option<FxHashSet<NodeIndex>>,
    visited: FxHashSet<NodeIndex>,
    queue: VecDeque<(NodeIndex, usize)>,
    current: Option<(Neighbors<'g, ()>, usize)>,
    loop_reported: bool,
}

impl<'g> SourceFinder<'g> {
    /// `candidates == None` means any upstream node qualifies. Candidates
    /// absent from the graph are ignored.
    pub fn new(
        graph: &'g SignedGraph,
        target: &SignedNode,
        candidates: Option<&FxHashSet<SignedNode>>,
    ) -> Self {
        let target = graph.index_of(target);
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        if let Some(idx) = target {
            visited.insert(idx);
            queue.push_back((idx, 0));
        }
        Self {
            graph,
            target,
            candidates: candidates
                .map(|set| set.iter().filter_map(|n| graph.index_of(n)).collect()),
            visited,
            queue,
            current: None,
            loop_reported: false,
        }
    }

    fn is_candidate(&self, idx: NodeIndex) -> bool {
        let positive = self
            .graph
            .node(idx)
            .is_some_and(|node| node.polarity.is_positive());
        positive
            && self
                .candidates
                .as_ref()
                .map_or(true, |set| set.contains(&idx))
    }

    fn target_is_explicit_candidate(&self, target: NodeIndex) -> bool {
        self.candidates
            .as_ref()
            .is_some_and(|set| set.contains(&target))
            && self.is_candidate(target)
    }

    fn yielded(&self, idx: NodeIndex, distance: usize) -> Option<(SignedNode, usize)> {
        self.graph.node(idx).map(|node| (node.clone(), distance))
    }
}

impl Iterator for SourceFinder<'_> {
    type Item = (SignedNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.target?;
        loop {
            if self.current.is_none() {
                let (node, distance) = self.queue.pop_front()?;
                let predecessors = self
                    .graph
                    .stable_graph()
                    .neighbors_directed(node, Direction::Incoming);
                self.current = Some((predecessors, distance));
            }
            let Some((predecessors, distance)) = self.current.as_mut() else {
                continue;
            };
            let distance = *distance;
            let Some(pred) = predecessors.next() else {
                self.current = None;
                continue;
            };

            if pred == target {
                // A direct self edge on the target is not a feedback loop.
                if distance > 0 && !self.loop_reported && self.target_is_explicit_candidate(target)
                {
                    self.loop_reported = true;
                    return self.yielded(target, distance + 1);
                }
                continue;
            }

            if self.visited.insert(pred) {
                self.queue.push_back((pred, distance + 1));
                if self.is_candidate(pred) {
                    return self.yielded(pred, distance + 1);
                }
            }
        }
    }
}

/// Start a fresh source search.
pub fn find_sources<'g>(
    graph: &'g SignedGraph,
    target: &SignedNode,
    candidates: Option<&FxHashSet<SignedNode>>,
) -> SourceFinder<'g> {
    SourceFinder::new(graph, target, candidates)
}
