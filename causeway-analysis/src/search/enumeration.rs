//! Shortest-first simple path enumeration (Yen's algorithm over unit edge
//! weights) and the feedback-loop case where source and target coincide.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use causeway_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::model::{Path, SignedNode};
use crate::signed::SignedGraph;

/// Entry point for path enumeration.
pub struct PathEnumerator;

impl PathEnumerator {
    /// All simple paths from `source` to `target`, shortest first. Empty when
    /// either node is missing or no path exists.
    pub fn enumerate<'g>(
        graph: &'g SignedGraph,
        source: &SignedNode,
        target: &SignedNode,
    ) -> PathIter<'g> {
        PathIter::new(graph, source, target, None)
    }

    /// Same as [`PathEnumerator::enumerate`], stopping before any path longer
    /// than `max_len` edges.
    pub fn enumerate_within<'g>(
        graph: &'g SignedGraph,
        source: &SignedNode,
        target: &SignedNode,
        max_len: usize,
    ) -> PathIter<'g> {
        PathIter::new(graph, source, target, Some(max_len))
    }
}

/// Lazy sequence of paths.
pub struct PathIter<'g> {
    graph: &'g SignedGraph,
    kind: PathIterKind<'g>,
}

enum PathIterKind<'g> {
    Empty,
    Direct(ShortestSimplePaths<'g>),
    Loop(LoopPaths<'g>),
}

impl<'g> PathIter<'g> {
    fn new(
        graph: &'g SignedGraph,
        source: &SignedNode,
        target: &SignedNode,
        max_len: Option<usize>,
    ) -> Self {
        let kind = match (graph.index_of(source), graph.index_of(target)) {
            (Some(s), Some(t)) if s == t => PathIterKind::Loop(LoopPaths::new(graph, s, max_len)),
            (Some(s), Some(t)) => {
                PathIterKind::Direct(ShortestSimplePaths::new(graph, s, t, max_len))
            }
            _ => PathIterKind::Empty,
        };
        Self { graph, kind }
    }
}

impl Iterator for PathIter<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        let indices = match &mut self.kind {
            PathIterKind::Empty => return None,
            PathIterKind::Direct(paths) => paths.next()?,
            PathIterKind::Loop(paths) => paths.next()?,
        };
        Path::new(
            indices
                .into_iter()
                .filter_map(|idx| self.graph.node(idx).cloned())
                .collect(),
        )
    }
}

/// Yen's k-shortest simple paths, generated one at a time.
struct ShortestSimplePaths<'g> {
    graph: &'g SignedGraph,
    source: NodeIndex,
    target: NodeIndex,
    max_len: Option<usize>,
    found: Vec<Vec<NodeIndex>>,
    candidates: BinaryHeap<Reverse<(usize, Vec<NodeIndex>)>>,
    seen: FxHashSet<Vec<NodeIndex>>,
    started: bool,
    done: bool,
}

impl<'g> ShortestSimplePaths<'g> {
    fn new(
        graph: &'g SignedGraph,
        source: NodeIndex,
        target: NodeIndex,
        max_len: Option<usize>,
    ) -> Self {
        Self {
            graph,
            source,
            target,
            max_len,
            found: Vec::new(),
            candidates: BinaryHeap::new(),
            seen: FxHashSet::default(),
            started: false,
            done: false,
        }
    }

    /// Push every spur deviation of the most recently found path.
    fn extend_candidates(&mut self) {
        let Some(last) = self.found.last().cloned() else {
            return;
        };
        for spur_idx in 0..last.len().saturating_sub(1) {
            let spur_node = last[spur_idx];
            let root = &last[..=spur_idx];

            let excluded_edges: FxHashSet<(NodeIndex, NodeIndex)> = self
                .found
                .iter()
                .filter(|path| path.len() > spur_idx + 1 && &path[..=spur_idx] == root)
                .map(|path| (path[spur_idx], path[spur_idx + 1]))
                .collect();
            let excluded_nodes: FxHashSet<NodeIndex> = root[..spur_idx].iter().copied().collect();

            if let Some(spur_path) = shortest_path_excluding(
                self.graph,
                spur_node,
                self.target,
                &excluded_edges,
                &excluded_nodes,
            ) {
                let mut total = root[..spur_idx].to_vec();
                total.extend(spur_path);
                if self.seen.insert(total.clone()) {
                    self.candidates.push(Reverse((total.len() - 1, total)));
                }
            }
        }
    }
}

impl Iterator for ShortestSimplePaths<'_> {
    type Item = Vec<NodeIndex>;

    fn next(&mut self) -> Option<Vec<NodeIndex>> {
        if self.done {
            return None;
        }
        let next = if self.started {
            self.extend_candidates();
            self.candidates.pop().map(|Reverse((_, path))| path)
        } else {
            self.started = true;
            shortest_path_excluding(
                self.graph,
                self.source,
                self.target,
                &FxHashSet::default(),
                &FxHashSet::default(),
            )
        };

        let Some(path) = next else {
            self.done = true;
            return None;
        };
        // Paths come out in nondecreasing length, so the first one over the
        // bound ends the stream.
        if self.max_len.is_some_and(|max| path.len() - 1 > max) {
            self.done = true;
            return None;
        }
        self.seen.insert(path.clone());
        self.found.push(path.clone());
        Some(path)
    }
}

/// Closed feedback paths `source -> ... -> p -> source`, one predecessor `p`
/// at a time. Each loop has at least two edges.
struct LoopPaths<'g> {
    graph: &'g SignedGraph,
    source: NodeIndex,
    max_len: Option<usize>,
    predecessors: std::vec::IntoIter<NodeIndex>,
    current: Option<ShortestSimplePaths<'g>>,
}

impl<'g> LoopPaths<'g> {
    fn new(graph: &'g SignedGraph, source: NodeIndex, max_len: Option<usize>) -> Self {
        let predecessors: Vec<NodeIndex> = graph
            .stable_graph()
            .neighbors_directed(source, Direction::Incoming)
            .filter(|&pred| pred != source)
            .collect();
        Self {
            graph,
            source,
            max_len,
            predecessors: predecessors.into_iter(),
            current: None,
        }
    }
}

impl Iterator for LoopPaths<'_> {
    type Item = Vec<NodeIndex>;

    fn next(&mut self) -> Option<Vec<NodeIndex>> {
        // Closing the loop adds one edge.
        let inner_max = match self.max_len {
            Some(0) => return None,
            Some(max) => Some(max - 1),
            None => None,
        };
        loop {
            if let Some(paths) = self.current.as_mut() {
                if let Some(mut path) = paths.next() {
                    path.push(self.source);
                    return Some(path);
                }
                self.current = None;
            }
            let pred = self.predecessors.next()?;
            self.current = Some(ShortestSimplePaths::new(
                self.graph,
                self.source,
                pred,
                inner_max,
            ));
        }
    }
}

/// Unit-weight shortest path by BFS, avoiding the given edges and nodes.
fn shortest_path_excluding(
    graph: &SignedGraph,
    from: NodeIndex,
    to: NodeIndex,
    excluded_edges: &FxHashSet<(NodeIndex, NodeIndex)>,
    excluded_nodes: &FxHashSet<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    let graph = graph.stable_graph();
    let mut prev: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(from);
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        if node == to {
            let mut path = vec![to];
            let mut current = to;
            while let Some(&p) = prev.get(&current) {
                path.push(p);
                current = p;
            }
            path.reverse();
            return Some(path);
        }
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if excluded_edges.contains(&(node, next)) || excluded_nodes.contains(&next) {
                continue;
            }
            if visited.insert(next) {
                prev.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}
