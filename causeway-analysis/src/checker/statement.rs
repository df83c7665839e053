//! Per-query check: resolve, search, enumerate.

use std::fmt;

use causeway_core::config::CheckerConfig;
use causeway_core::errors::{CheckError, GraphError};
use causeway_core::types::collections::FxHashSet;
use causeway_core::CausewayConfig;
use tracing::{debug, trace};

use super::adapter::{
    ObjectCandidate, QueryAdapter, QueryResolution, Resolution, SubjectCandidate,
};
use crate::influence::{resolve_edge_signs, InfluenceMap};
use crate::model::{CausalQuery, PathMetric, PathResult, ResultCode, SignedNode};
use crate::pruning::InfluenceGraphPruner;
use crate::search::{PathEnumerator, SourceFinder};
use crate::signed::SignedGraph;

/// Where a query is in its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    Unresolved,
    SourcesResolved,
    SearchDone,
    Terminal,
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unresolved => "unresolved",
            Self::SourcesResolved => "sources_resolved",
            Self::SearchDone => "search_done",
            Self::Terminal => "terminal",
        })
    }
}

/// Checks causal queries against one immutable signed graph.
#[derive(Debug)]
pub struct ModelChecker<A> {
    graph: SignedGraph,
    adapter: A,
    max_paths: usize,
    max_path_length: usize,
}

impl<A: QueryAdapter> ModelChecker<A> {
    /// Uses the default search bounds for batch checks.
    pub fn new(graph: SignedGraph, adapter: A) -> Self {
        let defaults = CheckerConfig::default();
        Self {
            graph,
            adapter,
            max_paths: defaults.effective_max_paths(),
            max_path_length: defaults.effective_max_path_length(),
        }
    }

    /// Prune the raw map, resolve edge signs, and build the signed graph.
    pub fn from_influence_map(
        map: InfluenceMap,
        adapter: A,
        config: &CausewayConfig,
    ) -> Result<Self, GraphError> {
        let (pruned, report) = InfluenceGraphPruner::from_config(&config.pruning).prune(map);
        debug!(
            edges_removed = report.edges_removed(),
            nodes_removed = report.parameter_nodes_removed,
            "influence map ready"
        );
        let signs = resolve_edge_signs(&pruned)?;
        let graph = SignedGraph::build(
            &pruned,
            &signs,
            config.checker.effective_prune_dangling_negatives(),
        )?;
        Ok(Self::new(graph, adapter).with_bounds(
            config.checker.effective_max_paths(),
            config.checker.effective_max_path_length(),
        ))
    }

    /// Bounds used by [`ModelChecker::check`] and batch checks.
    pub fn with_bounds(mut self, max_paths: usize, max_path_length: usize) -> Self {
        self.max_paths = max_paths;
        self.max_path_length = max_path_length;
        self
    }

    pub fn graph(&self) -> &SignedGraph {
        &self.graph
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    pub fn max_path_length(&self) -> usize {
        self.max_path_length
    }

    /// Check with the configured bounds.
    pub fn check(&self, query: &CausalQuery) -> Result<PathResult, CheckError> {
        self.check_statement(query, self.max_paths, self.max_path_length)
    }

    /// Try every (subject, object) candidate pair. The first pair with
    /// `path_found` wins. Otherwise a length overrun beats a plain miss,
    /// which beats a source resolution failure.
    pub fn check_statement(
        &self,
        query: &CausalQuery,
        max_paths: usize,
        max_path_length: usize,
    ) -> Result<PathResult, CheckError> {
        if max_path_length == 0 {
            return Err(CheckError::InvalidBounds {
                message: "max_path_length must be at least 1".to_string(),
            });
        }
        trace!(query = %query, stage = %CheckStage::Unresolved, "checking statement");

        let resolution = match self.resolve_query(query)? {
            Resolution::Resolved(resolution) => resolution,
            Resolution::Unresolved(code) => {
                debug!(query = %query, code = %code, stage = %CheckStage::Terminal, "query unresolved");
                return Ok(PathResult::not_found(code, max_paths, max_path_length));
            }
        };

        let mut length_exceeded: Option<PathResult> = None;
        let mut searched: Option<PathResult> = None;
        let mut last_unresolved = ResultCode::InputRulesNotFound;

        for subject in &resolution.subjects {
            let sources = match self.resolve_sources(subject)? {
                Resolution::Resolved(sources) => sources,
                Resolution::Unresolved(code) => {
                    debug!(query = %query, subject = ?subject, code = %code, "subject has no sources");
                    last_unresolved = code;
                    continue;
                }
            };
            trace!(subject = ?subject, stage = %CheckStage::SourcesResolved, "sources resolved");

            for object in &resolution.objects {
                let result = self.search(sources.as_ref(), object, max_paths, max_path_length);
                trace!(
                    object = %object.node,
                    code = %result.result_code,
                    stage = %CheckStage::SearchDone,
                    "search done"
                );
                if result.path_found {
                    debug!(
                        query = %query,
                        code = %result.result_code,
                        paths = result.paths.len(),
                        stage = %CheckStage::Terminal,
                        "statement explained"
                    );
                    return Ok(result);
                }
                match result.result_code {
                    ResultCode::MaxPathLengthExceeded => {
                        length_exceeded.get_or_insert(result);
                    }
                    _ => {
                        searched.get_or_insert(result);
                    }
                }
            }
        }

        let result = length_exceeded.or(searched).unwrap_or_else(|| {
            PathResult::not_found(last_unresolved, max_paths, max_path_length)
        });
        debug!(
            query = %query,
            code = %result.result_code,
            stage = %CheckStage::Terminal,
            "statement not explained"
        );
        Ok(result)
    }

    /// Ask the adapter for subject and object candidates.
    pub fn resolve_query(
        &self,
        query: &CausalQuery,
    ) -> Result<Resolution<QueryResolution>, CheckError> {
        let resolution = self.adapter.resolve_statement(query)?;
        match &resolution {
            Resolution::Resolved(r) if r.subjects.is_empty() || r.objects.is_empty() => {
                Err(CheckError::AdapterContract {
                    message: format!("resolved query '{query}' with no subject or object candidates"),
                })
            }
            Resolution::Unresolved(code)
                if !matches!(
                    code,
                    ResultCode::StatementTypeNotHandled
                        | ResultCode::SubjectMonomersNotFound
                        | ResultCode::ObservablesNotFound
                ) =>
            {
                Err(CheckError::AdapterContract {
                    message: format!("statement resolution cannot end in {code}"),
                })
            }
            _ => Ok(resolution),
        }
    }

    /// Expand one subject candidate into positive source nodes. `None`
    /// means any upstream node qualifies.
    pub fn resolve_sources(
        &self,
        subject: &SubjectCandidate,
    ) -> Result<Resolution<Option<FxHashSet<SignedNode>>>, CheckError> {
        let entity = match subject {
            SubjectCandidate::Any => return Ok(Resolution::Resolved(None)),
            SubjectCandidate::Entity(entity) => entity,
        };
        match self.adapter.resolve_subject_to_sources(entity)? {
            Resolution::Resolved(nodes) if nodes.is_empty() => {
                Ok(Resolution::Unresolved(ResultCode::InputRulesNotFound))
            }
            Resolution::Resolved(nodes) => Ok(Resolution::Resolved(Some(
                nodes.into_iter().map(SignedNode::positive).collect(),
            ))),
            Resolution::Unresolved(ResultCode::InputRulesNotFound) => {
                Ok(Resolution::Unresolved(ResultCode::InputRulesNotFound))
            }
            Resolution::Unresolved(code) => Err(CheckError::AdapterContract {
                message: format!("source resolution for '{entity}' cannot end in {code}"),
            }),
        }
    }

    /// Reachability first, then enumeration only when some connection fits
    /// the length bound.
    pub fn search(
        &self,
        sources: Option<&FxHashSet<SignedNode>>,
        object: &ObjectCandidate,
        max_paths: usize,
        max_path_length: usize,
    ) -> PathResult {
        let target = SignedNode::new(object.node.as_str(), object.polarity);
        let metrics: Vec<PathMetric> = SourceFinder::new(&self.graph, &target, sources)
            .map(|(source, length)| PathMetric::new(source, target.clone(), length))
            .collect();

        if metrics.is_empty() {
            return PathResult::not_found(ResultCode::NoPathsFound, max_paths, max_path_length);
        }

        let code = if max_paths == 0 {
            ResultCode::MaxPathsZero
        } else if metrics.iter().all(|m| m.length > max_path_length) {
            ResultCode::MaxPathLengthExceeded
        } else {
            ResultCode::PathsFound
        };
        let mut result = PathResult::new(
            code != ResultCode::MaxPathLengthExceeded,
            code,
            max_paths,
            max_path_length,
        );
        if code == ResultCode::PathsFound {
            'sources: for metric in metrics.iter().filter(|m| m.length <= max_path_length) {
                let paths = PathEnumerator::enumerate_within(
                    &self.graph,
                    &metric.source,
                    &target,
                    max_path_length,
                );
                for path in paths {
                    if !result.add_path(path) {
                        break 'sources;
                    }
                }
                if result.is_full() {
                    break;
                }
            }
        }
        for metric in metrics {
            result.add_metric(metric);
        }
        result
    }
}
