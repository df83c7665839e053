//! Paths, reachability witnesses, and the per-query result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::polarity::SignedNode;

/// Closed taxonomy of query outcomes. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    StatementTypeNotHandled,
    SubjectMonomersNotFound,
    ObservablesNotFound,
    InputRulesNotFound,
    NoPathsFound,
    MaxPathLengthExceeded,
    MaxPathsZero,
    PathsFound,
}

impl ResultCode {
    pub const ALL: [ResultCode; 8] = [
        Self::StatementTypeNotHandled,
        Self::SubjectMonomersNotFound,
        Self::ObservablesNotFound,
        Self::InputRulesNotFound,
        Self::NoPathsFound,
        Self::MaxPathLengthExceeded,
        Self::MaxPathsZero,
        Self::PathsFound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatementTypeNotHandled => "STATEMENT_TYPE_NOT_HANDLED",
            Self::SubjectMonomersNotFound => "SUBJECT_MONOMERS_NOT_FOUND",
            Self::ObservablesNotFound => "OBSERVABLES_NOT_FOUND",
            Self::InputRulesNotFound => "INPUT_RULES_NOT_FOUND",
            Self::NoPathsFound => "NO_PATHS_FOUND",
            Self::MaxPathLengthExceeded => "MAX_PATH_LENGTH_EXCEEDED",
            Self::MaxPathsZero => "MAX_PATHS_ZERO",
            Self::PathsFound => "PATHS_FOUND",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown result code: {s}"))
    }
}

/// Witness that `source` reaches `target` in `length` hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMetric {
    pub source: SignedNode,
    pub target: SignedNode,
    pub length: usize,
}

impl PathMetric {
    pub fn new(source: SignedNode, target: SignedNode, length: usize) -> Self {
        Self {
            source,
            target,
            length,
        }
    }
}

/// An ordered walk through the signed graph. Simple, except for loop paths,
/// which start and end on the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<SignedNode>", into = "Vec<SignedNode>")]
pub struct Path {
    nodes: Vec<SignedNode>,
}

impl Path {
    /// Returns `None` for an empty node list.
    pub fn new(nodes: Vec<SignedNode>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    pub fn nodes(&self) -> &[SignedNode] {
        &self.nodes
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True for a single-node path.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn source(&self) -> &SignedNode {
        &self.nodes[0]
    }

    pub fn target(&self) -> &SignedNode {
        &self.nodes[self.nodes.len() - 1]
    }

    /// A feedback path closing on its own source.
    pub fn is_loop(&self) -> bool {
        self.nodes.len() > 1 && self.source() == self.target()
    }

    pub fn into_nodes(self) -> Vec<SignedNode> {
        self.nodes
    }
}

impl TryFrom<Vec<SignedNode>> for Path {
    type Error = &'static str;

    fn try_from(nodes: Vec<SignedNode>) -> Result<Self, Self::Error> {
        Self::new(nodes).ok_or("a path needs at least one node")
    }
}

impl From<Path> for Vec<SignedNode> {
    fn from(path: Path) -> Self {
        path.nodes
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Outcome of checking one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path_found: bool,
    pub result_code: ResultCode,
    pub max_paths: usize,
    pub max_path_length: usize,
    pub path_metrics: Vec<PathMetric>,
    pub paths: Vec<Path>,
}

impl PathResult {
    pub fn new(
        path_found: bool,
        result_code: ResultCode,
        max_paths: usize,
        max_path_length: usize,
    ) -> Self {
        Self {
            path_found,
            result_code,
            max_paths,
            max_path_length,
            path_metrics: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// A result with no explanation and the given code.
    pub fn not_found(result_code: ResultCode, max_paths: usize, max_path_length: usize) -> Self {
        Self::new(false, result_code, max_paths, max_path_length)
    }

    /// Append a path. Refused once `max_paths` paths are held.
    pub fn add_path(&mut self, path: Path) -> bool {
        if self.is_full() {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub fn add_metric(&mut self, metric: PathMetric) {
        self.path_metrics.push(metric);
    }

    pub fn is_full(&self) -> bool {
        self.paths.len() >= self.max_paths
    }

    /// Length of the shortest discovered connection, if any.
    pub fn min_length(&self) -> Option<usize> {
        self.path_metrics.iter().map(|m| m.length).min()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (found: {}, paths: {}/{}, max length: {})",
            self.result_code,
            self.path_found,
            self.paths.len(),
            self.max_paths,
            self.max_path_length
        )
    }
}
