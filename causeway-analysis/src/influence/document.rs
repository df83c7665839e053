//! JSON interchange form of an influence map.

use causeway_core::errors::GraphError;
use serde::{Deserialize, Serialize};

use super::types::{InfluenceMap, InfluenceNode};
use crate::model::Sign;

/// A raw edge as written in a document. The sign is `1`, `-1`, or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<Sign>,
}

/// `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceMapDocument {
    pub nodes: Vec<InfluenceNode>,
    pub edges: Vec<EdgeRecord>,
}

impl InfluenceMapDocument {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::Malformed {
            message: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Malformed {
            message: e.to_string(),
        })
    }

    /// Build the graph. Every edge endpoint must be declared in `nodes`.
    pub fn into_map(self) -> Result<InfluenceMap, GraphError> {
        let mut map = InfluenceMap::new();
        for node in self.nodes {
            map.add_node(node);
        }
        for edge in self.edges {
            for id in [&edge.from, &edge.to] {
                if !map.contains_node(id) {
                    return Err(GraphError::UnknownNode { id: id.clone() });
                }
            }
            map.add_edge(&edge.from, &edge.to, edge.sign);
        }
        Ok(map)
    }
}

impl From<&InfluenceMap> for InfluenceMapDocument {
    fn from(map: &InfluenceMap) -> Self {
        Self {
            nodes: map.nodes().cloned().collect(),
            edges: map
                .edges()
                .map(|(from, to, sign)| EdgeRecord {
                    from: from.to_string(),
                    to: to.to_string(),
                    sign,
                })
                .collect(),
        }
    }
}

impl InfluenceMap {
    /// Parse a JSON document into a graph.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        InfluenceMapDocument::from_json(json)?.into_map()
    }
}
