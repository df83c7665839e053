//! Measured values and the node -> observable relation table.

use causeway_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::Sign;

/// Measurements keyed by observable id, plus which observables each base
/// node moves and in which direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationTable {
    pub values: FxHashMap<String, f64>,
    pub relations: FxHashMap<String, Vec<(String, Sign)>>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, observable: &str, value: f64) -> Self {
        self.values.insert(observable.to_string(), value);
        self
    }

    pub fn with_relation(mut self, node: &str, observable: &str, sign: Sign) -> Self {
        self.relations
            .entry(node.to_string())
            .or_default()
            .push((observable.to_string(), sign));
        self
    }

    pub fn value(&self, observable: &str) -> Option<f64> {
        self.values.get(observable).copied()
    }

    /// Relations of a base node. Empty when none are known.
    pub fn relations_of(&self, node: &str) -> &[(String, Sign)] {
        self.relations
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
