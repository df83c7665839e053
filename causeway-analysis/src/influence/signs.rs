//! Edge sign resolution for the raw multigraph.

use causeway_core::errors::GraphError;
use causeway_core::types::collections::FxHashMap;
use tracing::warn;

use super::types::InfluenceMap;
use crate::model::Sign;

/// One resolved sign per ordered `(from, to)` pair.
pub type EdgeSignMap = FxHashMap<(String, String), Sign>;

/// Collapse parallel edges into one sign per pair.
///
/// A pair observed with both signs resolves to positive and logs a warning.
/// Any edge without a sign fails the whole graph.
pub fn resolve_edge_signs(map: &InfluenceMap) -> Result<EdgeSignMap, GraphError> {
    let mut observed: FxHashMap<(String, String), (bool, bool)> = FxHashMap::default();

    for (from, to, sign) in map.edges() {
        let sign = sign.ok_or_else(|| GraphError::MissingSign {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        let entry = observed
            .entry((from.to_string(), to.to_string()))
            .or_insert((false, false));
        match sign {
            Sign::Positive => entry.0 = true,
            Sign::Negative => entry.1 = true,
        }
    }

    let signs = observed
        .into_iter()
        .map(|(pair, seen)| {
            let sign = match seen {
                (true, true) => {
                    warn!(from = %pair.0, to = %pair.1, "conflicting edge signs, resolving to positive");
                    Sign::Positive
                }
                (false, true) => Sign::Negative,
                _ => Sign::Positive,
            };
            (pair, sign)
        })
        .collect();

    Ok(signs)
}

/// Composed sign of a walk over base node ids: the product of its edge signs.
/// A single-node walk is positive.
pub fn path_polarity(signs: &EdgeSignMap, nodes: &[&str]) -> Result<Sign, GraphError> {
    nodes.windows(2).try_fold(Sign::Positive, |acc, pair| {
        signs
            .get(&(pair[0].to_string(), pair[1].to_string()))
            .map(|&sign| acc.compose(sign))
            .ok_or_else(|| GraphError::MissingEdge {
                from: pair[0].to_string(),
                to: pair[1].to_string(),
            })
    })
}
