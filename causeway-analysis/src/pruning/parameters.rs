//! Parameter node removal: static external parameters are not causes.

use causeway_core::types::collections::FxHashSet;

use crate::influence::InfluenceMap;

/// Remove every parameter node present in the map. Ids that are not (or no
/// longer) in the map are skipped. Returns the number of nodes removed.
pub fn remove_parameter_nodes(map: &mut InfluenceMap, parameters: &FxHashSet<String>) -> usize {
    let present: Vec<&String> = parameters
        .iter()
        .filter(|id| map.contains_node(id))
        .collect();
    present.into_iter().filter(|id| map.remove_node(id)).count()
}
