//! Node annotations written alongside `--output`.

use graphlens_gml::Value;
use petgraph::EdgeType;

use crate::analysis::{component_ids, is_isolated};
use crate::domain::Network;

/// Attribute holding each node's component id.
pub const COMPONENT_ATTRIBUTE: &str = "component";
/// Attribute flagging isolated nodes (1) and connected ones (0).
pub const ISOLATED_ATTRIBUTE: &str = "isolated";

/// Set `component` and `isolated` on every node.
///
/// Existing values under those keys are replaced.
pub fn annotate_for_output<Ty: EdgeType>(network: &mut Network<Ty>) {
    let components = component_ids(network);
    let indices: Vec<_> = network.node_indices().collect();

    for idx in indices {
        let isolated = is_isolated(network, idx);
        let component = i64::try_from(components[idx.index()]).unwrap_or(i64::MAX);
        let attrs = &mut network.node_mut(idx).attributes;
        attrs.insert(COMPONENT_ATTRIBUTE, Value::Int(component));
        attrs.insert(ISOLATED_ATTRIBUTE, isolated);
    }
}
