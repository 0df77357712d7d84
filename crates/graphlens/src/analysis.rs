//! Structural analysis of a network.
//!
//! [`analyze`] is pure: it computes an [`Analysis`] and never prints. Text
//! and JSON rendering live in [`crate::output::report`].
//!
//! # Directed graphs
//!
//! - Connectivity is weak: edge direction is ignored both when counting
//!   components and when deciding whether path lengths are defined.
//! - Average shortest path is measured on the same undirected view.
//! - Cycle detection follows the graph's own directedness.
//! - A node is isolated when its in-degree and out-degree are both zero.

use std::fmt;

use petgraph::EdgeType;
use petgraph::algo;
use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::{Serialize, Serializer};

use crate::bfs::undirected_view;
use crate::domain::Network;

/// Text used for [`PathLength::NotConnected`] in reports and JSON.
pub const NOT_CONNECTED: &str = "The graph is not connected";

/// Average shortest path length, defined only for connected graphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathLength {
    /// Mean hop distance over all ordered pairs of distinct nodes.
    Connected(f64),
    /// The graph is empty or has more than one component.
    NotConnected,
}

impl PathLength {
    /// The numeric value, if defined.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Connected(v) => Some(v),
            Self::NotConnected => None,
        }
    }
}

impl fmt::Display for PathLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected(v) => write!(f, "{v:.4}"),
            Self::NotConnected => f.write_str(NOT_CONNECTED),
        }
    }
}

impl Serialize for PathLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Connected(v) => serializer.serialize_f64(*v),
            Self::NotConnected => serializer.serialize_str(NOT_CONNECTED),
        }
    }
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Number of (weakly) connected components.
    pub connected_components: usize,
    /// Whether the graph contains a cycle under its own directedness.
    pub has_cycle: bool,
    /// Keys of nodes with no incident edges, in insertion order.
    pub isolated_nodes: Vec<String>,
    /// Edge count relative to the maximum for this node count.
    pub density: f64,
    /// Average shortest path length, or the not-connected marker.
    pub average_shortest_path: PathLength,
}

/// Analyze `network`.
#[must_use]
pub fn analyze<Ty: EdgeType>(network: &Network<Ty>) -> Analysis {
    let connected_components = component_count(network);
    let average_shortest_path = if connected_components == 1 {
        PathLength::Connected(average_shortest_path(network))
    } else {
        PathLength::NotConnected
    };

    let analysis = Analysis {
        connected_components,
        has_cycle: has_cycle(network),
        isolated_nodes: isolated_nodes(network)
            .map(|idx| network.key(idx).to_string())
            .collect(),
        density: density(network),
        average_shortest_path,
    };
    tracing::debug!(
        components = analysis.connected_components,
        has_cycle = analysis.has_cycle,
        isolated = analysis.isolated_nodes.len(),
        "Analysis complete"
    );
    analysis
}

fn union_find<Ty: EdgeType>(network: &Network<Ty>) -> UnionFind<usize> {
    let graph = network.graph();
    let mut sets = UnionFind::new(graph.node_count());
    for edge in graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }
    sets
}

/// Number of weakly connected components. Zero for the null graph.
#[must_use]
pub fn component_count<Ty: EdgeType>(network: &Network<Ty>) -> usize {
    algo::connected_components(network.graph())
}

/// Component id per node, indexed by node index.
///
/// Ids are dense, starting at 0, and numbered in order of each component's
/// first node.
#[must_use]
pub fn component_ids<Ty: EdgeType>(network: &Network<Ty>) -> Vec<usize> {
    let mut sets = union_find(network);
    let mut representative_to_id = std::collections::HashMap::new();
    (0..network.node_count())
        .map(|i| {
            let rep = sets.find_mut(i);
            let next = representative_to_id.len();
            *representative_to_id.entry(rep).or_insert(next)
        })
        .collect()
}

/// Whether the graph contains a cycle.
///
/// Directed graphs need a directed cycle; undirected graphs need an edge
/// that closes a loop. Self-loops count in both cases.
#[must_use]
pub fn has_cycle<Ty: EdgeType>(network: &Network<Ty>) -> bool {
    if network.is_directed() {
        algo::is_cyclic_directed(network.graph())
    } else {
        algo::is_cyclic_undirected(network.graph())
    }
}

/// Whether `node` has in-degree and out-degree zero.
#[must_use]
pub fn is_isolated<Ty: EdgeType>(network: &Network<Ty>, node: NodeIndex) -> bool {
    // neighbors_undirected walks both incoming and outgoing edges.
    network.graph().neighbors_undirected(node).next().is_none()
}

/// Isolated nodes in insertion order.
pub fn isolated_nodes<Ty: EdgeType>(network: &Network<Ty>) -> impl Iterator<Item = NodeIndex> + '_ {
    network
        .node_indices()
        .filter(move |&idx| is_isolated(network, idx))
}

/// Edge density. Zero for fewer than two nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density<Ty: EdgeType>(network: &Network<Ty>) -> f64 {
    let n = network.node_count() as f64;
    let m = network.edge_count() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let possible = n * (n - 1.0);
    if network.is_directed() {
        m / possible
    } else {
        2.0 * m / possible
    }
}

/// Mean hop distance over all ordered pairs in the undirected view.
///
/// Only meaningful for a connected network; callers check first.
#[allow(clippy::cast_precision_loss)]
fn average_shortest_path<Ty: EdgeType>(network: &Network<Ty>) -> f64 {
    let n = network.node_count();
    if n < 2 {
        return 0.0;
    }
    let view = undirected_view(network);
    let total: usize = view
        .node_indices()
        .map(|source| {
            algo::dijkstra(&view, source, None, |_| 1usize)
                .values()
                .sum::<usize>()
        })
        .sum();
    total as f64 / (n * (n - 1)) as f64
}
