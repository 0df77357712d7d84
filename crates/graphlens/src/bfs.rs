//! Breadth-first traversal: hop distances and BFS spanning trees.
//!
//! Edges are walked in the network's own direction for BFS trees (successors
//! only on directed graphs). Path-length analysis instead walks the
//! undirected view, see [`Traversal`]. The traversals themselves are
//! petgraph's [`Bfs`] and [`algo::dijkstra`] with unit edge costs.

use std::collections::HashSet;

use graphlens_gml::Value;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::{EdgeType, Undirected, algo};

use crate::domain::Network;
use crate::error::Result;

/// Prefix of the per-root distance attribute written onto nodes.
pub const DISTANCE_ATTRIBUTE_PREFIX: &str = "dist_from_";

/// Which edges a traversal may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Follow edges as stored: successors on directed graphs.
    FollowDirection,
    /// Treat every edge as undirected (weak reachability).
    IgnoreDirection,
}

/// A BFS spanning tree rooted at one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsTree {
    /// Root node.
    pub root: NodeIndex,
    /// Key of the root node.
    pub root_key: String,
    /// Node attribute that receives this tree's levels.
    pub attribute: String,
    /// Every reachable node with its hop distance, ordered by level, then
    /// node index.
    pub levels: Vec<(NodeIndex, usize)>,
    /// Tree edges as `(parent, child)`, in the order of `levels`.
    pub edges: Vec<(NodeIndex, NodeIndex)>,
}

impl BfsTree {
    /// Level of `node`, or `None` if it is unreachable from the root.
    #[must_use]
    pub fn level_of(&self, node: NodeIndex) -> Option<usize> {
        self.levels
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, level)| *level)
    }

    /// Largest level in the tree (0 for a lone root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.iter().map(|(_, l)| *l).max().unwrap_or(0)
    }

    /// Number of reachable nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a tree contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Structure-only copy of the network with every edge undirected.
///
/// Node indices match the source network.
#[must_use]
pub fn undirected_view<Ty: EdgeType>(network: &Network<Ty>) -> Graph<(), (), Undirected> {
    network
        .graph()
        .map(|_, _| (), |_, _| ())
        .into_edge_type::<Undirected>()
}

fn collect_distances<I>(node_count: usize, reached: I) -> Vec<Option<usize>>
where
    I: IntoIterator<Item = (NodeIndex, usize)>,
{
    let mut dist = vec![None; node_count];
    for (node, d) in reached {
        dist[node.index()] = Some(d);
    }
    dist
}

/// Hop distance from `source` to every node, indexed by node index.
///
/// Unreachable nodes are `None`.
#[must_use]
pub fn hop_distances<Ty: EdgeType>(
    network: &Network<Ty>,
    source: NodeIndex,
    traversal: Traversal,
) -> Vec<Option<usize>> {
    let reached = match traversal {
        Traversal::FollowDirection => algo::dijkstra(network.graph(), source, None, |_| 1usize),
        Traversal::IgnoreDirection => {
            algo::dijkstra(&undirected_view(network), source, None, |_| 1usize)
        }
    };
    collect_distances(network.node_count(), reached)
}

/// Compute the BFS tree rooted at `root`, following edge direction.
///
/// Each node's parent is the node whose visit first discovered it.
#[must_use]
pub fn bfs_tree<Ty: EdgeType>(network: &Network<Ty>, root: NodeIndex) -> BfsTree {
    let graph = network.graph();
    let mut level: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    level[root.index()] = Some(0);

    let mut bfs = Bfs::new(graph, root);
    while let Some(node) = bfs.next(graph) {
        let Some(depth) = level[node.index()] else {
            continue;
        };
        for child in graph.neighbors(node) {
            if level[child.index()].is_none() {
                level[child.index()] = Some(depth + 1);
                parent[child.index()] = Some(node);
            }
        }
    }

    let mut levels: Vec<(NodeIndex, usize)> = graph
        .node_indices()
        .filter_map(|node| level[node.index()].map(|l| (node, l)))
        .collect();
    levels.sort_unstable_by_key(|&(node, l)| (l, node));
    let edges = levels
        .iter()
        .filter_map(|&(child, _)| parent[child.index()].map(|p| (p, child)))
        .collect();

    let root_key = network.key(root).to_string();
    BfsTree {
        root,
        attribute: distance_attribute(&root_key),
        root_key,
        levels,
        edges,
    }
}

/// Compute one BFS tree per root key.
///
/// All roots are resolved before any traversal runs, so an unknown root
/// fails without partial results. Repeated roots are traversed once. Every
/// tree gets its own distance attribute: when two keys sanitize to the same
/// name, the later root's GML id is appended.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownNode`] for the first root not in the network.
pub fn multi_bfs<Ty: EdgeType>(network: &Network<Ty>, roots: &[String]) -> Result<Vec<BfsTree>> {
    let mut resolved = Vec::with_capacity(roots.len());
    for key in roots {
        let idx = network.require(key)?;
        if !resolved.contains(&idx) {
            resolved.push(idx);
        }
    }

    let mut taken = HashSet::new();
    Ok(resolved
        .into_iter()
        .map(|root| {
            let mut tree = bfs_tree(network, root);
            let gml_id = network.node(root).gml_id;
            while taken.contains(&tree.attribute) {
                tree.attribute = format!("{}_{gml_id}", tree.attribute);
            }
            if tree.attribute != distance_attribute(&tree.root_key) {
                tracing::warn!(
                    root = %tree.root_key,
                    attribute = %tree.attribute,
                    "Distance attribute name already used by another root, renamed"
                );
            }
            taken.insert(tree.attribute.clone());
            tracing::debug!(
                root = %tree.root_key,
                reached = tree.len(),
                depth = tree.depth(),
                "Computed BFS tree"
            );
            tree
        })
        .collect())
}

/// Base name of the node attribute holding distances from `root_key`.
///
/// GML keys are restricted to `[A-Za-z0-9_]`, so other characters in the
/// root key are replaced with `_`.
#[must_use]
pub fn distance_attribute(root_key: &str) -> String {
    let sanitized: String = root_key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{DISTANCE_ATTRIBUTE_PREFIX}{sanitized}")
}

/// Record each reachable node's level under the tree's attribute.
///
/// Nodes the tree does not reach are left untouched.
pub fn annotate_distances<Ty: EdgeType>(network: &mut Network<Ty>, tree: &BfsTree) {
    for &(node, level) in &tree.levels {
        let level = i64::try_from(level).unwrap_or(i64::MAX);
        network
            .node_mut(node)
            .attributes
            .insert(tree.attribute.clone(), Value::Int(level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::{Directed, Undirected};

    fn path_graph<Ty: EdgeType>(keys: &[&str]) -> Network<Ty> {
        let mut net = Network::new();
        for key in keys {
            net.add_node(*key).unwrap();
        }
        for pair in keys.windows(2) {
            net.add_edge(pair[0], pair[1]).unwrap();
        }
        net
    }

    #[test]
    fn bfs_tree_levels_on_path() {
        let net: Network<Undirected> = path_graph(&["a", "b", "c", "d"]);
        let root = net.node_index("b").unwrap();

        let tree = bfs_tree(&net, root);

        assert_eq!(tree.level_of(root), Some(0));
        assert_eq!(tree.level_of(net.node_index("a").unwrap()), Some(1));
        assert_eq!(tree.level_of(net.node_index("c").unwrap()), Some(1));
        assert_eq!(tree.level_of(net.node_index("d").unwrap()), Some(2));
        assert_eq!(tree.edges.len(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn directed_bfs_follows_successors_only() {
        let net: Network<Directed> = path_graph(&["a", "b", "c"]);
        let tree = bfs_tree(&net, net.node_index("b").unwrap());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.level_of(net.node_index("a").unwrap()), None);
    }

    #[test]
    fn hop_distances_ignoring_direction_reach_predecessors() {
        let net: Network<Directed> = path_graph(&["a", "b", "c"]);
        let c = net.node_index("c").unwrap();

        let dist = hop_distances(&net, c, Traversal::IgnoreDirection);

        assert_eq!(dist, vec![Some(2), Some(1), Some(0)]);
        let directed = hop_distances(&net, c, Traversal::FollowDirection);
        assert_eq!(directed, vec![None, None, Some(0)]);
    }

    #[test]
    fn multi_bfs_rejects_unknown_root_before_traversing() {
        let net: Network<Undirected> = path_graph(&["a", "b"]);
        let roots = vec!["a".to_string(), "missing".to_string()];

        let err = multi_bfs(&net, &roots).unwrap_err();

        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn multi_bfs_deduplicates_roots() {
        let net: Network<Undirected> = path_graph(&["a", "b"]);
        let roots = vec!["b".to_string(), "a".to_string(), "b".to_string()];

        let trees = multi_bfs(&net, &roots).unwrap();

        let keys: Vec<_> = trees.iter().map(|t| t.root_key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn annotate_distances_skips_unreachable_nodes() {
        let mut net: Network<Undirected> = path_graph(&["a", "b"]);
        net.add_node("lonely").unwrap();
        let tree = bfs_tree(&net, net.node_index("a").unwrap());

        annotate_distances(&mut net, &tree);

        let b = net.node_index("b").unwrap();
        let lonely = net.node_index("lonely").unwrap();
        assert_eq!(net.node(b).attributes.get("dist_from_a"), Some(&Value::Int(1)));
        assert!(net.node(lonely).attributes.get("dist_from_a").is_none());
    }

    #[test]
    fn distance_attribute_is_a_valid_gml_key() {
        assert_eq!(distance_attribute("7"), "dist_from_7");
        assert_eq!(distance_attribute("node-1.a"), "dist_from_node_1_a");
    }

    #[test]
    fn colliding_root_keys_get_distinct_attributes() {
        let mut net: Network<Undirected> = path_graph(&["a-b", "x", "a.b"]);
        net.add_edge("a-b", "a.b").unwrap();
        let roots = vec!["a-b".to_string(), "a.b".to_string()];

        let trees = multi_bfs(&net, &roots).unwrap();
        for tree in &trees {
            annotate_distances(&mut net, tree);
        }

        assert_eq!(trees[0].attribute, "dist_from_a_b");
        assert_eq!(trees[1].attribute, "dist_from_a_b_2");
        let ab = net.node_index("a-b").unwrap();
        let attrs = &net.node(ab).attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("dist_from_a_b"), Some(&Value::Int(0)));
        assert_eq!(attrs.get("dist_from_a_b_2"), Some(&Value::Int(1)));
    }

    #[test]
    fn renamed_attribute_stays_unique_against_literal_keys() {
        let mut net: Network<Undirected> = Network::new();
        for key in ["a-b", "a_b_2", "a.b"] {
            net.add_node(key).unwrap();
        }
        let roots: Vec<String> = ["a-b", "a_b_2", "a.b"].map(String::from).to_vec();

        let trees = multi_bfs(&net, &roots).unwrap();

        let names: HashSet<&str> = trees.iter().map(|t| t.attribute.as_str()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn levels_are_ordered_by_level_then_index() {
        let mut net: Network<Undirected> = path_graph(&["r", "a", "b", "c"]);
        net.add_edge("r", "c").unwrap();
        net.add_edge("r", "b").unwrap();
        let r = net.node_index("r").unwrap();

        let tree = bfs_tree(&net, r);

        let keys: Vec<&str> = tree.levels.iter().map(|&(n, _)| net.key(n)).collect();
        assert_eq!(keys, vec!["r", "a", "b", "c"]);
        assert!(tree.edges.iter().all(|&(p, _)| p == r));
    }

    #[test]
    fn undirected_view_keeps_indices() {
        let net: Network<Directed> = path_graph(&["a", "b", "c"]);
        let view = undirected_view(&net);

        assert_eq!(view.node_count(), 3);
        assert_eq!(view.edge_count(), 2);
        let c = net.node_index("c").unwrap();
        assert!(view.neighbors(c).any(|n| n == net.node_index("b").unwrap()));
    }

    #[test]
    fn self_loop_does_not_become_tree_edge() {
        let mut net: Network<Directed> = Network::new();
        net.add_node("a").unwrap();
        net.add_edge("a", "a").unwrap();

        let tree = bfs_tree(&net, net.node_index("a").unwrap());

        assert!(tree.edges.is_empty());
        assert_eq!(tree.len(), 1);
    }
}
