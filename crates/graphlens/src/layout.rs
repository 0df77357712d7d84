//! Node placement for figures.
//!
//! Both layouts return positions in the unit square; the renderer maps them
//! onto its drawing area.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use petgraph::EdgeType;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::bfs::BfsTree;
use crate::domain::Network;

/// Node positions in `[0, 1] × [0, 1]`.
pub type Positions = HashMap<NodeIndex, (f64, f64)>;

/// Simulation time step per iteration.
const TIME_STEP: f32 = 0.035;

/// Radius of the starting circle, in simulation units.
const START_RADIUS: f64 = 100.0;

fn circle_position(i: usize, n: usize) -> (f64, f64) {
    if n <= 1 {
        return (0.0, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let angle = i as f64 * 2.0 * PI / n as f64;
    (START_RADIUS * angle.cos(), START_RADIUS * angle.sin())
}

/// Force-directed layout.
///
/// Nodes start evenly spaced on a circle in insertion order and the
/// simulation runs for exactly `iterations` steps, so the result depends
/// only on the graph.
#[must_use]
pub fn spring<Ty: EdgeType>(network: &Network<Ty>, iterations: usize) -> Positions {
    let n = network.node_count();
    let mut sim: ForceGraph<NodeIndex, ()> = ForceGraph::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let mut sim_index = HashMap::with_capacity(n);
    for (i, idx) in network.node_indices().enumerate() {
        let (x, y) = circle_position(i, n);
        #[allow(clippy::cast_possible_truncation)]
        let sim_idx = sim.add_node(NodeData {
            x: x as f32,
            y: y as f32,
            mass: 10.0,
            is_anchor: false,
            user_data: idx,
        });
        sim_index.insert(idx, sim_idx);
    }

    for edge in network.graph().edge_references() {
        // Self-loops carry no spring force.
        if edge.source() == edge.target() {
            continue;
        }
        sim.add_edge(
            sim_index[&edge.source()],
            sim_index[&edge.target()],
            EdgeData::default(),
        );
    }

    for _ in 0..iterations {
        sim.update(TIME_STEP);
    }

    let mut raw = Vec::with_capacity(n);
    sim.visit_nodes(|node| {
        raw.push((
            node.data.user_data,
            (f64::from(node.x()), f64::from(node.y())),
        ));
    });

    if raw.iter().any(|(_, (x, y))| !x.is_finite() || !y.is_finite()) {
        tracing::warn!("Spring layout diverged, falling back to circular layout");
        raw = network
            .node_indices()
            .enumerate()
            .map(|(i, idx)| (idx, circle_position(i, n)))
            .collect();
    }

    tracing::debug!(nodes = n, iterations, "Computed spring layout");
    normalize(raw)
}

/// Scale points into the unit square, keeping the aspect ratio.
///
/// A single point, or points that all coincide, land in the centre.
fn normalize(points: Vec<(NodeIndex, (f64, f64))>) -> Positions {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (_, (x, y)) in &points {
        min_x = min_x.min(*x);
        min_y = min_y.min(*y);
        max_x = max_x.max(*x);
        max_y = max_y.max(*y);
    }

    let span = (max_x - min_x).max(max_y - min_y);
    if span.is_nan() || span <= f64::EPSILON {
        return points.into_iter().map(|(idx, _)| (idx, (0.5, 0.5))).collect();
    }

    // Centre the shorter axis.
    let off_x = (span - (max_x - min_x)) / 2.0;
    let off_y = (span - (max_y - min_y)) / 2.0;
    points
        .into_iter()
        .map(|(idx, (x, y))| {
            (
                idx,
                ((x - min_x + off_x) / span, (y - min_y + off_y) / span),
            )
        })
        .collect()
}

/// Tiered layout for a BFS tree.
///
/// Each level is a vertical column (`x` grows with level); nodes in a column
/// are spread evenly top to bottom in `levels` order. Nodes the tree did
/// not reach have no position.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn multipartite(tree: &BfsTree) -> Positions {
    let mut tiers: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
    for &(node, level) in &tree.levels {
        tiers.entry(level).or_default().push(node);
    }

    let depth = tree.depth();
    let mut positions = Positions::with_capacity(tree.len());
    for (level, nodes) in tiers {
        let x = if depth == 0 {
            0.5
        } else {
            level as f64 / depth as f64
        };
        let count = nodes.len() as f64;
        for (i, node) in nodes.into_iter().enumerate() {
            positions.insert(node, (x, (i as f64 + 1.0) / (count + 1.0)));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_tree;
    use petgraph::Undirected;

    fn star(leaves: usize) -> Network<Undirected> {
        let mut net = Network::new();
        net.add_node("hub").unwrap();
        for i in 0..leaves {
            let key = format!("leaf{i}");
            net.add_node(key.as_str()).unwrap();
            net.add_edge("hub", &key).unwrap();
        }
        net
    }

    fn in_unit_square(positions: &Positions) -> bool {
        positions
            .values()
            .all(|&(x, y)| (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y))
    }

    #[test]
    fn spring_places_every_node_in_unit_square() {
        let net = star(6);

        let positions = spring(&net, 100);

        assert_eq!(positions.len(), net.node_count());
        assert!(in_unit_square(&positions));
    }

    #[test]
    fn spring_is_deterministic() {
        let net = star(5);
        assert_eq!(spring(&net, 50), spring(&net, 50));
    }

    #[test]
    fn spring_handles_single_node_and_empty_graph() {
        let mut net: Network<Undirected> = Network::new();
        assert!(spring(&net, 10).is_empty());

        let a = net.add_node("a").unwrap();
        assert_eq!(spring(&net, 10)[&a], (0.5, 0.5));
    }

    #[test]
    fn spring_tolerates_self_loops() {
        let mut net: Network<Undirected> = Network::new();
        net.add_node("a").unwrap();
        net.add_node("b").unwrap();
        net.add_edge("a", "a").unwrap();
        net.add_edge("a", "b").unwrap();

        let positions = spring(&net, 20);

        assert!(in_unit_square(&positions));
    }

    #[test]
    fn multipartite_columns_follow_levels() {
        let net = star(3);
        let hub = net.node_index("hub").unwrap();
        let tree = bfs_tree(&net, hub);

        let positions = multipartite(&tree);

        assert_eq!(positions[&hub], (0.0, 0.5));
        let leaf_ys: Vec<f64> = (0..3)
            .map(|i| positions[&net.node_index(&format!("leaf{i}")).unwrap()])
            .map(|(x, y)| {
                assert!((x - 1.0).abs() < f64::EPSILON);
                y
            })
            .collect();
        assert!(leaf_ys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn normalize_keeps_aspect_ratio() {
        let a = NodeIndex::new(0);
        let b = NodeIndex::new(1);

        let positions = normalize(vec![(a, (0.0, 0.0)), (b, (10.0, 0.0))]);

        assert_eq!(positions[&a], (0.0, 0.5));
        assert_eq!(positions[&b], (1.0, 0.5));
    }
}
