//! Domain types for attributed graphs.
//!
//! A [`Network`] is a petgraph [`Graph`] whose nodes carry an opaque string
//! key and a bag of GML attributes. Directedness is a type parameter, so
//! every algorithm is written once, generic over [`EdgeType`]; [`AnyNetwork`]
//! carries the choice made at run time (for example by a loaded file).

use std::collections::HashMap;

use graphlens_gml::{Attributes, Document, EdgeRecord, NodeRecord};
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, EdgeType, Undirected};

use crate::error::{Error, Result};

/// A graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Opaque identifier, unique within the network.
    pub key: String,
    /// Numeric id used when the network is written as GML.
    pub gml_id: i64,
    /// Named attributes, in insertion order.
    pub attributes: Attributes,
}

/// A graph edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edge {
    /// Named attributes, in insertion order.
    pub attributes: Attributes,
}

/// An attributed graph with keyed nodes.
///
/// Parallel edges are rejected; self-loops are allowed.
#[derive(Debug, Clone)]
pub struct Network<Ty: EdgeType = Undirected> {
    graph: Graph<Node, Edge, Ty>,
    index: HashMap<String, NodeIndex>,
    attributes: Attributes,
    next_gml_id: i64,
}

impl<Ty: EdgeType> Default for Network<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> Network<Ty> {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::default(),
            index: HashMap::new(),
            attributes: Attributes::new(),
            next_gml_id: 0,
        }
    }

    /// Whether edges are ordered pairs.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<Node, Edge, Ty> {
        &self.graph
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, counting self-loops.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Graph-level attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable graph-level attributes.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Add a node with the next free GML id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if the key is already present.
    pub fn add_node(&mut self, key: impl Into<String>) -> Result<NodeIndex> {
        let node = Node {
            key: key.into(),
            gml_id: self.next_gml_id,
            attributes: Attributes::new(),
        };
        self.insert_node(node)
    }

    /// Add a fully specified node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if the key is already present.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeIndex> {
        if self.index.contains_key(&node.key) {
            return Err(Error::DuplicateNode(node.key));
        }
        self.next_gml_id = self.next_gml_id.max(node.gml_id.saturating_add(1));
        let key = node.key.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        Ok(idx)
    }

    /// Add an edge between two existing keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either key is missing and
    /// [`Error::DuplicateEdge`] if the edge already exists.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeIndex> {
        let a = self.require(source)?;
        let b = self.require(target)?;
        self.insert_edge(a, b, Edge::default())
    }

    /// Add an edge between two node indices.
    ///
    /// For undirected networks `a-b` and `b-a` are the same edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEdge`] if the edge already exists.
    pub fn insert_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: Edge) -> Result<EdgeIndex> {
        if self.graph.find_edge(a, b).is_some() {
            return Err(Error::DuplicateEdge(
                self.graph[a].key.clone(),
                self.graph[b].key.clone(),
            ));
        }
        Ok(self.graph.add_edge(a, b, edge))
    }

    /// Look up a node by key.
    #[must_use]
    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Look up a node by key, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if the key is missing.
    pub fn require(&self, key: &str) -> Result<NodeIndex> {
        self.node_index(key)
            .ok_or_else(|| Error::UnknownNode(key.to_string()))
    }

    /// The node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this network.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Mutable access to the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this network.
    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.graph[idx]
    }

    /// Key of the node at `idx`.
    #[must_use]
    pub fn key(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].key
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Build a network from a GML document.
    ///
    /// A node's key is its label when present, otherwise its decimal id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document's directedness does not match
    /// `Ty`, and the usual duplicate/unknown errors for inconsistent content.
    pub fn from_document(doc: Document) -> Result<Self> {
        if doc.directed != Ty::is_directed() {
            return Err(Error::Config(format!(
                "document is {}, expected a {} graph",
                directedness(doc.directed),
                directedness(Ty::is_directed())
            )));
        }

        let mut network = Self::new();
        network.attributes = doc.attributes;

        let mut by_id = HashMap::with_capacity(doc.nodes.len());
        for record in doc.nodes {
            let key = record.label.unwrap_or_else(|| record.id.to_string());
            let idx = network.insert_node(Node {
                key,
                gml_id: record.id,
                attributes: record.attributes,
            })?;
            by_id.insert(record.id, idx);
        }

        for record in doc.edges {
            let endpoint = |id: i64| {
                by_id
                    .get(&id)
                    .copied()
                    .ok_or_else(|| Error::UnknownNode(id.to_string()))
            };
            let (a, b) = (endpoint(record.source)?, endpoint(record.target)?);
            network.insert_edge(
                a,
                b,
                Edge {
                    attributes: record.attributes,
                },
            )?;
        }

        Ok(network)
    }

    /// Convert to a GML document.
    ///
    /// Labels are always written, so keys survive a round-trip even when the
    /// source file had none.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new(Ty::is_directed());
        doc.attributes = self.attributes.clone();
        doc.nodes = self
            .graph
            .node_weights()
            .map(|node| NodeRecord {
                id: node.gml_id,
                label: Some(node.key.clone()),
                attributes: node.attributes.clone(),
            })
            .collect();
        doc.edges = self
            .graph
            .edge_references()
            .map(|edge| EdgeRecord {
                source: self.graph[edge.source()].gml_id,
                target: self.graph[edge.target()].gml_id,
                attributes: edge.weight().attributes.clone(),
            })
            .collect();
        doc
    }
}

fn directedness(directed: bool) -> &'static str {
    if directed { "directed" } else { "undirected" }
}

/// A network whose directedness is decided at run time.
#[derive(Debug, Clone)]
pub enum AnyNetwork {
    /// Edges are ordered pairs.
    Directed(Network<Directed>),
    /// Edges are unordered pairs.
    Undirected(Network<Undirected>),
}

impl AnyNetwork {
    /// Build from a GML document, honouring its `directed` flag.
    ///
    /// # Errors
    ///
    /// Propagates [`Network::from_document`] failures.
    pub fn from_document(doc: Document) -> Result<Self> {
        if doc.directed {
            Network::from_document(doc).map(Self::Directed)
        } else {
            Network::from_document(doc).map(Self::Undirected)
        }
    }

    /// Whether edges are ordered pairs.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        matches!(self, Self::Directed(_))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Directed(n) => n.node_count(),
            Self::Undirected(n) => n.node_count(),
        }
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match self {
            Self::Directed(n) => n.edge_count(),
            Self::Undirected(n) => n.edge_count(),
        }
    }
}

impl From<Network<Directed>> for AnyNetwork {
    fn from(network: Network<Directed>) -> Self {
        Self::Directed(network)
    }
}

impl From<Network<Undirected>> for AnyNetwork {
    fn from(network: Network<Undirected>) -> Self {
        Self::Undirected(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlens_gml::Value;

    #[test]
    fn add_node_rejects_duplicate_keys() {
        let mut net: Network = Network::new();
        net.add_node("a").unwrap();
        assert!(matches!(net.add_node("a"), Err(Error::DuplicateNode(k)) if k == "a"));
    }

    #[test]
    fn add_node_assigns_sequential_gml_ids() {
        let mut net: Network = Network::new();
        let a = net.add_node("a").unwrap();
        let b = net.add_node("b").unwrap();
        assert_eq!(net.node(a).gml_id, 0);
        assert_eq!(net.node(b).gml_id, 1);
    }

    #[test]
    fn undirected_reverse_edge_is_duplicate() {
        let mut net: Network<Undirected> = Network::new();
        net.add_node("a").unwrap();
        net.add_node("b").unwrap();
        net.add_edge("a", "b").unwrap();
        assert!(matches!(net.add_edge("b", "a"), Err(Error::DuplicateEdge(..))));
    }

    #[test]
    fn directed_reverse_edge_is_distinct() {
        let mut net: Network<Directed> = Network::new();
        net.add_node("a").unwrap();
        net.add_node("b").unwrap();
        net.add_edge("a", "b").unwrap();
        net.add_edge("b", "a").unwrap();
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn add_edge_to_unknown_key_fails() {
        let mut net: Network = Network::new();
        net.add_node("a").unwrap();
        assert!(matches!(net.add_edge("a", "zz"), Err(Error::UnknownNode(k)) if k == "zz"));
    }

    #[test]
    fn document_without_labels_uses_ids_as_keys() {
        let mut doc = Document::new(false);
        doc.nodes.push(NodeRecord::new(4, None));
        doc.nodes.push(NodeRecord::new(9, None));
        doc.edges.push(EdgeRecord::new(4, 9));

        let net = Network::<Undirected>::from_document(doc).unwrap();

        assert!(net.node_index("4").is_some());
        assert!(net.node_index("9").is_some());
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn document_directedness_selects_variant() {
        let any = AnyNetwork::from_document(Document::new(true)).unwrap();
        assert!(any.is_directed());
        let any = AnyNetwork::from_document(Document::new(false)).unwrap();
        assert!(!any.is_directed());
    }

    #[test]
    fn mismatched_directedness_is_rejected() {
        let err = Network::<Directed>::from_document(Document::new(false)).unwrap_err();
        assert!(err.to_string().contains("expected a directed graph"));
    }

    #[test]
    fn to_document_keeps_ids_and_attributes() {
        let mut doc = Document::new(true);
        let mut record = NodeRecord::new(10, Some("x".into()));
        record.attributes.push("color", "red");
        doc.nodes.push(record);
        doc.nodes.push(NodeRecord::new(20, Some("y".into())));
        let mut edge = EdgeRecord::new(10, 20);
        edge.attributes.push("weight", 0.5);
        doc.edges.push(edge);
        doc.attributes.push("name", "demo");

        let net = Network::<Directed>::from_document(doc.clone()).unwrap();

        assert_eq!(net.to_document(), doc);
        let x = net.node_index("x").unwrap();
        assert_eq!(net.node(x).attributes.get("color"), Some(&Value::from("red")));
    }

    #[test]
    fn gml_ids_continue_after_loaded_maximum() {
        let mut doc = Document::new(false);
        doc.nodes.push(NodeRecord::new(41, Some("a".into())));
        let mut net = Network::<Undirected>::from_document(doc).unwrap();

        let b = net.add_node("b").unwrap();
        assert_eq!(net.node(b).gml_id, 42);
    }
}
