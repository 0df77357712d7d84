//! Typed view over a parsed GML `graph [ ... ]` block.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::value::{Attributes, Value};

/// A node entry: the mandatory `id`, the optional `label`, and everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Numeric node id, unique within the document.
    pub id: i64,
    /// Display label. networkx uses this as the node name.
    pub label: Option<String>,
    /// Remaining key/value pairs, in source order.
    pub attributes: Attributes,
}

impl NodeRecord {
    /// Creates a node with no extra attributes.
    #[must_use]
    pub fn new(id: i64, label: Option<String>) -> Self {
        Self {
            id,
            label,
            attributes: Attributes::new(),
        }
    }
}

/// An edge entry referencing two node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    /// Id of the source node.
    pub source: i64,
    /// Id of the target node.
    pub target: i64,
    /// Remaining key/value pairs, in source order.
    pub attributes: Attributes,
}

impl EdgeRecord {
    /// Creates an edge with no extra attributes.
    #[must_use]
    pub fn new(source: i64, target: i64) -> Self {
        Self {
            source,
            target,
            attributes: Attributes::new(),
        }
    }
}

/// A complete GML graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Whether edges are ordered pairs.
    pub directed: bool,
    /// Graph-level key/value pairs other than `directed`, `node` and `edge`.
    pub attributes: Attributes,
    /// Nodes in source order.
    pub nodes: Vec<NodeRecord>,
    /// Edges in source order.
    pub edges: Vec<EdgeRecord>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Builds a document from the top-level key/value list of a GML file.
    ///
    /// Exactly one `graph` block is required. Other top-level keys (such as
    /// `Creator`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the graph block is missing or
    /// duplicated, or if [`Document::validate`] rejects its contents.
    pub fn from_top_level(top: Attributes) -> Result<Self> {
        let mut graph = None;
        for (key, value) in top {
            match (key.as_str(), value) {
                ("graph", Value::List(list)) => {
                    if graph.replace(list).is_some() {
                        return Err(Error::invalid("more than one graph block"));
                    }
                }
                ("graph", other) => {
                    return Err(Error::invalid(format!(
                        "graph must be a [ ... ] block, found {}",
                        other.kind()
                    )));
                }
                (key, _) => tracing::debug!(key, "Ignoring top-level GML key"),
            }
        }
        let graph = graph.ok_or_else(|| Error::invalid("no graph block found"))?;
        Self::from_graph_block(graph)
    }

    /// Builds a document from the contents of a `graph [ ... ]` block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for malformed node or edge entries,
    /// multigraphs, and anything [`Document::validate`] rejects.
    pub fn from_graph_block(block: Attributes) -> Result<Self> {
        let mut doc = Self::default();
        for (key, value) in block {
            match key.as_str() {
                "directed" => doc.directed = flag(&key, &value)?,
                "multigraph" => {
                    if flag(&key, &value)? {
                        return Err(Error::invalid("multigraphs are not supported"));
                    }
                }
                "node" => doc.nodes.push(node_record(value)?),
                "edge" => doc.edges.push(edge_record(value)?),
                _ => doc.attributes.push(key, value),
            }
        }
        doc.validate()?;
        Ok(doc)
    }

    /// Checks referential integrity.
    ///
    /// Node ids and labels must be unique, every edge must reference known
    /// node ids, and no edge may appear twice (for undirected documents
    /// `a-b` and `b-a` are the same edge).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        let mut labels = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(Error::invalid(format!("node id {} is duplicated", node.id)));
            }
            if let Some(label) = &node.label {
                if !labels.insert(label.as_str()) {
                    return Err(Error::invalid(format!("node label '{label}' is duplicated")));
                }
            }
        }

        let mut seen = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            for end in [edge.source, edge.target] {
                if !ids.contains(&end) {
                    return Err(Error::invalid(format!(
                        "edge {} -> {} references unknown node id {end}",
                        edge.source, edge.target
                    )));
                }
            }
            let key = if self.directed || edge.source <= edge.target {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };
            if !seen.insert(key) {
                return Err(Error::invalid(format!(
                    "edge {} -> {} is duplicated",
                    edge.source, edge.target
                )));
            }
        }
        Ok(())
    }
}

fn flag(key: &str, value: &Value) -> Result<bool> {
    match value.as_int() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(Error::invalid(format!("{key} must be 0 or 1, found {value}"))),
    }
}

fn node_record(value: Value) -> Result<NodeRecord> {
    let entries = match value {
        Value::List(entries) => entries,
        other => {
            return Err(Error::invalid(format!(
                "node must be a [ ... ] block, found {}",
                other.kind()
            )));
        }
    };

    let mut id = None;
    let mut label = None;
    let mut attributes = Attributes::new();
    for (key, value) in entries {
        match key.as_str() {
            "id" => match (id, value) {
                (None, Value::Int(i)) => id = Some(i),
                (_, other) => {
                    return Err(Error::invalid(format!(
                        "node id must be a single integer, found {other}"
                    )));
                }
            },
            "label" => match value {
                Value::Str(s) if label.is_none() => label = Some(s),
                Value::Int(i) if label.is_none() => label = Some(i.to_string()),
                other => {
                    return Err(Error::invalid(format!(
                        "node label must be a single string, found {other}"
                    )));
                }
            },
            _ => attributes.push(key, value),
        }
    }

    let id = id.ok_or_else(|| Error::invalid("node without an id"))?;
    Ok(NodeRecord {
        id,
        label,
        attributes,
    })
}

fn edge_record(value: Value) -> Result<EdgeRecord> {
    let entries = match value {
        Value::List(entries) => entries,
        other => {
            return Err(Error::invalid(format!(
                "edge must be a [ ... ] block, found {}",
                other.kind()
            )));
        }
    };

    let mut source = None;
    let mut target = None;
    let mut attributes = Attributes::new();
    for (key, value) in entries {
        let slot = match key.as_str() {
            "source" => &mut source,
            "target" => &mut target,
            _ => {
                attributes.push(key, value);
                continue;
            }
        };
        match (*slot, value) {
            (None, Value::Int(i)) => *slot = Some(i),
            (_, other) => {
                return Err(Error::invalid(format!(
                    "edge {key} must be a single integer, found {other}"
                )));
            }
        }
    }

    match (source, target) {
        (Some(source), Some(target)) => Ok(EdgeRecord {
            source,
            target,
            attributes,
        }),
        _ => Err(Error::invalid("edge without source or target")),
    }
}
