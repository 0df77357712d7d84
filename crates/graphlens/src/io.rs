//! Loading and saving networks as GML files.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use graphlens_gml::{GmlReader, GmlWriter};
use petgraph::EdgeType;

use crate::domain::{AnyNetwork, Network};
use crate::error::{Error, Result};

/// Load a GML file.
///
/// The file's `directed` flag selects the [`AnyNetwork`] variant.
///
/// # Errors
///
/// - [`Error::InputNotFound`] if the file does not exist
/// - [`Error::InputFormat`] if it is not a well-formed, consistent GML graph
/// - [`Error::Io`] for other read failures
pub fn load(path: &Path) -> Result<AnyNetwork> {
    let _span = tracing::debug_span!("load", path = %path.display()).entered();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let format_error = |source| Error::InputFormat {
        path: path.to_path_buf(),
        source,
    };

    let doc = GmlReader::new(BufReader::new(file))
        .read_document()
        .map_err(format_error)?;
    // Domain-level inconsistencies are still problems with the file.
    let network = AnyNetwork::from_document(doc)
        .map_err(|e| format_error(graphlens_gml::Error::InvalidFormat(e.to_string())))?;

    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        directed = network.is_directed(),
        "Loaded graph"
    );
    Ok(network)
}

/// Save a network as GML.
///
/// The file is flushed and closed before this returns.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn save<Ty: EdgeType>(network: &Network<Ty>, path: &Path) -> Result<()> {
    let _span = tracing::debug_span!("save", path = %path.display()).entered();

    let file = File::create(path)?;
    let mut writer = GmlWriter::new(file);
    writer.write_document(&network.to_document())?;
    let file = writer.into_inner()?;
    file.sync_all()?;

    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        path = %path.display(),
        "Saved graph"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlens_gml::Value;
    use petgraph::{Directed, Undirected};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.gml")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn malformed_file_is_input_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.gml");
        fs::write(&path, "graph [ node [ id 0 ").unwrap();

        let err = load(&path).unwrap_err();

        assert!(matches!(err, Error::InputFormat { .. }));
    }

    #[test]
    fn inconsistent_graph_is_input_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.gml");
        fs::write(
            &path,
            "graph [ node [ id 0 ] node [ id 1 ] edge [ source 0 target 1 ] edge [ source 1 target 0 ] ]",
        )
        .unwrap();

        let err = load(&path).unwrap_err();

        assert!(matches!(err, Error::InputFormat { .. }), "got {err}");
    }

    #[test]
    fn save_then_load_preserves_graph() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.gml");
        let mut net: Network<Directed> = Network::new();
        let a = net.add_node("a").unwrap();
        net.add_node("b").unwrap();
        net.add_edge("a", "b").unwrap();
        net.node_mut(a).attributes.insert("weight", Value::Float(0.5));
        net.attributes_mut().insert("name", Value::from("demo"));

        save(&net, &path).unwrap();
        let AnyNetwork::Directed(loaded) = load(&path).unwrap() else {
            panic!("expected a directed graph");
        };

        assert_eq!(loaded.to_document(), net.to_document());
    }

    #[test]
    fn undirected_file_loads_undirected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u.gml");
        let net: Network<Undirected> = Network::new();
        save(&net, &path).unwrap();

        assert!(!load(&path).unwrap().is_directed());
    }
}
