//! Error types for graphlens operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for graphlens operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested input file does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input file exists but could not be read as a GML graph.
    #[error("could not read {} as a GML graph", .path.display())]
    InputFormat {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying parse or validation failure.
        #[source]
        source: graphlens_gml::Error,
    },

    /// A random-graph generator argument is malformed or out of range.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidGeneratorArgument {
        /// Argument name as shown in the usage text.
        name: &'static str,
        /// The raw value supplied.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A node key does not exist in the graph.
    #[error("node '{0}' is not in the graph")]
    UnknownNode(String),

    /// A node key was added twice.
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    /// An edge was added twice.
    #[error("edge '{0}' -> '{1}' already exists")]
    DuplicateEdge(String, String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A figure could not be drawn.
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for graphlens operations.
pub type Result<T> = std::result::Result<T, Error>;
