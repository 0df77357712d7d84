//! Error types for graphlens-gml operations.

use std::io;
use thiserror::Error;

/// The error type for graphlens-gml operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed GML.
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line where the problem was detected.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The input is well-formed GML but does not describe a valid graph.
    #[error("Invalid GML document: {0}")]
    InvalidFormat(String),
}

impl Error {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }
}

/// A specialized Result type for graphlens-gml operations.
pub type Result<T> = std::result::Result<T, Error>;
