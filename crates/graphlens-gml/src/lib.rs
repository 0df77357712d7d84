//! A small GML (Graph Modelling Language) library for Rust.
//!
//! This library reads and writes the attributed-graph text format produced by
//! networkx, igraph and friends:
//!
//! ```text
//! graph [
//!   directed 0
//!   node [
//!     id 0
//!     label "a"
//!   ]
//!   edge [
//!     source 0
//!     target 1
//!   ]
//! ]
//! ```
//!
//! Every key/value pair that is not structural (`id`, `label`, `source`,
//! `target`, `directed`) is kept verbatim in an ordered [`Attributes`] list,
//! so a document survives a read/write cycle without losing data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
mod escape;
mod parser;
pub mod reader;
pub mod value;
pub mod writer;

pub use document::{Document, EdgeRecord, NodeRecord};
pub use error::{Error, Result};
pub use reader::{GmlReader, parse_str, parse_tree};
pub use value::{Attributes, Value};
pub use writer::{GmlWriter, to_string};
