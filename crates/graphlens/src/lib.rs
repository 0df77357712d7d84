//! graphlens - generate, analyze, traverse and render graphs.
//!
//! This crate provides both the `graphlens` CLI and the library behind it.
//! Graphs are loaded from GML files (see [`graphlens_gml`]) or generated as
//! Erdős–Rényi random graphs, then run through any of: multi-root BFS,
//! structural analysis, SVG rendering, and enriched GML output.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analysis;
pub mod bfs;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod generate;
pub mod io;
pub mod layout;
pub mod render;

// Public CLI module (needed by binary)
pub mod cli;

pub mod config;
pub mod output;

pub use error::{Error, Result};
