//! Analysis reports and BFS level listings.

use std::fmt::Write as _;
use std::io::{self, Write};

use petgraph::EdgeType;

use super::OutputConfig;
use super::color::{bold, dimmed, error, info, success, warning};
use crate::analysis::{Analysis, PathLength};
use crate::bfs::BfsTree;
use crate::domain::Network;

/// Header line of the analysis report.
pub const REPORT_HEADER: &str = "====  Results Of Analyzing Graph  ====";

/// Format an analysis as a human-readable report.
///
/// Every line ends with a newline.
#[must_use]
pub fn format_analysis(analysis: &Analysis, config: &OutputConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", bold(REPORT_HEADER, config));

    let components = analysis.connected_components.to_string();
    let components = if analysis.connected_components == 1 {
        success(&components, config)
    } else {
        warning(&components, config)
    };
    let _ = writeln!(
        out,
        "There are {components} connected components in the graph."
    );

    if analysis.has_cycle {
        let _ = writeln!(out, "There is {}.", warning("a cycle", config));
    } else {
        let _ = writeln!(out, "There is {}.", success("no cycle", config));
    }

    let isolated = analysis.isolated_nodes.len().to_string();
    let isolated = if analysis.isolated_nodes.is_empty() {
        success(&isolated, config)
    } else {
        error(&isolated, config)
    };
    let _ = writeln!(out, "There are {isolated} isolated nodes in the graph.");
    if !analysis.isolated_nodes.is_empty() {
        let list = analysis.isolated_nodes.join(", ");
        for line in textwrap::wrap(&list, config.max_width.saturating_sub(2).max(10)) {
            let _ = writeln!(out, "  {}", dimmed(&line, config));
        }
    }

    let _ = writeln!(
        out,
        "The graph has a density of {}.",
        info(&analysis.density.to_string(), config)
    );

    let path = match analysis.average_shortest_path {
        PathLength::Connected(v) => info(&v.to_string(), config),
        PathLength::NotConnected => warning(&PathLength::NotConnected.to_string(), config),
    };
    let _ = writeln!(out, "The average shortest path of the graph is {path}.");
    out
}

/// Print an analysis report to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn print_analysis(analysis: &Analysis, config: &OutputConfig) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(format_analysis(analysis, config).as_bytes())?;
    stdout.flush()
}

/// Print an analysis as pretty JSON to stdout.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_analysis_json(analysis: &Analysis) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, analysis)?;
    writeln!(stdout)
}

/// Format the level map of one BFS tree, one `node: level` line per
/// reachable node, by level and then node index.
#[must_use]
pub fn format_levels<Ty: EdgeType>(
    network: &Network<Ty>,
    tree: &BfsTree,
    config: &OutputConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        bold("BFS levels from root", config),
        info(&tree.root_key, config)
    );
    for &(node, level) in &tree.levels {
        let _ = writeln!(
            out,
            "  {}{} {level}",
            info(network.key(node), config),
            dimmed(":", config)
        );
    }
    out
}

/// Print the level map of every tree to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn print_levels<Ty: EdgeType>(
    network: &Network<Ty>,
    trees: &[BfsTree],
    config: &OutputConfig,
) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for tree in trees {
        stdout.write_all(format_levels(network, tree, config).as_bytes())?;
    }
    stdout.flush()
}
