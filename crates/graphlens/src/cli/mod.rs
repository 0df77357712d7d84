//! Command-line interface.
//!
//! graphlens runs as a single pass over one graph. The graph comes from
//! either `--input` or `--create_random_graph`; the remaining flags select
//! which stages run, always in this order:
//!
//! 1. `--multi_BFS`: BFS trees, printed levels, distance attributes, panel figure
//! 2. `--analyze`: structural report (text, or JSON with `--json`)
//! 3. `--plot`: whole-graph figure
//! 4. `--output`: enriched GML file
//!
//! # Example
//!
//! ```bash
//! graphlens --create_random_graph 30 1.2 --seed 7 --multi_BFS 0 5 --analyze --plot
//! graphlens --input graph.gml --analyze --output enriched.gml
//! ```

mod execute;
mod validators;

use std::path::PathBuf;

use clap::Parser;

pub use validators::validate_root;

/// Graph generation, analysis, BFS, and visualization tool
#[derive(Parser, Debug, Clone)]
#[command(name = "graphlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input GML graph file to load
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Create an Erdős–Rényi random graph with n nodes and edge probability
    /// p = c·ln(n)/n. Takes precedence over --input.
    #[arg(
        long = "create_random_graph",
        num_args = 2,
        value_names = ["N", "C"],
        allow_hyphen_values = true
    )]
    pub create_random_graph: Option<Vec<String>>,

    /// One or more BFS root node keys
    #[arg(long = "multi_BFS", num_args = 1.., value_name = "ROOT", value_parser = validate_root)]
    pub multi_bfs: Vec<String>,

    /// Perform structural analysis
    #[arg(long)]
    pub analyze: bool,

    /// Plot the whole graph
    #[arg(long)]
    pub plot: bool,

    /// Write the enriched graph to a GML file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Generate a directed random graph (files declare their own directedness)
    #[arg(long)]
    pub directed: bool,

    /// Seed for the random graph generator
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// YAML file with figure settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory that receives the SVG figures
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub figure_dir: PathBuf,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse arguments from the process command line.
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse arguments from an iterator.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Run every requested stage.
    ///
    /// # Errors
    ///
    /// Returns the first failure; later stages do not run.
    pub fn execute(&self) -> anyhow::Result<()> {
        execute::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stage_flag() {
        let cli = Cli::try_parse_from([
            "graphlens",
            "--create_random_graph",
            "12",
            "1.0",
            "--multi_BFS",
            "0",
            "3",
            "--analyze",
            "--plot",
            "--output",
            "out.gml",
        ])
        .unwrap();

        assert_eq!(
            cli.create_random_graph,
            Some(vec!["12".to_string(), "1.0".to_string()])
        );
        assert_eq!(cli.multi_bfs, vec!["0", "3"]);
        assert!(cli.analyze && cli.plot);
        assert_eq!(cli.output, Some(PathBuf::from("out.gml")));
        assert_eq!(cli.figure_dir, PathBuf::from("."));
    }

    #[test]
    fn generator_accepts_negative_looking_values() {
        let cli = Cli::try_parse_from(["graphlens", "--create_random_graph", "-3", "1"]).unwrap();
        assert_eq!(cli.create_random_graph, Some(vec!["-3".into(), "1".into()]));
    }

    #[test]
    fn generator_requires_two_values() {
        assert!(Cli::try_parse_from(["graphlens", "--create_random_graph", "10"]).is_err());
    }

    #[test]
    fn multi_bfs_requires_a_root() {
        assert!(Cli::try_parse_from(["graphlens", "--multi_BFS"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["graphlens", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
