//! The single-pass driver behind [`Cli::execute`](super::Cli::execute).

use std::fs;

use anyhow::{Context, Result};
use petgraph::{Directed, EdgeType, Undirected};

use super::Cli;
use crate::analysis::analyze;
use crate::bfs::{annotate_distances, multi_bfs};
use crate::config::RenderConfig;
use crate::domain::{AnyNetwork, Network};
use crate::enrich::annotate_for_output;
use crate::generate::{GeneratorParams, erdos_renyi, rng_from_seed};
use crate::output::{self, OutputConfig};
use crate::{io, render};

/// Printed when no graph source is given.
pub const GUIDANCE: &str = "No graph to work on. Load one with --input <PATH> \
or generate one with --create_random_graph <N> <C>. See --help for all options.";

/// Run every stage `cli` asks for.
pub fn run(cli: &Cli) -> Result<()> {
    let Some(network) = resolve_network(cli)? else {
        println!("{GUIDANCE}");
        return Ok(());
    };

    let render_config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    match network {
        AnyNetwork::Directed(net) => run_pipeline(cli, net, &render_config),
        AnyNetwork::Undirected(net) => run_pipeline(cli, net, &render_config),
    }
}

/// Generate or load the graph. `None` means no source was given.
fn resolve_network(cli: &Cli) -> Result<Option<AnyNetwork>> {
    if let Some(args) = &cli.create_random_graph {
        let [n, c] = args.as_slice() else {
            anyhow::bail!("--create_random_graph takes exactly two values, got {}", args.len());
        };
        let params = GeneratorParams::parse(n, c)?;
        if cli.input.is_some() {
            tracing::warn!("Both --create_random_graph and --input given, ignoring --input");
        }
        let mut rng = rng_from_seed(cli.seed);
        let network = if cli.directed {
            AnyNetwork::from(erdos_renyi::<Directed, _>(&params, &mut rng))
        } else {
            AnyNetwork::from(erdos_renyi::<Undirected, _>(&params, &mut rng))
        };
        return Ok(Some(network));
    }

    if let Some(path) = &cli.input {
        if cli.directed {
            tracing::warn!("--directed only applies to generated graphs, using the file's setting");
        }
        return Ok(Some(io::load(path)?));
    }

    Ok(None)
}

fn run_pipeline<Ty: EdgeType>(
    cli: &Cli,
    mut network: Network<Ty>,
    render_config: &RenderConfig,
) -> Result<()> {
    let output_config = OutputConfig::from_env();

    // Roots resolve before anything touches the file system.
    let trees = multi_bfs(&network, &cli.multi_bfs)?;
    if !trees.is_empty() || cli.plot {
        fs::create_dir_all(&cli.figure_dir).with_context(|| {
            format!("failed to create figure directory {}", cli.figure_dir.display())
        })?;
    }

    if !trees.is_empty() {
        output::print_levels(&network, &trees, &output_config)?;
        for tree in &trees {
            annotate_distances(&mut network, tree);
        }
        let path = cli.figure_dir.join(&render_config.bfs_file);
        render::bfs_panels(&network, &trees, render_config, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
    }

    if cli.analyze {
        let analysis = analyze(&network);
        if cli.json {
            output::print_analysis_json(&analysis)?;
        } else {
            output::print_analysis(&analysis, &output_config)?;
        }
    }

    if cli.plot {
        let path = cli.figure_dir.join(&render_config.plot_file);
        render::overview(&network, &trees, render_config, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
    }

    if let Some(path) = &cli.output {
        annotate_for_output(&mut network);
        io::save(&network, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
