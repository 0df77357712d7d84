//! Erdős–Rényi random graph generation.
//!
//! The edge probability is `p = c · ln(n) / n`. Around `c = 1` this sits at
//! the connectivity threshold: below it the graph is almost surely
//! disconnected, above it almost surely connected.

use petgraph::EdgeType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Network;
use crate::error::{Error, Result};

/// Largest accepted node count.
///
/// Generation tries every pair, so the work grows with `n²`.
pub const MAX_NODES: usize = 10_000;

/// Validated arguments of `--create_random_graph`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    /// Number of nodes.
    pub nodes: usize,
    /// Connectivity factor.
    pub c: f64,
}

impl GeneratorParams {
    /// Parse the raw `n` and `c` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeneratorArgument`] if `n` is not an integer in
    /// `1..=MAX_NODES` or `c` is not a finite, non-negative number.
    pub fn parse(n: &str, c: &str) -> Result<Self> {
        let invalid = |name, value: &str, reason: String| Error::InvalidGeneratorArgument {
            name,
            value: value.to_string(),
            reason,
        };

        let nodes: usize = n
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| invalid("n", n, e.to_string()))?;
        if nodes == 0 {
            return Err(invalid("n", n, "must be at least 1".to_string()));
        }
        if nodes > MAX_NODES {
            return Err(invalid("n", n, format!("must be at most {MAX_NODES}")));
        }

        let factor: f64 = c
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| invalid("c", c, e.to_string()))?;
        if !factor.is_finite() {
            return Err(invalid("c", c, "must be a finite number".to_string()));
        }
        if factor < 0.0 {
            return Err(invalid("c", c, "must not be negative".to_string()));
        }

        Ok(Self { nodes, c: factor })
    }

    /// Edge probability `c · ln(n) / n`, clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn probability(&self) -> f64 {
        let n = self.nodes as f64;
        (self.c * n.ln() / n).clamp(0.0, 1.0)
    }
}

/// Build an RNG from an explicit seed, or from the OS when none is given.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generate a G(n, p) random network.
///
/// Nodes are keyed `"0"` through `"n-1"`. Undirected networks try each
/// unordered pair once; directed networks try each ordered pair of distinct
/// nodes. No self-loops are generated.
pub fn erdos_renyi<Ty: EdgeType, R: Rng>(params: &GeneratorParams, rng: &mut R) -> Network<Ty> {
    let p = params.probability();
    let n = params.nodes;
    let _span = tracing::debug_span!("generate", n, p).entered();

    let mut network = Network::new();
    let nodes: Vec<_> = (0..n)
        .map(|i| {
            network
                .add_node(i.to_string())
                .unwrap_or_else(|_| unreachable!("generated keys are distinct"))
        })
        .collect();

    for (i, &u) in nodes.iter().enumerate() {
        let targets = if network.is_directed() {
            &nodes[..]
        } else {
            &nodes[i + 1..]
        };
        for &v in targets {
            if u == v {
                continue;
            }
            if rng.random::<f64>() < p {
                network
                    .insert_edge(u, v, Default::default())
                    .unwrap_or_else(|_| unreachable!("each pair is tried once"));
            }
        }
    }

    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "Generated random graph"
    );
    network
}
