//! Figure configuration.
//!
//! Every field has a default, so a YAML file passed with `--config` only
//! needs the keys it wants to change:
//!
//! ```yaml
//! width: 1600
//! layout-iterations: 500
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default file name of the whole-graph figure.
pub const DEFAULT_PLOT_FILE: &str = "graph.svg";
/// Default file name of the BFS panel figure.
pub const DEFAULT_BFS_FILE: &str = "bfs_trees.svg";

/// Smallest accepted figure or panel dimension, in pixels.
pub const MIN_DIMENSION: u32 = 100;
/// Largest accepted figure or panel dimension, in pixels.
pub const MAX_DIMENSION: u32 = 10_000;
/// Largest accepted number of spring layout steps.
pub const MAX_LAYOUT_ITERATIONS: usize = 10_000;

/// Settings for layout and SVG output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    /// Width of the whole-graph figure.
    pub width: u32,
    /// Height of the whole-graph figure.
    pub height: u32,
    /// Width of one BFS panel.
    pub panel_width: u32,
    /// Height of one BFS panel.
    pub panel_height: u32,
    /// Node circle radius in pixels.
    pub node_radius: u32,
    /// Force simulation steps for the spring layout.
    pub layout_iterations: usize,
    /// File name of the whole-graph figure, relative to the figure directory.
    pub plot_file: String,
    /// File name of the BFS figure, relative to the figure directory.
    pub bfs_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            panel_width: 500,
            panel_height: 400,
            node_radius: 8,
            layout_iterations: 300,
            plot_file: DEFAULT_PLOT_FILE.to_string(),
            bfs_file: DEFAULT_BFS_FILE.to_string(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a YAML file and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, is not valid
    /// YAML for this structure, or holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "Loaded render config");
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("panel-width", self.panel_width),
            ("panel-height", self.panel_height),
        ] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                )));
            }
        }

        if self.node_radius == 0 {
            return Err(Error::Config("node-radius must be positive".to_string()));
        }

        if self.layout_iterations > MAX_LAYOUT_ITERATIONS {
            return Err(Error::Config(format!(
                "layout-iterations must be at most {MAX_LAYOUT_ITERATIONS}, got {}",
                self.layout_iterations
            )));
        }

        for (name, file) in [("plot-file", &self.plot_file), ("bfs-file", &self.bfs_file)] {
            if file.trim().is_empty() {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }
}
