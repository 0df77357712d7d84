//! SVG figures.
//!
//! Two figures are produced: a grid of BFS tree panels, and an overview of
//! the whole graph with isolated nodes highlighted and BFS tree edges
//! overlaid per root.

use std::fmt;
use std::path::Path;

use petgraph::EdgeType;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::is_isolated;
use crate::bfs::BfsTree;
use crate::config::RenderConfig;
use crate::domain::Network;
use crate::error::{Error, Result};
use crate::layout::{self, Positions};

/// Fill for ordinary nodes.
pub const NODE_COLOR: RGBColor = RGBColor(135, 206, 235);
/// Fill for isolated nodes.
pub const ISOLATED_COLOR: RGBColor = RGBColor(220, 20, 60);
/// Stroke for graph edges.
pub const EDGE_COLOR: RGBColor = RGBColor(160, 160, 160);

/// Colours for per-root tree overlays. Red is reserved for isolated nodes.
pub const ROOT_PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Most panels placed side by side in the BFS figure.
pub const MAX_PANEL_COLUMNS: usize = 3;

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 18.0;
const LABEL_SIZE: f64 = 12.0;
const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 4.0;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn render_error(e: impl fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// Colour used for the `i`-th root.
#[must_use]
pub fn root_color(i: usize) -> RGBColor {
    ROOT_PALETTE[i % ROOT_PALETTE.len()]
}

/// Rows and columns of the BFS panel grid for `panels` trees.
#[must_use]
pub fn grid_shape(panels: usize) -> (usize, usize) {
    let cols = panels.clamp(1, MAX_PANEL_COLUMNS);
    (panels.div_ceil(cols).max(1), cols)
}

/// Maps unit-square positions onto an area's pixels.
struct Frame {
    width: f64,
    height: f64,
    margin: f64,
}

impl Frame {
    fn of(area: &Area<'_>, margin: f64) -> Self {
        let (w, h) = area.dim_in_pixel();
        Self {
            width: f64::from(w),
            height: f64::from(h),
            margin,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn map(&self, (x, y): (f64, f64)) -> (i32, i32) {
        let usable_w = (self.width - 2.0 * self.margin).max(1.0);
        let usable_h = (self.height - 2.0 * self.margin).max(1.0);
        (
            (self.margin + x * usable_w).round() as i32,
            (self.margin + y * usable_h).round() as i32,
        )
    }
}

fn label_style() -> TextStyle<'static> {
    (FONT, LABEL_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top))
}

fn legend_style() -> TextStyle<'static> {
    (FONT, LABEL_SIZE + 1.0)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center))
}

/// Draw a straight edge, optionally ending in an arrowhead that stops at the
/// target node's rim.
#[allow(clippy::cast_possible_truncation)]
fn draw_edge(
    area: &Area<'_>,
    from: (i32, i32),
    to: (i32, i32),
    style: ShapeStyle,
    arrow_gap: Option<u32>,
) -> Result<()> {
    let Some(gap) = arrow_gap else {
        return area
            .draw(&PathElement::new(vec![from, to], style))
            .map_err(render_error);
    };

    let (dx, dy) = (f64::from(to.0 - from.0), f64::from(to.1 - from.1));
    let len = dx.hypot(dy);
    if len <= f64::from(gap) + ARROW_LENGTH {
        return area
            .draw(&PathElement::new(vec![from, to], style))
            .map_err(render_error);
    }
    let (ux, uy) = (dx / len, dy / len);
    let tip = (
        f64::from(to.0) - ux * f64::from(gap),
        f64::from(to.1) - uy * f64::from(gap),
    );
    let base = (tip.0 - ux * ARROW_LENGTH, tip.1 - uy * ARROW_LENGTH);
    let (px, py) = (-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
    let point = |(x, y): (f64, f64)| (x.round() as i32, y.round() as i32);

    area.draw(&PathElement::new(vec![from, point(base)], style))
        .map_err(render_error)?;
    area.draw(&Polygon::new(
        vec![
            point(tip),
            point((base.0 + px, base.1 + py)),
            point((base.0 - px, base.1 - py)),
        ],
        style.color.filled(),
    ))
    .map_err(render_error)?;
    Ok(())
}

fn draw_self_loop(area: &Area<'_>, at: (i32, i32), radius: u32, style: ShapeStyle) -> Result<()> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    area.draw(&Circle::new((at.0, at.1 - r), radius, style))
        .map_err(render_error)
}

fn draw_node(
    area: &Area<'_>,
    at: (i32, i32),
    key: &str,
    radius: u32,
    fill: RGBColor,
) -> Result<()> {
    area.draw(&Circle::new(at, radius, fill.filled()))
        .map_err(render_error)?;
    area.draw(&Circle::new(at, radius, BLACK.stroke_width(1)))
        .map_err(render_error)?;
    let offset = i32::try_from(radius).unwrap_or(0) + 2;
    area.draw(&Text::new(key.to_string(), (at.0, at.1 + offset), label_style()))
        .map_err(render_error)
}

fn draw_empty_notice(area: &Area<'_>, text: &str) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let centre = (
        i32::try_from(w / 2).unwrap_or(0),
        i32::try_from(h / 2).unwrap_or(0),
    );
    let style = (FONT, LABEL_SIZE + 2.0)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(text.to_string(), centre, style))
        .map_err(render_error)
}

/// Render one panel per BFS tree into a single SVG file.
///
/// Each panel uses a tiered layout: the root on the left, one column per
/// level.
///
/// # Errors
///
/// Returns [`Error::Render`] if drawing or writing the file fails.
pub fn bfs_panels<Ty: EdgeType>(
    network: &Network<Ty>,
    trees: &[BfsTree],
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    let _span = tracing::debug_span!("render_bfs", path = %path.display(), trees = trees.len())
        .entered();

    let (rows, cols) = grid_shape(trees.len());
    let size = (
        config.panel_width.saturating_mul(u32::try_from(cols).unwrap_or(1)),
        config.panel_height.saturating_mul(u32::try_from(rows).unwrap_or(1)),
    );
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    if trees.is_empty() {
        let area = root
            .titled("BFS trees", (FONT, TITLE_SIZE))
            .map_err(render_error)?;
        draw_empty_notice(&area, "No roots given")?;
    }

    let radius = config.node_radius;
    for (i, (panel, tree)) in root.split_evenly((rows, cols)).iter().zip(trees).enumerate() {
        let area = panel
            .titled(&format!("BFS tree from root {}", tree.root_key), (FONT, TITLE_SIZE))
            .map_err(render_error)?;
        let frame = Frame::of(&area, f64::from(radius) * 2.0 + 12.0);
        let positions = layout::multipartite(tree);
        let at = |node: NodeIndex| frame.map(positions[&node]);
        let arrow = network.is_directed().then_some(radius);

        for &(parent, child) in &tree.edges {
            draw_edge(&area, at(parent), at(child), EDGE_COLOR.stroke_width(1), arrow)?;
        }
        for &(node, _) in &tree.levels {
            let fill = if node == tree.root {
                root_color(i)
            } else {
                NODE_COLOR
            };
            draw_node(&area, at(node), network.key(node), radius, fill)?;
        }
    }

    root.present().map_err(render_error)?;
    tracing::info!(path = %path.display(), panels = trees.len(), "Rendered BFS trees");
    Ok(())
}

/// Render the whole graph into an SVG file.
///
/// Nodes use a spring layout. Isolated nodes are red, the rest sky blue.
/// Each tree in `trees` has its edges overlaid in its palette colour, its
/// root ringed in the same colour, and an entry in the legend.
///
/// # Errors
///
/// Returns [`Error::Render`] if drawing or writing the file fails.
pub fn overview<Ty: EdgeType>(
    network: &Network<Ty>,
    trees: &[BfsTree],
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    let _span = tracing::debug_span!("render_overview", path = %path.display()).entered();

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let title = format!(
        "Graph: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    let area = root
        .titled(&title, (FONT, TITLE_SIZE))
        .map_err(render_error)?;

    if network.node_count() == 0 {
        draw_empty_notice(&area, "Empty graph")?;
    } else {
        draw_overview(&area, network, trees, config)?;
    }

    root.present().map_err(render_error)?;
    tracing::info!(path = %path.display(), "Rendered graph");
    Ok(())
}

fn draw_overview<Ty: EdgeType>(
    area: &Area<'_>,
    network: &Network<Ty>,
    trees: &[BfsTree],
    config: &RenderConfig,
) -> Result<()> {
    let radius = config.node_radius;
    let positions: Positions = layout::spring(network, config.layout_iterations);
    let frame = Frame::of(area, f64::from(radius) * 2.0 + 16.0);
    let at = |node: NodeIndex| frame.map(positions[&node]);
    let arrow = network.is_directed().then_some(radius);

    for edge in network.graph().edge_references() {
        let (a, b) = (edge.source(), edge.target());
        if a == b {
            draw_self_loop(area, at(a), radius, EDGE_COLOR.stroke_width(1))?;
        } else {
            draw_edge(area, at(a), at(b), EDGE_COLOR.stroke_width(1), arrow)?;
        }
    }

    for (i, tree) in trees.iter().enumerate() {
        let style = root_color(i).stroke_width(3);
        for &(parent, child) in &tree.edges {
            draw_edge(area, at(parent), at(child), style, arrow)?;
        }
    }

    for node in network.node_indices() {
        let fill = if is_isolated(network, node) {
            ISOLATED_COLOR
        } else {
            NODE_COLOR
        };
        draw_node(area, at(node), network.key(node), radius, fill)?;
    }

    for (i, tree) in trees.iter().enumerate() {
        area.draw(&Circle::new(
            at(tree.root),
            radius + 4,
            root_color(i).stroke_width(3),
        ))
        .map_err(render_error)?;
    }

    draw_legend(area, trees)
}

fn draw_legend(area: &Area<'_>, trees: &[BfsTree]) -> Result<()> {
    let mut entries: Vec<(RGBColor, String)> = trees
        .iter()
        .enumerate()
        .map(|(i, tree)| (root_color(i), format!("BFS tree from {}", tree.root_key)))
        .collect();
    entries.push((ISOLATED_COLOR, "isolated node".to_string()));

    let row_height = 18;
    for (row, (color, text)) in (0i32..).zip(entries) {
        let y = 10 + row * row_height;
        area.draw(&Rectangle::new([(10, y - 5), (22, y + 5)], color.filled()))
            .map_err(render_error)?;
        area.draw(&Text::new(text, (28, y), legend_style()))
            .map_err(render_error)?;
    }
    Ok(())
}
