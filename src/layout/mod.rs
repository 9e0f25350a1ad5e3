//! Tree layout engine for JSON document graphs.
//!
//! Converts the ordered node/edge lists of a document graph into a rooted
//! tree and computes non-overlapping, balanced 2D coordinates for every
//! node in linear time. The pipeline is:
//!
//! 1. `tree` — build a rooted tree arena from the input lists
//! 2. `tidy` — first walk (preliminary positions, contour threading) and
//!    second walk (absolute coordinates)
//! 3. `bounds` — orientation mapping and non-negative framing
//! 4. `edges` — pass-through materialization of renderable edges
//!
//! The engine is a pure synchronous function of its input: no state
//! survives between calls, identical input produces bit-identical output,
//! and malformed-but-well-typed graphs degrade gracefully instead of
//! failing. Only invalid configuration is an error.

pub(crate) mod bounds;
pub(crate) mod edges;
pub(crate) mod tidy;
pub(crate) mod tree;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::graph::{GraphEdge, GraphNode};
use self::edges::materialize_edges;
use self::tree::TreeArena;

/// Which screen axis the root-to-leaves direction maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Root at the top, depth grows downward (y axis).
    #[default]
    #[serde(rename = "top-down")]
    TopDown,
    /// Root at the left, depth grows rightward (x axis).
    #[serde(rename = "left-right")]
    LeftRight,
}

/// Layout configuration.
///
/// Deserializes from a partial camelCase object; omitted fields take the
/// defaults below. Dimensions must be positive and separations
/// non-negative, checked by [`LayoutOptions::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Orientation of the tree on screen.
    pub direction: Direction,
    /// Width of a node box, in pixels.
    pub node_width: f64,
    /// Height of a node box, in pixels.
    pub node_height: f64,
    /// Distance between adjacent depth levels.
    pub level_separation: f64,
    /// Primary-axis distance between adjacent siblings.
    pub sibling_separation: f64,
    /// Primary-axis distance between nodes of different subtrees.
    pub subtree_separation: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TopDown,
            node_width: 220.0,
            node_height: 70.0,
            level_separation: 150.0,
            sibling_separation: 100.0,
            subtree_separation: 120.0,
        }
    }
}

impl LayoutOptions {
    /// Reject invalid configuration. NaN never passes either check.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
        ] {
            if !(value > 0.0) {
                return Err(LayoutError::NonPositiveNodeSize { name, value });
            }
        }
        for (name, value) in [
            ("levelSeparation", self.level_separation),
            ("siblingSeparation", self.sibling_separation),
            ("subtreeSeparation", self.subtree_separation),
        ] {
            if !(value >= 0.0) {
                return Err(LayoutError::NegativeSeparation { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration errors. Malformed graphs are never errors: missing roots
/// fall back to the first node, dangling edges are dropped, empty input
/// yields empty output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveNodeSize { name: &'static str, value: f64 },
    #[error("{name} must be non-negative, got {value}")]
    NegativeSeparation { name: &'static str, value: f64 },
}

/// One positioned node: the box center in the normalized frame plus the
/// original node for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub payload: GraphNode,
}

/// Everything the renderer needs to draw one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Positioned nodes, in tree preorder.
    pub nodes: Vec<PositionedNode>,
    /// Renderable edges, in input order.
    pub edges: Vec<GraphEdge>,
}

/// Lay out a document graph.
///
/// Builds a fresh tree from `(nodes, edges)`, runs both positioning walks,
/// normalizes into a non-negative frame for the requested direction, and
/// materializes the renderable edges. The scratch tree is discarded before
/// returning; concurrent calls share nothing.
pub fn layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    options: &LayoutOptions,
) -> Result<LayoutResult, LayoutError> {
    options.validate()?;

    let Some(mut arena) = TreeArena::build(nodes, edges) else {
        return Ok(LayoutResult::default());
    };

    tidy::first_walk(&mut arena, options);
    let placements = tidy::second_walk(&arena, options.level_separation);

    let mut coords: Vec<(f64, f64)> = placements.iter().map(|p| (p.primary, p.depth)).collect();
    bounds::normalize(&mut coords, options);

    let positioned: Vec<PositionedNode> = placements
        .iter()
        .zip(&coords)
        .map(|(p, &(x, y))| {
            let source = &nodes[arena.nodes[p.arena_index].graph_index];
            PositionedNode {
                id: source.id.clone(),
                x,
                y,
                payload: source.clone(),
            }
        })
        .collect();

    let placed: HashSet<&str> = positioned.iter().map(|n| n.id.as_str()).collect();
    let edges = materialize_edges(edges, &placed);

    Ok(LayoutResult {
        nodes: positioned,
        edges,
    })
}
