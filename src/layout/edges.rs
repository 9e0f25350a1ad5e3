//! Edge materializer.
//!
//! Pass-through production of renderable edge descriptors. No layout
//! computation happens here; the pass only filters out edges whose
//! endpoints did not make it into the positioned node set (dangling ids,
//! or nodes dropped as unreachable from the root).

use std::collections::HashSet;

use crate::graph::GraphEdge;

/// Emit every input edge whose endpoints were both positioned, unchanged
/// and in input order.
pub(crate) fn materialize_edges(edges: &[GraphEdge], positioned: &HashSet<&str>) -> Vec<GraphEdge> {
    edges
        .iter()
        .filter(|e| positioned.contains(e.source.as_str()) && positioned.contains(e.target.as_str()))
        .cloned()
        .collect()
}
