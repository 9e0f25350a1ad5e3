//! GraphStore - the current document graph.
//!
//! The store holds the node/edge lists pushed in by the JSON-to-graph
//! converter between layout calls. It keeps:
//! - Graph topology via petgraph's StableGraph (for child/parent queries)
//! - The original node and edge lists in insertion order (layout input is
//!   order-sensitive: child order and root tie-breaking follow it)
//! - A map from string ids to internal indices

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use std::collections::HashMap;

use super::edge::GraphEdge;
use super::node::GraphNode;
use crate::layout::{self, LayoutError, LayoutOptions, LayoutResult};

/// Insertion-ordered document graph with petgraph-backed topology.
///
/// The store enforces the input contract at the boundary: duplicate node ids
/// and edges with a missing endpoint are rejected (not stored), mirroring
/// the engine's silent-drop policy for malformed input.
pub struct GraphStore {
    /// Topology. Node weights are slots into `nodes`, edge weights slots
    /// into `edges`.
    graph: StableGraph<usize, usize>,

    /// Nodes in insertion order.
    nodes: Vec<GraphNode>,

    /// Edges in insertion order.
    edges: Vec<GraphEdge>,

    /// Map from node id to slot in `nodes`.
    id_to_slot: HashMap<String, usize>,

    /// petgraph index per node slot.
    indices: Vec<NodeIndex>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            id_to_slot: HashMap::new(),
            indices: Vec::new(),
        }
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(node_capacity, edge_capacity),
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
            id_to_slot: HashMap::with_capacity(node_capacity),
            indices: Vec::with_capacity(node_capacity),
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add a node. Returns false (and stores nothing) if the id is taken.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.id_to_slot.contains_key(&node.id) {
            return false;
        }
        let slot = self.nodes.len();
        self.id_to_slot.insert(node.id.clone(), slot);
        self.indices.push(self.graph.add_node(slot));
        self.nodes.push(node);
        true
    }

    /// Add an edge. Returns false (and stores nothing) if either endpoint
    /// id is unknown.
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        let (Some(&s), Some(&t)) = (
            self.id_to_slot.get(&edge.source),
            self.id_to_slot.get(&edge.target),
        ) else {
            return false;
        };
        let slot = self.edges.len();
        self.graph.add_edge(self.indices[s], self.indices[t], slot);
        self.edges.push(edge);
        true
    }

    /// Replace the whole document: clear, then bulk-load nodes and edges.
    ///
    /// Returns `(nodes_added, edges_added)`; rejected entries (duplicate
    /// ids, dangling edges) are not counted.
    pub fn set_graph(&mut self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> (u32, u32) {
        self.clear();
        self.nodes.reserve(nodes.len());
        self.edges.reserve(edges.len());

        let mut nodes_added = 0u32;
        for node in nodes {
            if self.add_node(node) {
                nodes_added += 1;
            }
        }
        let mut edges_added = 0u32;
        for edge in edges {
            if self.add_edge(edge) {
                edges_added += 1;
            }
        }
        (nodes_added, edges_added)
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.nodes.clear();
        self.edges.clear();
        self.id_to_slot.clear();
        self.indices.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of nodes in the store.
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Number of edges in the store.
    pub fn edge_count(&self) -> u32 {
        self.edges.len() as u32
    }

    /// Whether a node id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_slot.contains_key(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.id_to_slot.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Ids of the direct children of a node, in edge insertion order.
    pub fn children(&self, id: &str) -> Vec<&str> {
        let Some(&slot) = self.id_to_slot.get(id) else {
            return Vec::new();
        };
        // StableGraph yields neighbors in reverse insertion order.
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(self.indices[slot], Direction::Outgoing)
            .map(|idx| self.nodes[self.graph[idx]].id.as_str())
            .collect();
        out.reverse();
        out
    }

    /// Id of the node's parent: the source of the earliest edge targeting
    /// it, or None for roots and unknown ids.
    pub fn parent(&self, id: &str) -> Option<&str> {
        let &slot = self.id_to_slot.get(id)?;
        // Reverse insertion order, so the last yielded is the earliest edge.
        self.graph
            .neighbors_directed(self.indices[slot], Direction::Incoming)
            .last()
            .map(|idx| self.nodes[self.graph[idx]].id.as_str())
    }

    /// Ids of nodes that are never an edge target, in insertion order.
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .zip(&self.indices)
            .filter(|&(_, &idx)| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|(node, _)| node.id.as_str())
            .collect()
    }

    /// The stored node list in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// The stored edge list in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out the stored document.
    pub fn layout(&self, options: &LayoutOptions) -> Result<LayoutResult, LayoutError> {
        layout::layout(&self.nodes, &self.edges, options)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeKind;

    fn node(id: &str) -> GraphNode {
        GraphNode::new(id, id.to_uppercase(), NodeKind::Object)
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut store = GraphStore::new();
        assert!(store.add_node(node("a")));
        assert!(!store.add_node(node("a")));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut store = GraphStore::new();
        store.add_node(node("a"));
        assert!(!store.add_edge(GraphEdge::new("e1", "a", "zzz")));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_children_preserve_insertion_order() {
        let mut store = GraphStore::new();
        for id in ["root", "b", "a", "c"] {
            store.add_node(node(id));
        }
        store.add_edge(GraphEdge::new("e1", "root", "b"));
        store.add_edge(GraphEdge::new("e2", "root", "a"));
        store.add_edge(GraphEdge::new("e3", "root", "c"));
        assert_eq!(store.children("root"), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parent_is_earliest_edge() {
        let mut store = GraphStore::new();
        for id in ["r", "x", "y"] {
            store.add_node(node(id));
        }
        store.add_edge(GraphEdge::new("e1", "r", "y"));
        store.add_edge(GraphEdge::new("e2", "x", "y"));
        assert_eq!(store.parent("y"), Some("r"));
        assert_eq!(store.parent("r"), None);
    }

    #[test]
    fn test_roots_in_insertion_order() {
        let mut store = GraphStore::new();
        for id in ["a", "b", "c"] {
            store.add_node(node(id));
        }
        store.add_edge(GraphEdge::new("e1", "a", "c"));
        assert_eq!(store.roots(), vec!["a", "b"]);
    }

    #[test]
    fn test_set_graph_replaces_previous_document() {
        let mut store = GraphStore::new();
        store.set_graph(vec![node("old")], vec![]);
        let (n, e) = store.set_graph(
            vec![node("a"), node("b")],
            vec![
                GraphEdge::new("e1", "a", "b"),
                GraphEdge::new("e2", "a", "gone"),
            ],
        );
        assert_eq!((n, e), (2, 1));
        assert!(!store.contains("old"));
        assert_eq!(store.children("a"), vec!["b"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = GraphStore::new();
        store.add_node(node("a"));
        store.add_node(node("b"));
        store.add_edge(GraphEdge::new("e1", "a", "b"));
        store.clear();
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 0);
        // Ids are reusable after clear.
        assert!(store.add_node(node("a")));
    }
}
