//! JSON Atlas - WASM Module
//!
//! Layout core of the JSON Atlas visualizer. The JSON-to-graph converter
//! (JavaScript side) pushes an ordered node/edge list into the store; this
//! module turns it into a rooted tree and computes non-overlapping 2D
//! coordinates for every node in linear time, exposing a JavaScript-friendly
//! API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: document data model and petgraph-backed store
//! - `layout`: tree builder, the two tidy-tree positioning walks,
//!   normalization, and edge materialization

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod layout;

pub use graph::{GraphEdge, GraphNode, GraphStore, NodeKind};
pub use layout::{Direction, LayoutError, LayoutOptions, LayoutResult, PositionedNode, layout};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn options_from(value: JsValue) -> Result<LayoutOptions, JsError> {
    if value.is_undefined() || value.is_null() {
        Ok(LayoutOptions::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    // Plain objects instead of JS Maps, so payloads read naturally in JS.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Main entry point for the layout engine.
///
/// Wraps the internal GraphStore and provides the public API exposed to
/// JavaScript. The converter fills the store, the renderer consumes the
/// result of `computeLayout`.
#[wasm_bindgen]
pub struct JsonAtlasWasm {
    store: GraphStore,
}

#[wasm_bindgen]
impl JsonAtlasWasm {
    /// Create a new empty engine.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: GraphStore::new(),
        }
    }

    /// Create an engine with pre-allocated capacity.
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            store: GraphStore::with_capacity(node_capacity, edge_capacity),
        }
    }

    // =========================================================================
    // Document Loading
    // =========================================================================

    /// Replace the whole document with arrays of nodes and edges.
    ///
    /// Returns `[nodesAdded, edgesAdded]`; duplicate ids and dangling
    /// edges are dropped, not errors.
    #[wasm_bindgen(js_name = setGraph)]
    pub fn set_graph(&mut self, nodes: JsValue, edges: JsValue) -> Result<Vec<u32>, JsError> {
        let nodes: Vec<GraphNode> = serde_wasm_bindgen::from_value(nodes)?;
        let edges: Vec<GraphEdge> = serde_wasm_bindgen::from_value(edges)?;
        let (n, e) = self.store.set_graph(nodes, edges);
        Ok(vec![n, e])
    }

    /// Add a single node. Returns false if the id is already taken.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, node: JsValue) -> Result<bool, JsError> {
        Ok(self.store.add_node(serde_wasm_bindgen::from_value(node)?))
    }

    /// Add a single edge. Returns false if an endpoint id is unknown.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, edge: JsValue) -> Result<bool, JsError> {
        Ok(self.store.add_edge(serde_wasm_bindgen::from_value(edge)?))
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of nodes in the document.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.store.node_count()
    }

    /// Number of edges in the document.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.store.edge_count()
    }

    /// Direct children of a node, in edge insertion order.
    pub fn children(&self, id: &str) -> Vec<String> {
        self.store
            .children(id)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Parent of a node (source of the earliest edge targeting it).
    pub fn parent(&self, id: &str) -> Option<String> {
        self.store.parent(id).map(str::to_owned)
    }

    /// Nodes that are never an edge target, in insertion order.
    pub fn roots(&self) -> Vec<String> {
        self.store.roots().into_iter().map(str::to_owned).collect()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out the current document.
    ///
    /// `options` may be undefined, or a partial object with `direction`
    /// ("top-down" | "left-right"), `nodeWidth`, `nodeHeight`,
    /// `levelSeparation`, `siblingSeparation`, `subtreeSeparation`.
    /// Returns `{nodes: [{id, x, y, payload}], edges: [{id, source,
    /// target, label?}]}`. Invalid configuration is an error; malformed
    /// documents degrade gracefully.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&self, options: JsValue) -> Result<JsValue, JsError> {
        let options = options_from(options)?;
        let result = self.store.layout(&options)?;
        to_js(&result)
    }
}

impl Default for JsonAtlasWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot layout for callers that do not keep a store: takes node and
/// edge arrays plus optional options, returns the same shape as
/// `computeLayout`.
#[wasm_bindgen(js_name = layoutGraph)]
pub fn layout_graph(nodes: JsValue, edges: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let nodes: Vec<GraphNode> = serde_wasm_bindgen::from_value(nodes)?;
    let edges: Vec<GraphEdge> = serde_wasm_bindgen::from_value(edges)?;
    let options = options_from(options)?;
    let result = layout::layout(&nodes, &edges, &options)?;
    to_js(&result)
}
