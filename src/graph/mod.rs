//! Document graph data model and store.
//!
//! The JSON-to-graph converter (outside this crate) turns a document into an
//! ordered node list and an ordered edge list; this module holds those lists
//! and their topology between layout calls.

pub mod edge;
pub mod node;
pub mod store;

pub use edge::GraphEdge;
pub use node::{GraphNode, NodeKind};
pub use store::GraphStore;
