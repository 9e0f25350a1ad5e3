//! Edge type for the document graph.
//!
//! Edges are the parent→child connections produced by the JSON-to-graph
//! converter. Each edge has:
//! - A unique string identifier
//! - Source and target node ids
//! - An optional label (e.g. the object key or array index it came from)

use serde::{Deserialize, Serialize};

/// One directed edge of the input graph.
///
/// The order of the edge list is significant: it determines child order
/// under each parent, and which parent wins when a node is referenced by
/// more than one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Unique identifier within the document.
    pub id: String,
    /// Id of the source (parent) node.
    pub source: String,
    /// Id of the target (child) node.
    pub target: String,
    /// Optional label for the connector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    /// Create an unlabeled edge.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    /// Attach a connector label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_omitted_when_absent() {
        let json = serde_json::to_string(&GraphEdge::new("e1", "a", "b")).unwrap();
        assert!(!json.contains("label"));
    }

    #[test]
    fn test_label_serialized_when_present() {
        let edge = GraphEdge::new("e1", "a", "b").with_label("items");
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("\"label\":\"items\""));
    }

    #[test]
    fn test_deserialize_without_label() {
        let edge: GraphEdge =
            serde_json::from_str(r#"{"id":"e1","source":"a","target":"b"}"#).unwrap();
        assert_eq!(edge.label, None);
    }
}
