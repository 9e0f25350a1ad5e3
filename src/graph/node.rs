//! Node type for the document graph.
//!
//! Nodes are produced upstream by the JSON-to-graph converter. Each node has:
//! - A unique string identifier
//! - A display label (already summarized/truncated by the converter)
//! - A kind describing what the node represents in the source document
//! - An opaque data payload carried through to the renderer

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a graph node represents in the source JSON document.
///
/// The engine never interprets the kind; it is carried through for the
/// renderer. Unrecognized kinds from newer converters deserialize as
/// [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A JSON object (or a summarized slice of one).
    Object,
    /// A JSON array (or a summarized slice of one).
    Array,
    /// A primitive value: string, number, boolean, null.
    Scalar,
    /// A string value the converter recognized as an image reference.
    Image,
    /// A string value the converter recognized as a URL.
    Url,
    /// Any kind this version does not know about.
    #[serde(other)]
    Other,
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Scalar
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Scalar => "scalar",
            Self::Image => "image",
            Self::Url => "url",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// One node of the input graph.
///
/// Ids must be unique within a document; the order of the node list is
/// significant (it drives root selection and tie-breaking).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier within the document.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// What the node represents in the source JSON.
    #[serde(default)]
    pub kind: NodeKind,
    /// Opaque payload passed through to the renderer untouched.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl GraphNode {
    /// Create a node with an empty payload.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            data: serde_json::Value::Null,
        }
    }
}
