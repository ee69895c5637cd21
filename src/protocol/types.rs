//! Result payloads the adapter reads from responses.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::identifiers::FrameId;

// ============================================================================
// Runtime
// ============================================================================

/// A mirror of a JavaScript value in the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// JavaScript type, e.g. `object`, `string`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Object subtype, e.g. `node`, `array`, `null`.
    #[serde(default)]
    pub subtype: Option<String>,
    /// Primitive value, when the object is one.
    #[serde(default)]
    pub value: Option<Value>,
    /// Remote reference, for non-primitive objects.
    #[serde(default)]
    pub object_id: Option<String>,
    /// Display string.
    #[serde(default)]
    pub description: Option<String>,
}

impl RemoteObject {
    /// Returns `true` for DOM nodes.
    #[inline]
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.subtype.as_deref() == Some("node")
    }

    /// Returns `true` for arrays.
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.subtype.as_deref() == Some("array")
    }

    /// Returns `true` for `null` and `undefined`.
    #[inline]
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        self.kind == "undefined" || self.subtype.as_deref() == Some("null")
    }
}

/// One entry of a `Runtime.getProperties` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name; array indices are decimal strings.
    pub name: String,
    /// Property value, absent for accessors.
    #[serde(default)]
    pub value: Option<RemoteObject>,
}

/// Exception thrown by a called function.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    /// Summary text.
    pub text: String,
    /// The thrown value.
    #[serde(default)]
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Best description of the exception.
    #[must_use]
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| self.text.clone())
    }
}

// ============================================================================
// Page
// ============================================================================

/// A frame in the page's frame tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameTree {
    /// This frame.
    pub frame: FrameInfo,
    /// Child frames in document order.
    #[serde(default)]
    pub child_frames: Vec<FrameTree>,
}

impl FrameTree {
    /// Finds the subtree rooted at `id`.
    #[must_use]
    pub fn find(&self, id: &FrameId) -> Option<&FrameTree> {
        if &self.frame.id == id {
            return Some(self);
        }
        self.child_frames.iter().find_map(|child| child.find(id))
    }
}

/// Frame identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    /// Frame id.
    pub id: FrameId,
    /// Document URL.
    #[serde(default)]
    pub url: String,
}

// ============================================================================
// DOM
// ============================================================================

/// Result of `DOM.describeNode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    /// Stable id of the node for the document's lifetime.
    pub backend_node_id: i64,
    /// Upper-case tag name for elements.
    #[serde(default)]
    pub node_name: String,
}

// ============================================================================
// Tests
// ============================================================================
