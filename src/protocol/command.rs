//! CDP command definitions organized by domain.
//!
//! Commands follow the DevTools `Domain.method` format.
//!
//! # Command Domains
//!
//! | Domain | Commands |
//! |--------|----------|
//! | `Page` | Navigation, frame tree, isolated worlds, screenshots |
//! | `Runtime` | Function calls, property enumeration |
//! | `DOM` | Node description, focus |
//! | `Input` | Text insertion |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::{ContextId, FrameId};

// ============================================================================
// Command Wrapper
// ============================================================================

/// All CDP commands the adapter sends.
///
/// This enum wraps domain-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Page domain commands.
    Page(PageCommand),
    /// Runtime domain commands.
    Runtime(RuntimeCommand),
    /// DOM domain commands.
    Dom(DomCommand),
    /// Input domain commands.
    Input(InputCommand),
}

impl Command {
    /// Returns the `Domain.method` name.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Page(PageCommand::Navigate { .. }) => "Page.navigate",
            Self::Page(PageCommand::GetFrameTree) => "Page.getFrameTree",
            Self::Page(PageCommand::CreateIsolatedWorld { .. }) => "Page.createIsolatedWorld",
            Self::Page(PageCommand::CaptureScreenshot { .. }) => "Page.captureScreenshot",
            Self::Runtime(RuntimeCommand::CallFunctionOn { .. }) => "Runtime.callFunctionOn",
            Self::Runtime(RuntimeCommand::GetProperties { .. }) => "Runtime.getProperties",
            Self::Runtime(RuntimeCommand::ReleaseObject { .. }) => "Runtime.releaseObject",
            Self::Dom(DomCommand::DescribeNode { .. }) => "DOM.describeNode",
            Self::Dom(DomCommand::Focus { .. }) => "DOM.focus",
            Self::Input(InputCommand::InsertText { .. }) => "Input.insertText",
        }
    }
}

// ============================================================================
// Page Commands
// ============================================================================

/// Page domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum PageCommand {
    /// Navigate the top-level frame.
    #[serde(rename = "Page.navigate")]
    Navigate {
        /// URL to navigate to.
        url: String,
    },

    /// Get the frame hierarchy.
    #[serde(rename = "Page.getFrameTree")]
    GetFrameTree,

    /// Create an isolated script world in a frame.
    #[serde(rename = "Page.createIsolatedWorld", rename_all = "camelCase")]
    CreateIsolatedWorld {
        /// Frame to create the world in.
        frame_id: FrameId,
        /// World name, for DevTools display.
        world_name: String,
        /// Whether the world may access other origins.
        grant_univeral_access: bool,
    },

    /// Capture the page as an image.
    #[serde(rename = "Page.captureScreenshot", rename_all = "camelCase")]
    CaptureScreenshot {
        /// Image format (`png`).
        format: String,
        /// Capture the full page rather than the viewport.
        capture_beyond_viewport: bool,
    },
}

// ============================================================================
// Runtime Commands
// ============================================================================

/// Runtime domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum RuntimeCommand {
    /// Call a function with `this` bound to an object or in a context.
    #[serde(rename = "Runtime.callFunctionOn", rename_all = "camelCase")]
    CallFunctionOn {
        /// Function source, e.g. `function () { ... }`.
        function_declaration: String,
        /// Context to run in when no `object_id` is given.
        #[serde(skip_serializing_if = "Option::is_none")]
        execution_context_id: Option<ContextId>,
        /// Object to bind as `this`.
        #[serde(skip_serializing_if = "Option::is_none")]
        object_id: Option<String>,
        /// Positional arguments.
        arguments: Vec<CallArgument>,
        /// Return JSON rather than a remote reference.
        return_by_value: bool,
        /// Await a returned promise.
        await_promise: bool,
    },

    /// Enumerate an object's properties.
    #[serde(rename = "Runtime.getProperties", rename_all = "camelCase")]
    GetProperties {
        /// Object to inspect.
        object_id: String,
        /// Skip the prototype chain.
        own_properties: bool,
    },

    /// Release a remote object.
    #[serde(rename = "Runtime.releaseObject", rename_all = "camelCase")]
    ReleaseObject {
        /// Object to release.
        object_id: String,
    },
}

/// A `Runtime.callFunctionOn` argument: a JSON value or a remote object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallArgument {
    /// JSON value, for primitives and structures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Remote object id, for DOM nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl CallArgument {
    /// Creates a by-value argument.
    #[inline]
    #[must_use]
    pub fn value(value: Value) -> Self {
        Self {
            value: Some(value),
            object_id: None,
        }
    }

    /// Creates a remote-object argument.
    #[inline]
    #[must_use]
    pub fn object(object_id: impl Into<String>) -> Self {
        Self {
            value: None,
            object_id: Some(object_id.into()),
        }
    }
}

// ============================================================================
// DOM Commands
// ============================================================================

/// DOM domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum DomCommand {
    /// Describe the node behind a remote object.
    #[serde(rename = "DOM.describeNode", rename_all = "camelCase")]
    DescribeNode {
        /// Remote object id of the node.
        object_id: String,
    },

    /// Focus a node.
    #[serde(rename = "DOM.focus", rename_all = "camelCase")]
    Focus {
        /// Remote object id of the node.
        object_id: String,
    },
}

// ============================================================================
// Input Commands
// ============================================================================

/// Input domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum InputCommand {
    /// Insert text into the focused element.
    #[serde(rename = "Input.insertText")]
    InsertText {
        /// Text to insert.
        text: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
