//! Session and element capability traits.
//!
//! These traits are the boundary between the resolution core and whatever
//! drives the browser. Every method is a single round trip; retry and
//! fallback policy lives in [`crate::resolve`] and [`crate::shadow`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::identifiers::ElementId;
use crate::selector::By;

use super::script::{ScriptArg, ScriptValue};

// ============================================================================
// ElementHandle
// ============================================================================

/// An opaque reference to a live DOM node.
///
/// Handles are cheap to clone. They are never cached across operations:
/// the page may re-render between calls.
#[async_trait]
pub trait ElementHandle: Clone + Send + Sync + fmt::Debug {
    /// Stable identity of the underlying node.
    fn id(&self) -> &ElementId;

    /// Whether the element is rendered and visible.
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the element accepts input.
    async fn is_enabled(&self) -> Result<bool>;

    /// Checked state for radios and checkboxes, selected state for options.
    async fn is_selected(&self) -> Result<bool>;

    /// The `value` property, if the element has one.
    async fn value(&self) -> Result<Option<String>>;

    /// Clears the element's value.
    async fn clear(&self) -> Result<()>;

    /// Types text into the element.
    async fn send_keys(&self, text: &str) -> Result<()>;

    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Selects the `<option>` whose visible text equals `text`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if no option matches.
    async fn select_by_text(&self, text: &str) -> Result<()>;

    /// Visible text of the first selected `<option>`.
    async fn selected_text(&self) -> Result<Option<String>>;
}

// ============================================================================
// Session
// ============================================================================

/// A browsing context: the main document or one frame.
///
/// Frame navigation returns new handles; the receiver is never mutated.
#[async_trait]
pub trait Session: Send + Sync + Sized {
    /// Element handle type produced by this session.
    type Element: ElementHandle;

    /// Finds the first element matching `by`, or `None`.
    async fn find(&self, by: &By) -> Result<Option<Self::Element>>;

    /// Finds every element matching `by`, in document order.
    async fn find_all(&self, by: &By) -> Result<Vec<Self::Element>>;

    /// Executes a script body in page context.
    async fn execute(
        &self,
        script: &str,
        args: Vec<ScriptArg<Self::Element>>,
    ) -> Result<ScriptValue<Self::Element>>;

    /// Number of direct child frames of this context.
    async fn frame_count(&self) -> Result<usize>;

    /// Returns a session bound to the child frame at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] if the frame does not
    /// exist or cannot be entered.
    async fn frame(&self, index: usize) -> Result<Self>;

    /// Returns a session bound to the top-level document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] if the top-level context
    /// cannot be re-established.
    async fn main_frame(&self) -> Result<Self>;

    /// Captures a full-page screenshot as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;
}
