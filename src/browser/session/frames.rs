//! Frame tree navigation methods.

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{Command, FrameTree, PageCommand};
use crate::transport::Connection;

use super::CdpSession;

// ============================================================================
// CdpSession - Frames
// ============================================================================

impl CdpSession {
    /// Returns the page's current frame tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `Page.getFrameTree` fails.
    pub async fn frame_tree(&self) -> Result<FrameTree> {
        Self::fetch_frame_tree(&self.inner.connection).await
    }

    /// Number of direct child frames of the bound frame.
    ///
    /// A bound frame that has since detached counts as having none.
    pub async fn child_frame_count(&self) -> Result<usize> {
        let tree = self.frame_tree().await?;
        Ok(tree
            .find(&self.inner.frame_id)
            .map_or(0, |node| node.child_frames.len()))
    }

    /// Returns a session bound to the child frame at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSwitchFailed`] if the index is out of range or
    /// the frame cannot be entered.
    pub async fn switch_to_frame(&self, index: usize) -> Result<Self> {
        debug!(frame_id = %self.inner.frame_id, index, "Switching to child frame");

        let tree = self.frame_tree().await.map_err(frame_error)?;
        let child = tree
            .find(&self.inner.frame_id)
            .and_then(|node| node.child_frames.get(index))
            .ok_or_else(|| {
                Error::frame_switch_failed(format!("no child frame at index {index}"))
            })?;

        Self::bind(self.inner.connection.clone(), child.frame.id.clone())
            .await
            .map_err(frame_error)
    }

    /// Returns a session bound to the top-level document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSwitchFailed`] if the main frame cannot be
    /// re-entered.
    pub async fn switch_to_main_frame(&self) -> Result<Self> {
        debug!(frame_id = %self.inner.frame_id, "Switching to main frame");

        let tree = self.frame_tree().await.map_err(frame_error)?;
        Self::bind(self.inner.connection.clone(), tree.frame.id)
            .await
            .map_err(frame_error)
    }

    /// Fetches the frame tree over `connection`.
    pub(crate) async fn fetch_frame_tree(connection: &Connection) -> Result<FrameTree> {
        let mut result = connection
            .call(Command::Page(PageCommand::GetFrameTree))
            .await?;
        let tree = result
            .get_mut("frameTree")
            .map(Value::take)
            .unwrap_or_default();
        Ok(serde_json::from_value(tree)?)
    }
}

fn frame_error(error: Error) -> Error {
    match error {
        Error::FrameSwitchFailed { .. } => error,
        other => Error::frame_switch_failed(other.to_string()),
    }
}
