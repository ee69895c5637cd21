//! Page navigation methods.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::protocol::{Command, PageCommand};
use crate::resolve::wait_until;

use super::CdpSession;

// ============================================================================
// Constants
// ============================================================================

/// How long to wait for `document.readyState` to become `complete`.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between ready-state checks.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// CdpSession - Navigation
// ============================================================================

impl CdpSession {
    /// Navigates the page and waits for the load to complete.
    ///
    /// Navigation discards every script world in the page, so the returned
    /// session replaces this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the browser rejects the navigation, or
    /// [`Error::Timeout`] if the document never finishes loading.
    pub async fn goto(&self, url: &str) -> Result<Self> {
        debug!(url, frame_id = %self.inner.frame_id, "Navigating");

        let command = Command::Page(PageCommand::Navigate {
            url: url.to_string(),
        });
        let result = self.send_command(command).await?;

        if let Some(reason) = result.get("errorText").and_then(Value::as_str)
            && !reason.is_empty()
        {
            return Err(Error::protocol(format!("Navigation to {url} failed: {reason}")));
        }

        let tree = self.frame_tree().await?;
        let session = Self::bind(self.inner.connection.clone(), tree.frame.id).await?;
        session.wait_for_load().await?;
        Ok(session)
    }

    /// Waits until `document.readyState` is `complete`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] after 30 seconds.
    pub async fn wait_for_load(&self) -> Result<()> {
        let loaded = wait_until(LOAD_TIMEOUT, LOAD_POLL_INTERVAL, || async {
            let state = self
                .execute_script("return document.readyState;", Vec::new())
                .await?;
            Ok(state.as_str() == Some("complete"))
        })
        .await;

        if loaded {
            Ok(())
        } else {
            warn!(frame_id = %self.inner.frame_id, "Document did not finish loading");
            Err(Error::timeout("document load", LOAD_TIMEOUT.as_millis() as u64))
        }
    }
}
