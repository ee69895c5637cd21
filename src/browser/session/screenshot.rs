//! Screenshot capture.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{Command, PageCommand};

use super::CdpSession;

// ============================================================================
// CdpSession - Screenshot
// ============================================================================

impl CdpSession {
    /// Captures the full page as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if capture fails or the payload is not valid base64.
    pub async fn capture_png(&self) -> Result<Vec<u8>> {
        let command = Command::Page(PageCommand::CaptureScreenshot {
            format: "png".to_string(),
            capture_beyond_viewport: true,
        });

        let result = self.send_command(command).await?;
        let data = result
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::protocol("No screenshot data in response"))?;

        let bytes = Base64Standard
            .decode(data)
            .map_err(|e| Error::protocol(format!("Invalid screenshot encoding: {e}")))?;

        debug!(frame_id = %self.inner.frame_id, len = bytes.len(), "Captured screenshot");
        Ok(bytes)
    }
}
