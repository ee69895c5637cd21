//! Screenshot capture for failure diagnostics.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use image::ImageFormat;
use regex::Regex;
use tracing::{debug, warn};

use crate::driver::Session;
use crate::error::Result;

use super::controller::FormFieldController;

// ============================================================================
// Controller Methods
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// Captures the active context and saves it as
    /// `<screenshot_dir>/<label>_<unix millis>.png`.
    ///
    /// # Errors
    ///
    /// Returns an error if capture fails, the bytes are not a PNG, or the
    /// file cannot be written.
    pub async fn take_screenshot(&self, label: &str) -> Result<PathBuf> {
        let bytes = self.session().screenshot().await?;
        save_png(&self.options().screenshot_dir, label, &bytes).await
    }

    /// Like [`take_screenshot`](Self::take_screenshot), but logs failures
    /// and returns `None`.
    pub async fn try_screenshot(&self, label: &str) -> Option<PathBuf> {
        match self.take_screenshot(label).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(label, error = %e, "Screenshot failed");
                None
            }
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("label pattern is valid"));

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(label, "_");
    if cleaned.is_empty() {
        "screenshot".to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Validates `bytes` as PNG and writes them under `dir`.
///
/// The directory is created if missing.
///
/// # Errors
///
/// Returns [`Error::Image`](crate::Error::Image) for undecodable bytes or
/// [`Error::Io`](crate::Error::Io) on write failure.
pub async fn save_png(dir: &Path, label: &str, bytes: &[u8]) -> Result<PathBuf> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)?;

    tokio::fs::create_dir_all(dir).await?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(format!("{}_{millis}.png", sanitize_label(label)));

    tokio::fs::write(&path, bytes).await?;
    debug!(path = %path.display(), size = bytes.len(), "Screenshot saved");
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
