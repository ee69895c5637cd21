//! Locating the form across browsing contexts.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::driver::Session;
use crate::error::{Error, Result};
use crate::resolve::wait_until;
use crate::selector::By;

use super::controller::FormFieldController;

// ============================================================================
// FormLocation
// ============================================================================

/// Where [`FormFieldController::locate_form`] found the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum FormLocation {
    /// Already in the active context.
    Current,
    /// In the top-level document.
    MainDocument,
    /// In the top-level frame at this index.
    Frame(usize),
    /// Nowhere; the active context is the top-level document.
    NotFound,
}

impl FormLocation {
    /// Returns `true` unless the form was not found.
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for FormLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current context"),
            Self::MainDocument => f.write_str("main document"),
            Self::Frame(index) => write!(f, "frame {index}"),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

// ============================================================================
// Discovery
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// Makes the form reachable and reports where it is.
    ///
    /// Checks the active context, then the top-level document (waiting up
    /// to `form_wait`), then each top-level frame in order. Frames that
    /// cannot be entered are skipped. When the form is nowhere, the active
    /// context becomes the top-level document.
    ///
    /// The active context is only replaced by a handle that was obtained
    /// successfully, so it is never left pointing at a half-entered frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSwitchFailed`] if the top-level document cannot
    /// be re-established.
    pub async fn locate_form(&mut self) -> Result<FormLocation> {
        let form = By::css(self.options().form_selector.as_str());
        let poll = self.options().poll_interval;

        if form_present(self.session(), &form).await {
            return Ok(FormLocation::Current);
        }

        let main = self.root().main_frame().await.map_err(as_frame_error)?;

        if wait_for_form(&main, &form, self.options().form_wait, poll).await {
            debug!("Form found in main document");
            self.set_context(main);
            return Ok(FormLocation::MainDocument);
        }

        let count = match main.frame_count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Could not count frames");
                0
            }
        };
        debug!(frames = count, "Form not in main document, scanning frames");

        for index in 0..count {
            match main.frame(index).await {
                Ok(frame) => {
                    if form_present(&frame, &form).await {
                        info!(frame = index, "Form found in frame");
                        self.set_context(frame);
                        return Ok(FormLocation::Frame(index));
                    }
                }
                Err(e) => warn!(frame = index, error = %e, "Skipping frame"),
            }
        }

        warn!(selector = %form, "Form not found in any context, using main document");
        self.set_context(main);
        Ok(FormLocation::NotFound)
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn form_present<S: Session>(session: &S, form: &By) -> bool {
    matches!(session.find(form).await, Ok(Some(_)))
}

async fn wait_for_form<S: Session>(
    session: &S,
    form: &By,
    timeout: Duration,
    poll_interval: Duration,
) -> bool {
    wait_until(timeout, poll_interval, move || async move {
        Ok(session.find(form).await?.is_some())
    })
    .await
}

fn as_frame_error(error: Error) -> Error {
    match error {
        Error::FrameSwitchFailed { .. } => error,
        other => Error::frame_switch_failed(format!("main document unreachable: {other}")),
    }
}

// ============================================================================
// Tests
// ============================================================================
