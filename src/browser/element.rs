//! DOM element handles backed by DevTools remote objects.
//!
//! Elements are identified by the node's backend id, which stays stable for
//! the document's lifetime, and addressed through a remote object reference
//! in the owning session's script world. The reference is released when the
//! last clone of a handle is dropped inside a tokio runtime.
//!
//! # Example
//!
//! ```ignore
//! let input = session.find(&By::id("fname")).await?.ok_or(...)?;
//!
//! input.clear().await?;
//! input.send_keys("Jane").await?;
//! assert_eq!(input.value().await?.as_deref(), Some("Jane"));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::driver::{ElementHandle, ScriptArg, ScriptValue};
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::protocol::{Command, DomCommand, InputCommand};

use super::CdpSession;

// ============================================================================
// Scripts
// ============================================================================

const IS_DISPLAYED: &str = "var el = arguments[0]; \
    var style = window.getComputedStyle(el); \
    var rect = el.getBoundingClientRect(); \
    return style.display !== 'none' && style.visibility !== 'hidden' \
        && rect.width > 0 && rect.height > 0;";

const IS_ENABLED: &str = "return !arguments[0].disabled;";

const IS_SELECTED: &str = "var el = arguments[0]; return !!(el.checked || el.selected);";

const VALUE: &str = "var el = arguments[0]; return ('value' in el) ? String(el.value) : null;";

const CLEAR: &str = "var el = arguments[0]; el.value = ''; \
    el.dispatchEvent(new Event('input', { bubbles: true })); \
    el.dispatchEvent(new Event('change', { bubbles: true })); \
    return true;";

const CLICK: &str = "var el = arguments[0]; \
    el.scrollIntoView({ block: 'center' }); el.click(); return true;";

const SELECT_BY_TEXT: &str = "var el = arguments[0], text = arguments[1]; \
    var options = el.options || []; \
    for (var i = 0; i < options.length; i++) { \
        if (options[i].text.trim() === text) { \
            el.selectedIndex = i; \
            el.dispatchEvent(new Event('change', { bubbles: true })); \
            return true; \
        } \
    } \
    return false;";

const SELECTED_TEXT: &str = "var el = arguments[0]; \
    if (!el.options || el.selectedIndex < 0) return null; \
    return el.options[el.selectedIndex].text;";

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for an element.
pub(crate) struct ElementInner {
    /// Backend node id.
    pub id: ElementId,
    /// Remote object reference.
    pub object_id: String,
    /// Session whose script world owns the reference.
    pub session: CdpSession,
}

impl Drop for ElementInner {
    /// Releases the remote reference once the last handle is gone.
    fn drop(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let session = self.session.clone();
        let object_id = std::mem::take(&mut self.object_id);
        runtime.spawn(async move { session.release(object_id).await });
    }
}

// ============================================================================
// CdpElement
// ============================================================================

/// A handle to a DOM element in a [`CdpSession`].
#[derive(Clone)]
pub struct CdpElement {
    pub(crate) inner: Arc<ElementInner>,
}

impl fmt::Debug for CdpElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdpElement")
            .field("id", &self.inner.id)
            .field("frame_id", self.inner.session.frame_id())
            .finish_non_exhaustive()
    }
}

impl CdpElement {
    /// Creates a new element handle.
    pub(crate) fn new(id: ElementId, object_id: String, session: CdpSession) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                id,
                object_id,
                session,
            }),
        }
    }

    /// Returns the remote object reference.
    #[inline]
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.inner.object_id
    }

    /// Returns the owning session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &CdpSession {
        &self.inner.session
    }
}

// ============================================================================
// CdpElement - Internal
// ============================================================================

impl CdpElement {
    /// Runs `script` with this element as `arguments[0]`.
    async fn run(&self, script: &str, extra: Vec<ScriptArg<Self>>) -> Result<ScriptValue<Self>> {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(ScriptArg::element(self.clone()));
        args.extend(extra);
        self.inner.session.execute_script(script, args).await
    }

    async fn run_bool(&self, script: &str) -> Result<bool> {
        Ok(self.run(script, Vec::new()).await?.as_bool())
    }

    async fn run_string(&self, script: &str) -> Result<Option<String>> {
        Ok(self
            .run(script, Vec::new())
            .await?
            .as_str()
            .map(str::to_string))
    }
}

// ============================================================================
// ElementHandle Implementation
// ============================================================================

#[async_trait]
impl ElementHandle for CdpElement {
    fn id(&self) -> &ElementId {
        &self.inner.id
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.run_bool(IS_DISPLAYED).await
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.run_bool(IS_ENABLED).await
    }

    async fn is_selected(&self) -> Result<bool> {
        self.run_bool(IS_SELECTED).await
    }

    async fn value(&self) -> Result<Option<String>> {
        self.run_string(VALUE).await
    }

    async fn clear(&self) -> Result<()> {
        self.run(CLEAR, Vec::new()).await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        debug!(element_id = %self.inner.id, len = text.len(), "Typing text");

        let session = &self.inner.session;
        session
            .send_command(Command::Dom(DomCommand::Focus {
                object_id: self.inner.object_id.clone(),
            }))
            .await?;
        session
            .send_command(Command::Input(InputCommand::InsertText {
                text: text.to_string(),
            }))
            .await?;
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        self.run(CLICK, Vec::new()).await?;
        Ok(())
    }

    async fn select_by_text(&self, text: &str) -> Result<()> {
        let selected = self.run(SELECT_BY_TEXT, vec![text.into()]).await?;
        if selected.as_bool() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!("No option with text '{text}'")))
        }
    }

    async fn selected_text(&self) -> Result<Option<String>> {
        self.run_string(SELECTED_TEXT).await
    }
}

// ============================================================================
// Tests
// ============================================================================
