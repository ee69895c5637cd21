//! Core CdpSession struct, accessors and driver trait implementation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::browser::CdpElement;
use crate::driver::{ScriptArg, ScriptValue, Session};
use crate::error::{Error, Result};
use crate::identifiers::{ContextId, FrameId};
use crate::protocol::{Command, PageCommand};
use crate::selector::By;
use crate::transport::Connection;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// Shared DevTools connection.
    pub connection: Connection,
    /// Frame this session is bound to.
    pub frame_id: FrameId,
    /// Isolated world scripts run in.
    pub context_id: ContextId,
}

// ============================================================================
// CdpSession
// ============================================================================

/// A browsing context reached over the Chrome DevTools Protocol.
///
/// Each handle is bound to one frame and to an isolated script world in
/// it. Frame navigation returns new handles; clones share the connection.
///
/// # Example
///
/// ```ignore
/// let session = CdpSession::connect("ws://127.0.0.1:9222/devtools/page/ABC").await?;
/// let session = session.goto("https://app.cloudqa.io/home/AutomationPracticeForm").await?;
///
/// let mut form = FormFieldController::new(session, ResolverOptions::default())?;
/// form.enter_first_name("Jane").await?;
/// ```
#[derive(Clone)]
pub struct CdpSession {
    pub(crate) inner: Arc<SessionInner>,
}

impl fmt::Debug for CdpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdpSession")
            .field("frame_id", &self.inner.frame_id)
            .field("context_id", &self.inner.context_id)
            .finish_non_exhaustive()
    }
}

impl CdpSession {
    /// Connects to a page target and binds to its top-level frame.
    ///
    /// # Errors
    ///
    /// Returns a connection error, or [`Error::Protocol`] if the frame tree
    /// or isolated world cannot be obtained.
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let connection = Connection::connect(ws_url).await?;
        let tree = Self::fetch_frame_tree(&connection).await?;
        Self::bind(connection, tree.frame.id).await
    }

    /// Creates a session bound to `frame_id` with a fresh isolated world.
    pub(crate) async fn bind(connection: Connection, frame_id: FrameId) -> Result<Self> {
        let world_name = format!("resilient-locator-{}", Uuid::new_v4());
        let command = Command::Page(PageCommand::CreateIsolatedWorld {
            frame_id: frame_id.clone(),
            world_name,
            grant_univeral_access: true,
        });

        let result = connection.call(command).await?;
        let context_id = result
            .get("executionContextId")
            .and_then(Value::as_i64)
            .map(ContextId::new)
            .ok_or_else(|| Error::protocol("No executionContextId in response"))?;

        debug!(%frame_id, %context_id, "Bound session to frame");

        Ok(Self {
            inner: Arc::new(SessionInner {
                connection,
                frame_id,
                context_id,
            }),
        })
    }
}

// ============================================================================
// CdpSession - Accessors
// ============================================================================

impl CdpSession {
    /// Returns the bound frame ID.
    #[inline]
    #[must_use]
    pub fn frame_id(&self) -> &FrameId {
        &self.inner.frame_id
    }

    /// Returns the execution context ID.
    #[inline]
    #[must_use]
    pub fn context_id(&self) -> ContextId {
        self.inner.context_id
    }

    /// Returns the underlying connection.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.inner.connection
    }
}

// ============================================================================
// CdpSession - Internal
// ============================================================================

impl CdpSession {
    /// Sends a command and returns the result payload.
    pub(crate) async fn send_command(&self, command: Command) -> Result<Value> {
        self.inner.connection.call(command).await
    }
}

// ============================================================================
// Session Implementation
// ============================================================================

#[async_trait]
impl Session for CdpSession {
    type Element = CdpElement;

    async fn find(&self, by: &By) -> Result<Option<CdpElement>> {
        let value = self
            .execute_script(by.find_script(), vec![by.value().into()])
            .await?;
        Ok(value.into_element())
    }

    async fn find_all(&self, by: &By) -> Result<Vec<CdpElement>> {
        let value = self
            .execute_script(by.find_all_script(), vec![by.value().into()])
            .await?;
        Ok(value.into_elements())
    }

    async fn execute(
        &self,
        script: &str,
        args: Vec<ScriptArg<CdpElement>>,
    ) -> Result<ScriptValue<CdpElement>> {
        self.execute_script(script, args).await
    }

    async fn frame_count(&self) -> Result<usize> {
        self.child_frame_count().await
    }

    async fn frame(&self, index: usize) -> Result<Self> {
        self.switch_to_frame(index).await
    }

    async fn main_frame(&self) -> Result<Self> {
        self.switch_to_main_frame().await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.capture_png().await
    }
}

// ============================================================================
// Tests
// ============================================================================
