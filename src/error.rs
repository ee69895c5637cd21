//! Error types for resilient-locator.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use resilient_locator::{Result, Error};
//!
//! async fn example(form: &mut FormFieldController<CdpSession>) -> Result<()> {
//!     form.enter_first_name("Jane").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Resolution | [`Error::ElementNotFound`], [`Error::ElementNotResolvable`], [`Error::NotInteractable`] |
//! | Shadow DOM | [`Error::ShadowPierceFailed`] |
//! | Frames | [`Error::FrameSwitchFailed`] |
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`] |
//! | Execution | [`Error::ScriptError`], [`Error::Timeout`], [`Error::RequestTimeout`], [`Error::Protocol`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`], [`Error::Image`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::identifiers::RequestId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// A single locator matched nothing.
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Locator that was tried.
        selector: String,
    },

    /// Every locator strategy was exhausted without an interactable match.
    ///
    /// `cause` carries the most informative earlier failure.
    #[error("Element not resolvable after {attempted} strategies: {target}")]
    ElementNotResolvable {
        /// Description of what was being resolved.
        target: String,
        /// Number of strategies that were attempted.
        attempted: usize,
        /// The failure that best explains the exhaustion.
        #[source]
        cause: Option<Box<Error>>,
    },

    /// Element was found but never became visible and enabled.
    #[error("Element not interactable after {timeout_ms}ms: {strategy}")]
    NotInteractable {
        /// Strategy that produced the candidate.
        strategy: String,
        /// Milliseconds waited.
        timeout_ms: u64,
    },

    // ========================================================================
    // Shadow DOM Errors
    // ========================================================================
    /// Best-effort shadow traversal finished without a match.
    ///
    /// Not necessarily a bug: a closed shadow root cannot be pierced.
    #[error("Shadow pierce failed for {selector}: {reason}")]
    ShadowPierceFailed {
        /// Target selector.
        selector: String,
        /// Why nothing matched.
        reason: String,
    },

    // ========================================================================
    // Frame Errors
    // ========================================================================
    /// Frame context switch or restore failed.
    ///
    /// Fatal to the current operation: the session context is unknown.
    #[error("Frame switch failed: {message}")]
    FrameSwitchFailed {
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection timeout.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// JavaScript execution error.
    #[error("Script error: {message}")]
    ScriptError {
        /// Error message from script execution.
        message: String,
    },

    /// Operation timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Command request timeout.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Protocol violation or unexpected response.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Image decoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates an element-not-resolvable error.
    #[inline]
    pub fn element_not_resolvable(
        target: impl Into<String>,
        attempted: usize,
        cause: Option<Error>,
    ) -> Self {
        Self::ElementNotResolvable {
            target: target.into(),
            attempted,
            cause: cause.map(Box::new),
        }
    }

    /// Creates a not-interactable error.
    #[inline]
    pub fn not_interactable(strategy: impl Into<String>, timeout_ms: u64) -> Self {
        Self::NotInteractable {
            strategy: strategy.into(),
            timeout_ms,
        }
    }

    /// Creates a shadow-pierce-failed error.
    #[inline]
    pub fn shadow_pierce_failed(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShadowPierceFailed {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Creates a frame switch error.
    #[inline]
    pub fn frame_switch_failed(message: impl Into<String>) -> Self {
        Self::FrameSwitchFailed {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a script error.
    #[inline]
    pub fn script_error(message: impl Into<String>) -> Self {
        Self::ScriptError {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. }
                | Self::Timeout { .. }
                | Self::RequestTimeout { .. }
                | Self::NotInteractable { .. }
        )
    }

    /// Returns `true` if this error came out of element resolution.
    #[inline]
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::ElementNotResolvable { .. }
                | Self::NotInteractable { .. }
                | Self::ShadowPierceFailed { .. }
        )
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry. A failed frame switch is
    /// never recoverable because the session context is unknown.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. }
                | Self::Timeout { .. }
                | Self::RequestTimeout { .. }
                | Self::NotInteractable { .. }
                | Self::ElementNotResolvable { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
