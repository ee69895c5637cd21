//! Event message types.
//!
//! Events are notifications the browser pushes without a request id. The
//! adapter does not subscribe to any domain, so the few that arrive are
//! only logged.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::identifiers::FrameId;

// ============================================================================
// Event
// ============================================================================

/// An event notification from the browser.
///
/// # Format
///
/// ```json
/// {
///   "method": "Domain.eventName",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event name in `Domain.eventName` format.
    pub method: String,

    /// Event-specific data.
    #[serde(default)]
    pub params: Value,
}

impl Event {
    /// Returns the domain name from the method.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &str {
        self.method.split('.').next().unwrap_or_default()
    }

    /// Returns the event name from the method.
    #[inline]
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.method.split('.').nth(1).unwrap_or_default()
    }

    /// Parses the event into a typed variant.
    #[must_use]
    pub fn parse(&self) -> ParsedEvent {
        match self.method.as_str() {
            "Page.frameNavigated" => ParsedEvent::FrameNavigated {
                frame_id: FrameId::new(
                    self.params
                        .pointer("/frame/id")
                        .and_then(Value::as_str)
                        .unwrap_or_default(),
                ),
            },
            "Page.loadEventFired" => ParsedEvent::LoadEventFired,
            "Runtime.executionContextsCleared" => ParsedEvent::ExecutionContextsCleared,
            _ => ParsedEvent::Other,
        }
    }
}

// ============================================================================
// ParsedEvent
// ============================================================================

/// Events the adapter distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEvent {
    /// A frame committed a navigation.
    FrameNavigated {
        /// The frame.
        frame_id: FrameId,
    },
    /// The page `load` event fired.
    LoadEventFired,
    /// Every execution context was discarded; element handles are stale.
    ExecutionContextsCleared,
    /// Anything else.
    Other,
}

// ============================================================================
// Tests
// ============================================================================
