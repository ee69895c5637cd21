//! Chrome DevTools Protocol message types.
//!
//! This module defines the messages exchanged with the browser's page
//! WebSocket endpoint.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Local → Browser | Command with numeric `id` |
//! | `Response` | Browser → Local | `result` or `error` for an `id` |
//! | `Event` | Browser → Local | Notification without `id` |
//!
//! # Command Naming
//!
//! Commands follow `Domain.method` format:
//!
//! - `Page.getFrameTree`
//! - `Runtime.callFunctionOn`
//! - `DOM.describeNode`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by domain |
//! | `event` | Event types |
//! | `request` | Request and Response types |
//! | `types` | Result payloads the adapter reads |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by domain.
pub mod command;

/// Event message types.
pub mod event;

/// Request and Response message types.
pub mod request;

/// Result payload types.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{CallArgument, Command, DomCommand, InputCommand, PageCommand, RuntimeCommand};
pub use event::{Event, ParsedEvent};
pub use request::{CdpError, Request, Response};
pub use types::{
    ExceptionDetails, FrameInfo, FrameTree, NodeDescription, PropertyDescriptor, RemoteObject,
};
