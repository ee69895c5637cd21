//! WebSocket transport layer.
//!
//! This module handles communication with a browser's DevTools endpoint
//! over WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  CdpSession     │                              │  Browser        │
//! │  (Rust)         │         WebSocket            │  (DevTools)     │
//! │  → Connection   │─────────────────────────────►│                 │
//! │                 │  ws://host:port/devtools/... │  page target    │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::connect` - Validate the URL and perform the handshake
//! 2. `Connection::call` - Send commands, receive correlated responses
//! 3. `Connection::shutdown` - Close the socket explicitly
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
