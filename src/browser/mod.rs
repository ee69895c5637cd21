//! Chrome DevTools Protocol adapter.
//!
//! This module implements the driver capabilities over a page's DevTools
//! WebSocket:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CdpSession`] | Browsing context bound to one frame |
//! | [`CdpElement`] | DOM element reference |
//!
//! # Example
//!
//! ```no_run
//! use resilient_locator::{CdpSession, FormFieldController, ResolverOptions, Result};
//!
//! # async fn example() -> Result<()> {
//! let session = CdpSession::connect("ws://127.0.0.1:9222/devtools/page/ABC").await?;
//! let session = session
//!     .goto("https://app.cloudqa.io/home/AutomationPracticeForm")
//!     .await?;
//!
//! let mut form = FormFieldController::new(session, ResolverOptions::default())?;
//! form.enter_first_name("Jane").await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// DOM element handles.
pub mod element;

/// DevTools-backed browsing context.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::CdpElement;
pub use session::CdpSession;
