//! Resilient Locator - element resolution that survives brittle pages.
//!
//! This library finds and manipulates form controls in pages whose markup
//! shifts between releases, hides fields inside shadow roots, or moves the
//! form into an iframe.
//!
//! # Architecture
//!
//! The core is written against two capability traits, [`Session`] and
//! [`ElementHandle`]. A bundled adapter implements them over the Chrome
//! DevTools Protocol:
//!
//! - **Resolution core**: ordered locator fallback, shadow-root piercing,
//!   frame discovery, field operations
//! - **Adapter**: [`CdpSession`] and [`CdpElement`] over one WebSocket
//!
//! Key design principles:
//!
//! - Every locator attempt is recorded; exhaustion reports all of them
//! - Shadow traversal is bounded by depth and never revisits a host
//! - Frame switches return new handles, never mutate shared context
//! - Reads degrade to neutral values; writes surface their errors
//!
//! # Quick Start
//!
//! ```no_run
//! use resilient_locator::{CdpSession, FormFieldController, ResolverOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = CdpSession::connect("ws://127.0.0.1:9222/devtools/page/ABC").await?;
//!     let session = session
//!         .goto("https://app.cloudqa.io/home/AutomationPracticeForm")
//!         .await?;
//!
//!     let mut form = FormFieldController::new(session, ResolverOptions::default())?;
//!     form.enter_first_name("Jane").await?;
//!     form.select_gender("Female").await?;
//!     form.select_state("India").await?;
//!
//!     println!("First name: {}", form.get_first_name_value().await?);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolve`] | [`FallbackResolver`], waits, locator strategies |
//! | [`shadow`] | [`ShadowPiercer`], shadow paths, mutation outcomes |
//! | [`form`] | [`FormFieldController`], frame discovery, screenshots |
//! | [`driver`] | Capability traits and [`ResolverOptions`] |
//! | [`selector`] | [`By`] locators |
//! | [`browser`] | DevTools adapter: [`CdpSession`], [`CdpElement`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | DevTools message types (internal) |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// DevTools adapter: CdpSession, CdpElement.
pub mod browser;

/// Capability traits and configuration.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Form field operations over fallback resolution and shadow piercing.
pub mod form;

/// Type-safe identifiers for browser entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// DevTools protocol message types.
///
/// Internal module defining command/response/event structures.
pub mod protocol;

/// Ordered locator fallback.
pub mod resolve;

/// Element locators.
pub mod selector;

/// Shadow-root traversal and mutation.
pub mod shadow;

/// WebSocket transport layer.
///
/// Internal module handling the DevTools connection.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Adapter types
pub use browser::{CdpElement, CdpSession};

// Driver types
pub use driver::{ElementHandle, ResolverOptions, ScriptArg, ScriptValue, Session};

// Error types
pub use error::{Error, Result};

// Form types
pub use form::{FieldTarget, FormFieldController, FormLocation};

// Identifier types
pub use identifiers::{ContextId, ElementId, FrameId, RequestId};

// Resolution types
pub use resolve::{AttemptOutcome, FallbackResolver, LocatorStrategy, ResolutionAttempt, Resolved};

// Selector types
pub use selector::By;

// Shadow types
pub use shadow::{
    PierceOutcome, PierceStrategy, ShadowMatch, ShadowPath, ShadowPiercer, ShadowSearch,
    StrategyOutcome,
};
