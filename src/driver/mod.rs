//! Driver capability surface.
//!
//! The resolution core never talks to a browser directly. It consumes the
//! capabilities below, and anything that implements them can be driven:
//! the bundled CDP adapter ([`crate::browser::CdpSession`]) or an
//! in-memory document in tests.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | Queries, script execution, frame contexts, screenshots |
//! | [`ElementHandle`] | Opaque reference to a live DOM node |
//! | [`ScriptArg`] / [`ScriptValue`] | Positional script arguments and typed results |
//! | [`ResolverOptions`] | Timeouts, depth bound, host tags, screenshot directory |
//!
//! # Frame Contexts
//!
//! A session handle is bound to one browsing context. Switching frames
//! returns a *new* handle instead of mutating shared state, so an
//! operation can never leave the caller stranded in an arbitrary frame:
//!
//! ```ignore
//! let frame = session.frame(2).await?;
//! let field = frame.find(&By::id("fname")).await?;
//! let main = session.main_frame().await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Resolver and controller configuration.
pub mod options;

/// Script argument and result types.
pub mod script;

/// Session and element capability traits.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use options::ResolverOptions;
pub use script::{ScriptArg, ScriptValue};
pub use session::{ElementHandle, Session};
