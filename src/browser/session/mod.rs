//! DevTools-backed browsing context.
//!
//! Each [`CdpSession`] is bound to one frame and one isolated script world.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Session struct, accessors, driver trait impl |
//! | `script` | Function calls and result conversion |
//! | `frames` | Frame tree and frame switching |
//! | `navigation` | URL navigation, load wait |
//! | `screenshot` | PNG capture |
//!
//! # Example
//!
//! ```ignore
//! let session = CdpSession::connect(ws_url).await?;
//! let session = session.goto("https://example.com").await?;
//!
//! let frames = session.child_frame_count().await?;
//! let first = session.switch_to_frame(0).await?;
//! let png = first.capture_png().await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod frames;
mod navigation;
mod screenshot;
mod script;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::CdpSession;
