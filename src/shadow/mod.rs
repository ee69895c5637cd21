//! Shadow-DOM piercing.
//!
//! Standard queries stop at shadow boundaries. This module reaches across
//! them by script evaluation, one boundary at a time.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ShadowPiercer`] | Depth-bounded search and fallback mutations |
//! | [`ShadowPath`] | Explicit host chain to a target |
//! | [`ShadowSearch`] | Match (with depth and [`RootAccess`]) or diagnostics |
//! | [`PierceOutcome`] | Which mutation strategy applied, per strategy |
//! | [`PageStructure`] | Diagnostic snapshot of the page |
//!
//! Closed shadow roots cannot be queried. For them the piercer falls back to
//! a document-wide id scan; matches found that way are tagged
//! [`RootAccess::ClosedHeuristic`] and nothing about them is guaranteed.
//!
//! # Example
//!
//! ```ignore
//! use resilient_locator::shadow::{PierceStrategy, ShadowPiercer};
//!
//! let piercer = ShadowPiercer::default();
//! let outcome = piercer.set_value_in_shadow(&session, "#fname", "Jane").await;
//! assert_eq!(outcome.succeeded_via(), Some(PierceStrategy::HostTag));
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod mutation;
mod outcome;
mod path;
mod piercer;

/// Page scripts the piercer evaluates.
pub mod scripts;

// ============================================================================
// Re-exports
// ============================================================================

pub use outcome::{PierceOutcome, PierceStrategy, StrategyOutcome, StrategyReport};
pub use path::ShadowPath;
pub use piercer::{
    PageStructure, PierceRoot, RootAccess, SearchMiss, ShadowMatch, ShadowPiercer, ShadowSearch,
};
