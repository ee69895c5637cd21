//! Ordered-fallback element resolution.
//!
//! A field on a real page may be reachable by id today, by name tomorrow,
//! and only by a positional XPath on a legacy build. The resolver tries an
//! ordered list of [`LocatorStrategy`] values, most specific first, and
//! returns the first candidate that becomes interactable.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LocatorStrategy`] | One way to produce a candidate element |
//! | [`FallbackResolver`] | Iterates strategies, waits for interactability |
//! | [`ResolutionAttempt`] | Per-strategy diagnostic record |
//! | [`Resolved`] | Winning element plus every attempt made |
//!
//! # Example
//!
//! ```ignore
//! use resilient_locator::{By, FallbackResolver};
//!
//! let resolver = FallbackResolver::new(timeout, poll);
//! let field = resolver
//!     .resolve(&session, &[By::id("fname"), By::name("First Name")])
//!     .await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod resolver;
mod strategy;
mod wait;

// ============================================================================
// Re-exports
// ============================================================================

pub use resolver::{AttemptOutcome, FallbackResolver, ResolutionAttempt, Resolved};
pub use strategy::LocatorStrategy;
pub use wait::{wait_until, wait_until_interactable};
