//! Resolver and controller configuration.
//!
//! Provides a type-safe interface for the timing, depth and naming knobs the
//! resolution core uses.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use resilient_locator::ResolverOptions;
//!
//! let options = ResolverOptions::new()
//!     .with_wait_timeout(Duration::from_secs(20))
//!     .with_max_shadow_depth(3)
//!     .with_host_tag("profile-form");
//!
//! options.validate()?;
//! ```
//!
//! Options deserialize from JSON with durations in milliseconds:
//!
//! ```json
//! { "wait_timeout": 20000, "poll_interval": 100, "max_shadow_depth": 3 }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default interactability wait per strategy.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll interval for wait loops.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default wait for the form in the main document.
pub const DEFAULT_FORM_WAIT: Duration = Duration::from_secs(2);

/// Default shadow traversal depth bound.
pub const DEFAULT_MAX_SHADOW_DEPTH: usize = 5;

// ============================================================================
// ResolverOptions
// ============================================================================

/// Timing and naming configuration for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// How long a found candidate may take to become visible and enabled.
    #[serde(with = "duration_ms")]
    pub wait_timeout: Duration,

    /// Delay between polls in wait loops.
    #[serde(with = "duration_ms")]
    pub poll_interval: Duration,

    /// How long to wait for the form in the main document before scanning frames.
    #[serde(with = "duration_ms")]
    pub form_wait: Duration,

    /// Selector identifying the target form.
    pub form_selector: String,

    /// Maximum number of shadow boundaries to cross.
    pub max_shadow_depth: usize,

    /// Custom element hosting the form's shadow root.
    pub host_tag: String,

    /// Outer custom element for the nested shadow form.
    pub nested_host_tag: String,

    /// Directory screenshots are written to.
    pub screenshot_dir: PathBuf,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ResolverOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            form_wait: DEFAULT_FORM_WAIT,
            form_selector: "#automationtestform".to_string(),
            max_shadow_depth: DEFAULT_MAX_SHADOW_DEPTH,
            host_tag: "shadow-form".to_string(),
            nested_host_tag: "nestedshadow-form".to_string(),
            screenshot_dir: PathBuf::from("Screenshots"),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ResolverOptions {
    /// Sets the interactability wait per strategy.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the main-document form wait.
    #[inline]
    #[must_use]
    pub fn with_form_wait(mut self, wait: Duration) -> Self {
        self.form_wait = wait;
        self
    }

    /// Sets the form selector.
    #[inline]
    #[must_use]
    pub fn with_form_selector(mut self, selector: impl Into<String>) -> Self {
        self.form_selector = selector.into();
        self
    }

    /// Sets the shadow depth bound.
    #[inline]
    #[must_use]
    pub fn with_max_shadow_depth(mut self, depth: usize) -> Self {
        self.max_shadow_depth = depth;
        self
    }

    /// Sets the custom element tag hosting the shadow form.
    #[inline]
    #[must_use]
    pub fn with_host_tag(mut self, tag: impl Into<String>) -> Self {
        self.host_tag = tag.into();
        self
    }

    /// Sets the outer custom element tag of the nested shadow form.
    #[inline]
    #[must_use]
    pub fn with_nested_host_tag(mut self, tag: impl Into<String>) -> Self {
        self.nested_host_tag = tag.into();
        self
    }

    /// Sets the screenshot directory.
    #[inline]
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ResolverOptions {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero poll interval, a zero depth
    /// bound, or an empty selector or tag.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::config("poll_interval must be greater than zero"));
        }
        if self.max_shadow_depth == 0 {
            return Err(Error::config("max_shadow_depth must be at least 1"));
        }
        if self.form_selector.trim().is_empty() {
            return Err(Error::config("form_selector must not be empty"));
        }
        if self.host_tag.trim().is_empty() || self.nested_host_tag.trim().is_empty() {
            return Err(Error::config("host tags must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Serde Helpers
// ============================================================================

/// Serializes a [`Duration`] as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ============================================================================
// Tests
// ============================================================================
