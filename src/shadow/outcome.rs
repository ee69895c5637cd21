//! Structured results of shadow-DOM mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PierceStrategy
// ============================================================================

/// A way of reaching an element behind shadow boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PierceStrategy {
    /// Query the shadow root of every element with the known host tag.
    HostTag,
    /// Query the shadow root of every open host in the document.
    ShadowScan,
    /// Plain query against the light DOM.
    LightDom,
    /// Walk a [`ShadowPath`](super::ShadowPath) host by host.
    ExplicitPath,
    /// Query open hosts nested one level inside any open host.
    NestedScan,
    /// Depth-bounded search from the document.
    DeepSearch,
}

impl PierceStrategy {
    /// Order used by field mutations.
    pub const MUTATION_ORDER: [Self; 3] = [Self::HostTag, Self::ShadowScan, Self::LightDom];

    /// Order used by path writes.
    pub const PATH_ORDER: [Self; 3] = [Self::ExplicitPath, Self::NestedScan, Self::DeepSearch];

    /// Returns the strategy name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HostTag => "host_tag",
            Self::ShadowScan => "shadow_scan",
            Self::LightDom => "light_dom",
            Self::ExplicitPath => "explicit_path",
            Self::NestedScan => "nested_scan",
            Self::DeepSearch => "deep_search",
        }
    }
}

impl fmt::Display for PierceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// StrategyOutcome
// ============================================================================

/// What one strategy did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum StrategyOutcome {
    /// The change was made.
    Applied,
    /// No element accepted the change.
    NotFound,
    /// The strategy raised an error, isolated here.
    Failed(String),
    /// Not tried because an earlier strategy applied.
    Skipped,
}

/// One strategy and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    /// The strategy.
    pub strategy: PierceStrategy,
    /// Its outcome.
    pub outcome: StrategyOutcome,
}

// ============================================================================
// PierceOutcome
// ============================================================================

/// Per-strategy account of a shadow mutation.
///
/// Shadow mutations never fail past their boundary; inspect this instead.
///
/// # Example
///
/// ```ignore
/// let outcome = form.enter_first_name_in_shadow("Jane").await?;
/// if let Some(strategy) = outcome.succeeded_via() {
///     tracing::info!(%strategy, "First name written");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PierceOutcome {
    /// Operation name, e.g. `set_value`.
    pub operation: String,
    /// Target selector.
    pub target: String,
    /// One report per strategy, in priority order.
    pub reports: Vec<StrategyReport>,
}

impl PierceOutcome {
    /// Creates an outcome with no reports.
    #[must_use]
    pub fn new(operation: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            target: target.into(),
            reports: Vec::new(),
        }
    }

    /// Appends a report.
    pub fn record(&mut self, strategy: PierceStrategy, outcome: StrategyOutcome) {
        self.reports.push(StrategyReport { strategy, outcome });
    }

    /// The strategy that applied the change, if any.
    #[must_use]
    pub fn succeeded_via(&self) -> Option<PierceStrategy> {
        self.reports
            .iter()
            .find(|r| r.outcome == StrategyOutcome::Applied)
            .map(|r| r.strategy)
    }

    /// Returns `true` if some strategy applied the change.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.succeeded_via().is_some()
    }

    /// Outcome recorded for `strategy`.
    #[must_use]
    pub fn outcome_of(&self, strategy: PierceStrategy) -> Option<&StrategyOutcome> {
        self.reports
            .iter()
            .find(|r| r.strategy == strategy)
            .map(|r| &r.outcome)
    }
}

// ============================================================================
// Tests
// ============================================================================
